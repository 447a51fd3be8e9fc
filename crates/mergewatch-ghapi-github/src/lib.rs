//! GitHub API adapter.
//!
//! Contains functions to communicate with the GitHub REST API.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod auth;
mod errors;
mod github;

pub use github::GithubApiService;
