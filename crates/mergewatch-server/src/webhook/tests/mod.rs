//! Webhook handler tests

mod handlers;
