//! Pull webhook handlers.

use actix_web::HttpResponse;
use mergewatch_ghapi_interface::{
    types::{GhPullRequestAction, GhPullRequestEvent},
    ApiService,
};
use mergewatch_models::{PullRequestHandle, RepositoryPath};
use tracing::{error, info};

use super::parse_event_type;
use crate::{event_type::EventType, Result, ServerError};

pub(crate) fn parse_pull_request_event(body: &str) -> Result<GhPullRequestEvent> {
    parse_event_type(EventType::PullRequest, body)
}

/// A pull request counts as merged when it was closed with the merged flag set.
fn is_merge_event(event: &GhPullRequestEvent) -> bool {
    matches!(event.action, GhPullRequestAction::Closed)
        && event.pull_request.merged.unwrap_or(false)
}

pub(crate) async fn pull_request_event(
    api_service: &dyn ApiService,
    event: GhPullRequestEvent,
) -> Result<HttpResponse> {
    if !is_merge_event(&event) {
        info!(
            message = "Not merged event",
            repository_path = %event.repository.full_name,
            pr_number = event.number
        );
        return Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Not merged event"})));
    }

    let handle = merge_event_handle(&event)?;
    process_merged_pull_request(api_service, &handle).await?;

    Ok(HttpResponse::Ok()
        .json(serde_json::json!({"message": "The webhook was successfully received"})))
}

/// Resolve the handle of the merged pull request from its head repository.
fn merge_event_handle(event: &GhPullRequestEvent) -> Result<PullRequestHandle> {
    let head_repository =
        event
            .pull_request
            .head
            .repo
            .as_ref()
            .ok_or(ServerError::MissingHeadRepository {
                number: event.number,
            })?;

    let repository_path: RepositoryPath =
        head_repository.full_name.as_str().try_into().map_err(|_| {
            ServerError::InvalidRepositoryPath {
                path: head_repository.full_name.clone(),
            }
        })?;

    Ok(PullRequestHandle::new(repository_path, event.number))
}

#[tracing::instrument(skip(api_service), fields(pr_handle = %handle))]
async fn process_merged_pull_request(
    api_service: &dyn ApiService,
    handle: &PullRequestHandle,
) -> Result<()> {
    info!(message = "Received pull request merged event");

    let pull_request = api_service
        .pulls_get(handle.owner(), handle.name(), handle.number())
        .await
        .map_err(|e| {
            error!(
                pr_handle = %handle,
                error = %e,
                message = "Could not fetch pull request"
            );
            ServerError::ApiFailure { source: e }
        })?;

    let changed_files = api_service
        .pulls_files_list(handle.owner(), handle.name(), handle.number())
        .await
        .map_err(|e| {
            error!(
                pr_handle = %handle,
                error = %e,
                message = "Could not list changed files"
            );
            ServerError::ApiFailure { source: e }
        })?;

    info!(
        pr_title = %pull_request.title,
        file_count = changed_files.len(),
        message = "Logging changed files"
    );

    for file in &changed_files {
        info!(
            filename = %file.filename,
            pr_number = handle.number(),
            message = "File changed in merged pull request"
        );
    }

    Ok(())
}
