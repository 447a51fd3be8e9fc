//! Webhook handlers.

mod ping;
mod pulls;

#[cfg(test)]
mod tests;

use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use mergewatch_ghapi_interface::ApiService;
use serde::Deserialize;

use crate::{
    constants::GITHUB_EVENT_HEADER, event_type::EventType, server::AppContext,
    utils::convert_payload_to_string, Result, ServerError,
};

#[tracing::instrument(skip_all, fields(event_type))]
async fn parse_event(
    api_service: &dyn ApiService,
    event_type: EventType,
    body: &str,
) -> Result<HttpResponse> {
    match event_type {
        EventType::Ping => Ok(ping::ping_event(body)),
        EventType::PullRequest => {
            pulls::pull_request_event(api_service, pulls::parse_pull_request_event(body)?).await
        }
    }
}

fn parse_event_type<'de, T>(event_type: EventType, body: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    serde_json::from_str(body).map_err(|e| ServerError::EventParseError {
        event_type,
        source: e,
    })
}

fn extract_event_from_request(req: &HttpRequest) -> Result<EventType> {
    let raw_event = req
        .headers()
        .get(GITHUB_EVENT_HEADER)
        .and_then(|x| x.to_str().ok())
        .ok_or(ServerError::MissingEventHeader)?;

    EventType::try_from(raw_event).map_err(|_| ServerError::UnsupportedEvent {
        event: raw_event.to_owned(),
    })
}

#[tracing::instrument(skip_all)]
pub(crate) async fn event_handler(
    req: HttpRequest,
    mut payload: web::Payload,
    ctx: web::Data<AppContext>,
) -> ActixResult<HttpResponse> {
    // Route event depending on header
    let event_type = extract_event_from_request(&req)?;
    let body = convert_payload_to_string(&mut payload)
        .await
        .map_err(|_| ServerError::InvalidPayload)?;

    parse_event(ctx.api_service.as_ref(), event_type, &body)
        .await
        .map_err(Into::into)
}

/// Configure webhook handlers.
pub fn configure_webhook_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(event_handler)));
}
