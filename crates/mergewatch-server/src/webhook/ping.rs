//! Ping webhook handlers.

use actix_web::HttpResponse;
use mergewatch_ghapi_interface::types::GhPingEvent;
use tracing::info;

use super::parse_event_type;
use crate::{errors::Result, event_type::EventType};

pub(crate) fn parse_ping_event(body: &str) -> Result<GhPingEvent> {
    parse_event_type(EventType::Ping, body)
}

pub(crate) fn ping_event(body: &str) -> HttpResponse {
    // The acknowledgement does not depend on the payload; parsing only
    // enriches the log line.
    match parse_ping_event(body) {
        Ok(GhPingEvent {
            repository: Some(repo),
            ..
        }) => {
            info!(
                message = "Ping event from repository",
                repository_path = %repo.full_name
            );
        }
        _ => {
            info!("Ping event without repository");
        }
    }

    HttpResponse::Ok().json(serde_json::json!({"message": "pong"}))
}
