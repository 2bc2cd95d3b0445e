use std::net::SocketAddr;

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde_json::Value;

use crate::alert::incident_message;
use crate::app_context::AppContext;
use crate::incident::normalize_incident;

pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/api/incident", post(handle_incident))
        .with_state(context)
}

pub async fn serve(context: AppContext) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], context.config.listen_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("incident_receiver_listening addr={}", listener.local_addr()?);

    axum::serve(listener, router(context)).await
}

async fn handle_incident(
    State(context): State<AppContext>,
    body: String,
) -> (StatusCode, String) {
    let Some(webhook_url) = context.config.webhook_url.as_deref() else {
        log::error!("incident_rejected reason=webhook_url_not_configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Configuration error".to_string(),
        );
    };

    let payload = match classify_body(&body) {
        BodyOutcome::Empty => {
            log::error!("incident_rejected reason=empty_body");
            return (StatusCode::BAD_REQUEST, "Empty request body".to_string());
        }
        BodyOutcome::Invalid => {
            log::error!("incident_rejected reason=invalid_json");
            return (StatusCode::BAD_REQUEST, "Invalid JSON".to_string());
        }
        BodyOutcome::Payload(value) => value,
    };

    let record = normalize_incident(&payload);
    let message = incident_message(&record);

    match context.dispatcher.send(webhook_url, &message).await {
        Ok(delivery) if delivery.is_success() => {
            log::info!("incident_notified title={}", record.title);
            (
                StatusCode::OK,
                "Notification sent successfully".to_string(),
            )
        }
        Ok(delivery) => {
            log::error!(
                "incident_dispatch_failed status={} body={}",
                delivery.status,
                delivery.body
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to send notification: {}", delivery.status),
            )
        }
        Err(error) => {
            log::error!("incident_dispatch_failed error={}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", error),
            )
        }
    }
}

enum BodyOutcome {
    Empty,
    Invalid,
    Payload(Value),
}

// An empty object or null parses fine but carries nothing to normalize;
// both count as an empty body.
fn classify_body(body: &str) -> BodyOutcome {
    if body.trim().is_empty() {
        return BodyOutcome::Empty;
    }

    match serde_json::from_str::<Value>(body) {
        Err(_) => BodyOutcome::Invalid,
        Ok(Value::Null) => BodyOutcome::Empty,
        Ok(value) if value.as_object().is_some_and(|map| map.is_empty()) => BodyOutcome::Empty,
        Ok(value) => BodyOutcome::Payload(value),
    }
}
