//! Handler for the manual alert endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use cloudpulse_core::alert::MANUAL_ALERT_SUBJECT;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::AlertAccepted;
use crate::state::AppState;

/// Request body for POST /alert.
#[derive(Debug, Deserialize)]
pub struct AlertRequest {
    pub message: Option<String>,
}

/// POST /alert
///
/// A missing body, a malformed body and a blank message are all rejected
/// with 400 before anything is published.
pub async fn send_alert(
    State(state): State<AppState>,
    payload: Result<Json<AlertRequest>, JsonRejection>,
) -> AppResult<Json<AlertAccepted>> {
    let message = match payload {
        Ok(Json(request)) => request.message.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable alert body");
            String::new()
        }
    };

    state
        .publisher
        .publish(MANUAL_ALERT_SUBJECT, &message)
        .await?;

    Ok(Json(AlertAccepted { success: true }))
}
