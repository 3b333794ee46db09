use axum::routing::post;
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// ```text
/// POST /alert    -> send_alert
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/alert", post(alert::send_alert))
}
