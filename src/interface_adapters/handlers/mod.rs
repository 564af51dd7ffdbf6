// HTTP handlers grouped by resource.

pub mod games;
pub mod stream;
pub mod users;

use crate::interface_adapters::protocol::ErrorResponse;
use axum::{Json, http::StatusCode};

pub use games::{game_event, health, start_game};
pub use stream::{join_game, join_game_without_id};
pub use users::{create_user, user_list};

// Helper to build a JSON error response.
pub fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
