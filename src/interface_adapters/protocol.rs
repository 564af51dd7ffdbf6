// HTTP payloads for the public game stream API.

use crate::domain::User;
use serde::{Deserialize, Serialize};

/// Response to `/start_game`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub game_id: String,
}

/// Body of `/game_event`, accepted as a form or JSON.
#[derive(Debug, Deserialize)]
pub struct GameEventRequest {
    pub game_id: String,
    // Opaque payload relayed verbatim to viewers.
    pub event: String,
}

/// Body of `/create_user`, accepted as a form or JSON.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDto {
    pub id: String,
    pub name: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_games: usize,
}

// Shared JSON error envelope for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
