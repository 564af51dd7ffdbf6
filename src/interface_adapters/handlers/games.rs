use crate::domain::{BrokerError, GameId, RegistryError};
use crate::interface_adapters::extract::FormOrJson;
use crate::interface_adapters::handlers::error_response;
use crate::interface_adapters::protocol::{
    ErrorResponse, GameEventRequest, HealthResponse, StartGameResponse,
};
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use tracing::{debug, error, info};

// Opens a new game session and returns its id.
pub async fn start_game(
    State(state): State<AppState>,
) -> Result<Json<StartGameResponse>, (StatusCode, Json<ErrorResponse>)> {
    let game_id = GameId::from(state.game_ids.next_id());

    match state.registry.create(game_id.clone()).await {
        Ok(_) => {
            info!(%game_id, "started new game");
            Ok(Json(StartGameResponse {
                game_id: game_id.to_string(),
            }))
        }
        Err(err @ RegistryError::AlreadyExists(_)) => {
            // Ids are meant to be collision-free; a repeat points at the generator.
            error!(error = %err, "game id collision");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "could not allocate a game id",
            ))
        }
    }
}

// Relays one event payload to every viewer of the session.
pub async fn game_event(
    State(state): State<AppState>,
    FormOrJson(payload): FormOrJson<GameEventRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let Some(broker) = state.registry.lookup(&payload.game_id).await else {
        debug!(game_id = %payload.game_id, "event for unknown game");
        return Err(error_response(StatusCode::BAD_REQUEST, "unknown game_id"));
    };

    broker.publish(payload.event).map_err(|err| match err {
        BrokerError::Retired => {
            debug!(game_id = %payload.game_id, "event for retired game");
            error_response(StatusCode::BAD_REQUEST, "unknown game_id")
        }
    })?;

    Ok(StatusCode::OK)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        active_games: state.registry.len().await,
    })
}
