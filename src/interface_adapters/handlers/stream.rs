// Server-Sent Events adapter: one subscription per viewer connection.

use crate::domain::BrokerError;
use crate::interface_adapters::handlers::error_response;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::next_subscriber_id;
use crate::use_cases::Payload;

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::StreamExt;
use std::convert::Infallible;
use tracing::{debug, info};

// Attaches the connection to the session's broker and streams its events.
//
// The response body owns the subscription, so hyper dropping the body on
// disconnect, write failure or shutdown is what unregisters the viewer.
pub async fn join_game(State(state): State<AppState>, Path(game_id): Path<String>) -> Response {
    let Some(broker) = state.registry.lookup(&game_id).await else {
        debug!(%game_id, "join for unknown game");
        return error_response(StatusCode::BAD_REQUEST, "unknown game_id").into_response();
    };

    let subscription = match broker.subscribe(next_subscriber_id()).await {
        Ok(subscription) => subscription,
        Err(BrokerError::Retired) => {
            debug!(%game_id, "join for retired game");
            return error_response(StatusCode::BAD_REQUEST, "unknown game_id").into_response();
        }
    };
    info!(%game_id, subscriber_id = %subscription.id(), "viewer joined");

    let events = subscription
        .map(|payload: Payload| Ok::<_, Infallible>(Event::default().data(payload)));
    let sse = match state.stream.keep_alive {
        Some(interval) => Sse::new(events)
            .keep_alive(KeepAlive::new().interval(interval))
            .into_response(),
        None => Sse::new(events).into_response(),
    };

    // Sse already sets the event-stream content type and disables caching.
    ([(header::CONNECTION, "keep-alive")], sse).into_response()
}

// `/join_game` without a session segment.
pub async fn join_game_without_id() -> Response {
    error_response(StatusCode::BAD_REQUEST, "game_id is required").into_response()
}
