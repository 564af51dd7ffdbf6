use crate::interface_adapters::handlers::{
    create_user, game_event, health, join_game, join_game_without_id, start_game, user_list,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/start_game", get(start_game).post(start_game))
        .route("/join_game", get(join_game_without_id))
        .route("/join_game/", get(join_game_without_id))
        .route("/join_game/{game_id}", get(join_game))
        .route("/game_event", post(game_event))
        .route("/user_list", get(user_list))
        .route("/create_user", post(create_user))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        // Browser viewers are served from other origins.
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}
