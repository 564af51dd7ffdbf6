use crate::domain::UserError;
use crate::interface_adapters::extract::FormOrJson;
use crate::interface_adapters::handlers::error_response;
use crate::interface_adapters::protocol::{CreateUserRequest, ErrorResponse, UserDto};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{CreateUserUseCase, ListUsersUseCase};
use axum::{Json, extract::State, http::StatusCode};
use tracing::warn;

pub async fn user_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserDto>>, (StatusCode, Json<ErrorResponse>)> {
    let use_case = ListUsersUseCase {
        store: state.users.as_ref(),
    };

    let users = use_case
        .execute()
        .await
        .map_err(|err| map_user_error(err, UserErrorContext::List))?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    FormOrJson(payload): FormOrJson<CreateUserRequest>,
) -> Result<Json<UserDto>, (StatusCode, Json<ErrorResponse>)> {
    let use_case = CreateUserUseCase {
        store: state.users.as_ref(),
    };

    let user = use_case
        .execute(&payload.name)
        .await
        .map_err(|err| map_user_error(err, UserErrorContext::Create))?;

    Ok(Json(UserDto::from(user)))
}

// Storage failures keep the store's message but map to different codes per endpoint.
enum UserErrorContext {
    List,
    Create,
}

fn map_user_error(err: UserError, context: UserErrorContext) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        UserError::InvalidName => error_response(StatusCode::BAD_REQUEST, "invalid name"),
        UserError::StorageFailure(message) => {
            warn!(error = %message, "user store failure");
            let status = match context {
                UserErrorContext::List => StatusCode::INTERNAL_SERVER_ERROR,
                UserErrorContext::Create => StatusCode::UNAUTHORIZED,
            };
            error_response(status, &message)
        }
    }
}
