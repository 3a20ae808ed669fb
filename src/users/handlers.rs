use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    extractors::JsonBody,
    state::AppState,
    users::{
        dto::{CreateUserRequest, CreatedUserResponse, MessageResponse, UpdateUserRequest},
        password::hash_password_blocking,
        repo_types::{NewUser, User, UserChanges},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// An id that isn't a non-negative integer can't match any row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or(ApiError::NotFound)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| ApiError::store("Query failed", e))?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    match state.users.find(id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => {
            warn!(%id, "user not found");
            Err(ApiError::NotFound)
        }
        Err(e) => Err(ApiError::store("Query failed", e)),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    let Some(password) = non_empty(payload.password) else {
        warn!("create user without password");
        return Err(ApiError::Validation("Password is required"));
    };
    let (Some(firstname), Some(lastname)) =
        (non_empty(payload.firstname), non_empty(payload.lastname))
    else {
        warn!("create user without first or last name");
        return Err(ApiError::Validation("First name and last name are required"));
    };

    let password_hash = hash_password_blocking(password)
        .await
        .map_err(|e| ApiError::store("Insert failed", e))?;

    let new_user = NewUser {
        firstname,
        fullname: payload.fullname,
        lastname,
        password_hash,
    };
    let id = state
        .users
        .insert(&new_user)
        .await
        .map_err(|e| ApiError::store("Insert failed", e))?;

    info!(user_id = %id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            id,
            firstname: new_user.firstname,
            fullname: new_user.fullname,
            lastname: new_user.lastname,
            message: "User created successfully",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;

    let password_hash = match non_empty(payload.password) {
        Some(plain) => Some(
            hash_password_blocking(plain)
                .await
                .map_err(|e| ApiError::store("Update failed", e))?,
        ),
        None => None,
    };

    let changes = UserChanges {
        firstname: payload.firstname,
        fullname: payload.fullname,
        lastname: payload.lastname,
        password_hash,
    };
    let matched = state
        .users
        .update(id, &changes)
        .await
        .map_err(|e| ApiError::store("Update failed", e))?;

    if matched == 0 {
        warn!(%id, "update matched no user");
        return Err(ApiError::NotFound);
    }

    info!(user_id = %id, password_changed = changes.password_hash.is_some(), "user updated");
    Ok(Json(MessageResponse {
        message: "User updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::store("Delete failed", e))?;

    if deleted == 0 {
        warn!(%id, "delete matched no user");
        return Err(ApiError::NotFound);
    }

    info!(user_id = %id, "user deleted");
    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}
