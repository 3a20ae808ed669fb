use serde::{Deserialize, Serialize};

/// Request body for `POST /users`. Presence is checked in the handler so the
/// caller gets a field-specific 400 instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for `PUT /users/:id`. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Echo of the created record, never the hash.
#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub id: i64,
    pub firstname: String,
    pub fullname: Option<String>,
    pub lastname: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
