use serde::Serialize;
use sqlx::FromRow;

/// User row as exposed by reads. The password column is never selected into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub fullname: Option<String>,
    pub lastname: String,
}

/// Insert payload; `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub fullname: Option<String>,
    pub lastname: String,
    pub password_hash: String,
}

/// Partial update. `None` keeps the stored column value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub firstname: Option<String>,
    pub fullname: Option<String>,
    pub lastname: Option<String>,
    pub password_hash: Option<String>,
}
