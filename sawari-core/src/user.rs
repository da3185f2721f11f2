use serde::{Deserialize, Serialize};

/// Account role. Determines which screens a session may reach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Driver,
}

/// A registered account, as returned by the login endpoint.
///
/// Ids are backend-issued hex strings under `_id` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
}

impl User {
    pub fn is_driver(&self) -> bool {
        self.role == Role::Driver
    }
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Login response data: the account plus its bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub user: User,
    pub token: String,
}

/// Successful login outcome surfaced to the caller.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub message: String,
    pub user: User,
    pub token: String,
}
