//! User model and the authentication request/response bodies.

use serde::{Deserialize, Serialize};

/// A registered user, as returned by `/auth` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub email: String,
}

/// Form body for `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Request body for `POST /auth`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub login: String,
    pub email: String,
    pub password: String,
    pub repeat_password: String,
}

impl RegisterRequest {
    pub fn new(login: &str, email: &str, password: &str) -> Self {
        Self {
            login: login.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            repeat_password: password.to_string(),
        }
    }
}

/// Response of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
