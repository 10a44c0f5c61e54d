//! Auth resource: `/login`, `/auth`, `/auth/me`.

use std::sync::Arc;

use crate::auth::AuthGateway;
use crate::errors::ClientError;
use crate::models::{LoginForm, RegisterRequest, TokenResponse, User};

#[derive(Clone)]
pub struct AuthApi {
    gateway: Arc<AuthGateway>,
}

impl AuthApi {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// POST /login - Exchange credentials for a bearer token.
    pub async fn login(&self, login: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let request = self.gateway.transport().post("/login")?.form(&LoginForm {
            username: login,
            password,
        });
        self.gateway.send_json(request).await
    }

    /// POST /auth - Register a new user.
    pub async fn register(&self, login: &str, email: &str, password: &str) -> Result<User, ClientError> {
        let request = self
            .gateway
            .transport()
            .post("/auth")?
            .json(&RegisterRequest::new(login, email, password));
        self.gateway.send_json(request).await
    }

    /// GET /auth/me - Profile of the session's user.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let request = self.gateway.transport().get("/auth/me")?;
        self.gateway.send_json(request).await
    }
}
