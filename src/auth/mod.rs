//! Auth Gateway.
//!
//! Wraps the [`Transport`] with the two request interceptors: the outbound one attaches
//! the session's bearer token, the inbound one turns any 401 into a global logout.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::{error_message, ClientError};
use crate::session::SessionStore;
use crate::transport::Transport;

/// Moves the application to its unauthenticated entry view.
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}

/// Navigator for contexts without views.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn to_login(&self) {}
}

/// Policy applied to every 401: the session is invalid, whatever resource was asked for.
pub async fn on_unauthorized(session: &SessionStore, navigator: &dyn Navigator) {
    tracing::warn!("401 Unauthorized - clearing session and redirecting to login");
    session.clear().await;
    navigator.to_login();
}

/// Credentialed access to the service.
pub struct AuthGateway {
    transport: Transport,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthGateway {
    pub fn new(transport: Transport, session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Attach the bearer token held right now, if any.
    ///
    /// The token is read once here; a logout after this point does not affect the
    /// request being built.
    pub fn authorize(&self, request: RequestBuilder) -> (RequestBuilder, bool) {
        match self.session.token() {
            Some(token) => (request.bearer_auth(token), true),
            None => (request, false),
        }
    }

    /// Dispatch a request and apply the inbound policy.
    ///
    /// Returns the response only for success statuses. A 401 clears the session and
    /// navigates to login before the error is returned.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let (request, with_token) = self.authorize(request);
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(
            "API Request: {} {} {}",
            method,
            url.path(),
            if with_token { "with token" } else { "no token" }
        );

        let response = self.transport.http().execute(request).await?;
        let status = response.status();
        tracing::debug!("API Response: {} {} - {}", method, url.path(), status.as_u16());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::debug!("API Error: {} {} - {}: {}", method, url.path(), status.as_u16(), message);

        if status == StatusCode::UNAUTHORIZED {
            on_unauthorized(&self.session, self.navigator.as_ref()).await;
        }

        Err(ClientError::from_status(status, message))
    }

    /// Dispatch and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Dispatch and discard the body.
    pub async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await?;
        Ok(())
    }
}
