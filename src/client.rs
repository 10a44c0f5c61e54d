//! Top-level client wiring transport, session, gateway, resource clients and cache.

use std::sync::Arc;

use crate::api::Api;
use crate::auth::{AuthGateway, Navigator};
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::User;
use crate::session::{Session, SessionPersistence, SessionStore, SqliteSessionStorage};
use crate::sync::SyncClient;
use crate::transport::Transport;

/// Entry point for views.
#[derive(Clone)]
pub struct DocshareClient {
    session: Arc<SessionStore>,
    api: Api,
    sync: SyncClient,
}

impl DocshareClient {
    /// Build a client whose session lives in the SQLite file named by `config`.
    pub async fn connect(config: &Config, navigator: Arc<dyn Navigator>) -> Result<Self, ClientError> {
        let storage = SqliteSessionStorage::open(&config.session_db_path).await?;
        Self::with_persistence(config, Arc::new(storage), navigator).await
    }

    /// Build a client over any session persistence backend.
    pub async fn with_persistence(
        config: &Config,
        persistence: Arc<dyn SessionPersistence>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let transport = Transport::new(&config.api_url, config.request_timeout)?;
        let session = Arc::new(SessionStore::restore(persistence).await);
        let gateway = Arc::new(AuthGateway::new(transport, session.clone(), navigator));
        let api = Api::new(gateway);
        let sync = SyncClient::new(api.clone(), session.clone());

        Ok(Self { session, api, sync })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn sync(&self) -> &SyncClient {
        &self.sync
    }

    /// Log in and populate the session.
    ///
    /// The token is stored first with no profile, then the profile is fetched and the
    /// session replaced with both. If only the profile fetch fails, the token-only
    /// session is kept.
    pub async fn login(&self, login: &str, password: &str) -> Result<Session, ClientError> {
        let token = self.api.auth().login(login, password).await?;
        tracing::info!("Logged in as {}", login);
        self.session.set_auth(token.access_token.clone(), None).await;

        match self.api.auth().current_user().await {
            Ok(user) => self.session.set_auth(token.access_token, Some(user)).await,
            // The gateway has already cleared the session
            Err(e @ ClientError::Auth(_)) => return Err(e),
            Err(e) => tracing::warn!("Logged in but could not load profile: {}", e),
        }

        Ok(self.session.current())
    }

    /// Register, then log in with the same credentials.
    pub async fn sign_up(&self, login: &str, email: &str, password: &str) -> Result<User, ClientError> {
        let user = self.api.auth().register(login, email, password).await?;
        tracing::info!("Registered user {}", user.login);
        self.login(login, password).await?;
        Ok(user)
    }

    /// Refetch the profile of the session's user.
    pub async fn refresh_profile(&self) -> Result<User, ClientError> {
        let token = self.require_session()?;
        let user = self.api.auth().current_user().await?;
        // Another task may have logged out meanwhile
        if self.session.token().as_deref() == Some(token.as_str()) {
            self.session.set_auth(token, Some(user.clone())).await;
        }
        Ok(user)
    }

    /// Clear the session and every cached collection.
    pub async fn logout(&self) {
        self.session.clear().await;
        self.sync.cache().clear();
        tracing::info!("Logged out");
    }

    /// Token of the current session, or an auth error when logged out.
    pub fn require_session(&self) -> Result<String, ClientError> {
        self.session
            .token()
            .ok_or_else(|| ClientError::Auth("Not logged in".to_string()))
    }
}
