//! Resource clients.
//!
//! One typed request builder per server resource family. Each operation is a single
//! request/response mapping: no retries, no caching.

mod auth;
mod documents;
mod invitations;
mod projects;

pub use auth::*;
pub use documents::*;
pub use invitations::*;
pub use projects::*;

use std::sync::Arc;

use crate::auth::AuthGateway;

/// All resource clients over one gateway.
#[derive(Clone)]
pub struct Api {
    auth: AuthApi,
    projects: ProjectsApi,
    documents: DocumentsApi,
    invitations: InvitationsApi,
}

impl Api {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self {
            auth: AuthApi::new(gateway.clone()),
            projects: ProjectsApi::new(gateway.clone()),
            documents: DocumentsApi::new(gateway.clone()),
            invitations: InvitationsApi::new(gateway),
        }
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn projects(&self) -> &ProjectsApi {
        &self.projects
    }

    pub fn documents(&self) -> &DocumentsApi {
        &self.documents
    }

    pub fn invitations(&self) -> &InvitationsApi {
        &self.invitations
    }
}
