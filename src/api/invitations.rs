//! Invitations resource: `/invitations`, `/join`.

use std::sync::Arc;

use crate::auth::AuthGateway;
use crate::errors::ClientError;
use crate::models::Invitation;

#[derive(Clone)]
pub struct InvitationsApi {
    gateway: Arc<AuthGateway>,
}

impl InvitationsApi {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// GET /invitations - Pending invitations addressed to the current user.
    pub async fn list_pending(&self) -> Result<Vec<Invitation>, ClientError> {
        let request = self.gateway.transport().get("/invitations")?;
        self.gateway.send_json(request).await
    }

    /// POST /join?token={t}&project_id={id}&accept={bool} - Resolve one invitation.
    ///
    /// Accept and decline share the endpoint; the `accept` flag tells them apart for
    /// servers that distinguish the two.
    ///
    /// The service reports a used token, an expired token and existing access all as a
    /// plain 400; those surface as `Conflict`, `Expired` and `Conflict`.
    pub async fn respond(&self, token: &str, project_id: i64, accept: bool) -> Result<(), ClientError> {
        let request = self.gateway.transport().post("/join")?.query(&[
            ("token", token.to_string()),
            ("project_id", project_id.to_string()),
            ("accept", accept.to_string()),
        ]);
        self.gateway.send_empty(request).await.map_err(classify_join_error)
    }
}

fn classify_join_error(err: ClientError) -> ClientError {
    let ClientError::Validation(message) = err else {
        return err;
    };
    let lower = message.to_ascii_lowercase();
    if lower.contains("expired") {
        ClientError::Expired(message)
    } else if lower.contains("already been used") || lower.contains("already have access") {
        ClientError::Conflict(message)
    } else {
        ClientError::Validation(message)
    }
}
