//! Invitation handshake.
//!
//! `PENDING -> {ACCEPTED, DECLINED}` by a call to `/join`; `EXPIRED` is only ever derived
//! from `expires_at` for display. A conflict from the server means another response got
//! there first, and counts as having reached the terminal state.

use super::{Mutation, SyncClient};
use crate::errors::ClientError;
use crate::models::{Invitation, InvitationState};

/// The invitee's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
}

impl Decision {
    pub fn accepts(self) -> bool {
        matches!(self, Decision::Accept)
    }

    /// Terminal state this decision moves a pending invitation to.
    pub fn target_state(self) -> InvitationState {
        match self {
            Decision::Accept => InvitationState::Accepted,
            Decision::Decline => InvitationState::Declined,
        }
    }

    fn mutation(self, project_id: i64) -> Mutation {
        match self {
            Decision::Accept => Mutation::AcceptInvitation { project_id },
            Decision::Decline => Mutation::DeclineInvitation { project_id },
        }
    }
}

/// How a handshake ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// This call resolved the invitation.
    Resolved(InvitationState),
    /// The invitation had already been resolved elsewhere; which way is only known
    /// from the next list refresh.
    Converged,
}

impl HandshakeOutcome {
    /// Terminal state reached by this call, when it was the one resolving.
    pub fn state(self) -> Option<InvitationState> {
        match self {
            HandshakeOutcome::Resolved(state) => Some(state),
            HandshakeOutcome::Converged => None,
        }
    }
}

impl SyncClient {
    pub async fn accept_invitation(&self, invitation: &Invitation) -> Result<HandshakeOutcome, ClientError> {
        self.respond_to_invitation(&invitation.token, invitation.project_id, Decision::Accept)
            .await
    }

    pub async fn decline_invitation(&self, invitation: &Invitation) -> Result<HandshakeOutcome, ClientError> {
        self.respond_to_invitation(&invitation.token, invitation.project_id, Decision::Decline)
            .await
    }

    /// Resolve a pending invitation.
    ///
    /// Local expiry is not checked; the server decides and reports `Expired` itself.
    pub async fn respond_to_invitation(
        &self,
        token: &str,
        project_id: i64,
        decision: Decision,
    ) -> Result<HandshakeOutcome, ClientError> {
        let result = self
            .api()
            .invitations()
            .respond(token, project_id, decision.accepts())
            .await;

        let outcome = match result {
            Ok(()) => HandshakeOutcome::Resolved(decision.target_state()),
            Err(ClientError::Conflict(message)) => {
                tracing::info!(
                    "Invitation for project {} already resolved: {}",
                    project_id,
                    message
                );
                HandshakeOutcome::Converged
            }
            Err(e) => return Err(e),
        };

        self.cache().invalidate(&decision.mutation(project_id).invalidates());
        Ok(outcome)
    }
}
