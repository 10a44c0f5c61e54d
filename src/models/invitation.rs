//! Pending invitation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::parse_timestamp;

/// Lifecycle of an invitation from the invitee's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvitationState {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl InvitationState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, InvitationState::Pending)
    }
}

/// An offer of project membership addressed to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub token: String,
    pub project_id: i64,
    pub project_name: String,
    pub expires_at: String,
}

impl Invitation {
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.expires_at)
    }

    /// Display state at `now`. Expiry is advisory; an unparseable timestamp counts as
    /// still pending and the server has the last word on acceptance.
    pub fn state_at(&self, now: DateTime<Utc>) -> InvitationState {
        match self.expires_at_utc() {
            Some(expires) if expires <= now => InvitationState::Expired,
            _ => InvitationState::Pending,
        }
    }
}
