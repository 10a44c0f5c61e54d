//! Declared invalidation table.
//!
//! Every mutation names, up front, the cache keys its success makes stale.

use super::cache::CacheKey;

/// A server-side state change issued through the sync layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateProject,
    UpdateProject { project_id: i64 },
    DeleteProject { project_id: i64 },
    InviteToProject { project_id: i64 },
    ShareProject { project_id: i64 },
    UploadDocuments { project_id: i64 },
    ReplaceDocument { project_id: i64 },
    DeleteDocument { project_id: i64 },
    AcceptInvitation { project_id: i64 },
    DeclineInvitation { project_id: i64 },
}

impl Mutation {
    /// Keys made stale by a successful run of this mutation.
    pub fn invalidates(&self) -> Vec<CacheKey> {
        match *self {
            Mutation::CreateProject => vec![CacheKey::Projects],
            Mutation::UpdateProject { project_id } => {
                vec![CacheKey::Projects, CacheKey::Project(project_id)]
            }
            Mutation::DeleteProject { project_id } => vec![
                CacheKey::Projects,
                CacheKey::Project(project_id),
                CacheKey::Documents(project_id),
            ],
            // Server-side only; the invitee's list lives in another session
            Mutation::InviteToProject { .. } | Mutation::ShareProject { .. } => vec![],
            Mutation::UploadDocuments { project_id }
            | Mutation::ReplaceDocument { project_id }
            | Mutation::DeleteDocument { project_id } => vec![CacheKey::Documents(project_id)],
            // The service grants access on either answer
            Mutation::AcceptInvitation { .. } | Mutation::DeclineInvitation { .. } => {
                vec![CacheKey::Projects, CacheKey::Invitations]
            }
        }
    }
}
