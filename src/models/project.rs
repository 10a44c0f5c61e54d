//! Project model.

use serde::{Deserialize, Serialize};

/// The viewing user's relationship to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Owner,
    Participant,
    #[serde(other)]
    Other,
}

/// A project visible to the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: String,
    /// Absent for self-owned projects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ProjectRole>,
}

impl Project {
    /// Role with the owner default applied.
    pub fn effective_role(&self) -> ProjectRole {
        self.role.unwrap_or(ProjectRole::Owner)
    }

    /// Whether the viewing user may expect owner-only operations to be accepted.
    ///
    /// Advisory only; the server decides.
    pub fn is_owned(&self) -> bool {
        self.effective_role() == ProjectRole::Owner
    }
}

/// Request body for `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
}

/// Partial update body for `PUT /project/{id}/info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateProjectRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
