//! Projects resource: `/projects`, `/project/{id}/...`.

use std::sync::Arc;

use crate::auth::AuthGateway;
use crate::errors::ClientError;
use crate::models::{CreateProjectRequest, Project, UpdateProjectRequest};

#[derive(Clone)]
pub struct ProjectsApi {
    gateway: Arc<AuthGateway>,
}

impl ProjectsApi {
    pub fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// GET /projects - Projects visible to the current user.
    pub async fn list(&self) -> Result<Vec<Project>, ClientError> {
        let request = self.gateway.transport().get("/projects")?;
        self.gateway.send_json(request).await
    }

    /// GET /project/{id}/info - A single project.
    pub async fn get(&self, id: i64) -> Result<Project, ClientError> {
        let request = self.gateway.transport().get(&format!("/project/{}/info", id))?;
        self.gateway.send_json(request).await
    }

    /// POST /projects - Create a project owned by the current user.
    pub async fn create(&self, name: &str, description: &str) -> Result<Project, ClientError> {
        let request = self
            .gateway
            .transport()
            .post("/projects")?
            .json(&CreateProjectRequest {
                name: name.to_string(),
                description: description.to_string(),
            });
        self.gateway.send_json(request).await
    }

    /// PUT /project/{id}/info - Partially update a project.
    pub async fn update(&self, id: i64, changes: &UpdateProjectRequest) -> Result<Project, ClientError> {
        let request = self
            .gateway
            .transport()
            .put(&format!("/project/{}/info", id))?
            .json(changes);
        self.gateway.send_json(request).await
    }

    /// DELETE /project/{id} - Delete a project; the server requires the owner role.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let request = self.gateway.transport().delete(&format!("/project/{}", id))?;
        self.gateway.send_empty(request).await
    }

    /// POST /project/{id}/invite?user={login} - Invite a registered user.
    ///
    /// A plain 400 from this endpoint means the user already has access or an
    /// invitation, and is surfaced as a conflict.
    pub async fn invite(&self, project_id: i64, login: &str) -> Result<(), ClientError> {
        let request = self
            .gateway
            .transport()
            .post(&format!("/project/{}/invite", project_id))?
            .query(&[("user", login)]);
        self.gateway
            .send_empty(request)
            .await
            .map_err(|e| e.refine_validation(ClientError::Conflict))
    }

    /// GET /project/{id}/share?with_email={email} - Send an emailed invitation.
    pub async fn share(&self, project_id: i64, email: &str) -> Result<(), ClientError> {
        let request = self
            .gateway
            .transport()
            .get(&format!("/project/{}/share", project_id))?
            .query(&[("with_email", email)]);
        self.gateway.send_empty(request).await
    }
}
