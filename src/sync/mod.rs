//! Synchronization Layer.
//!
//! Reads go through the [`QueryCache`]; mutations go straight to the resource clients
//! and, on success only, invalidate the keys their [`Mutation`] declares. Nothing is
//! merged locally: the next read after a mutation refetches.

mod cache;
mod handshake;
mod mutation;

pub use cache::*;
pub use handshake::*;
pub use mutation::*;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::Api;
use crate::errors::ClientError;
use crate::models::{Document, Invitation, Project, UpdateProjectRequest, UploadFile};
use crate::session::SessionStore;

/// Cache-coordinated access to projects, documents and invitations.
#[derive(Clone)]
pub struct SyncClient {
    api: Api,
    session: Arc<SessionStore>,
    cache: Arc<QueryCache>,
}

impl SyncClient {
    pub fn new(api: Api, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    // ==================== READS ====================

    /// Projects visible to the current user.
    pub async fn projects(&self) -> Result<Vec<Project>, ClientError> {
        self.read_through(
            CacheKey::Projects,
            self.api.projects().list(),
            CachedValue::Projects,
            |value| match value {
                CachedValue::Projects(projects) => Some(projects),
                _ => None,
            },
        )
        .await
    }

    /// One project's details.
    pub async fn project(&self, project_id: i64) -> Result<Project, ClientError> {
        self.read_through(
            CacheKey::Project(project_id),
            self.api.projects().get(project_id),
            CachedValue::Project,
            |value| match value {
                CachedValue::Project(project) => Some(project),
                _ => None,
            },
        )
        .await
    }

    /// Documents of one project.
    pub async fn documents(&self, project_id: i64) -> Result<Vec<Document>, ClientError> {
        self.read_through(
            CacheKey::Documents(project_id),
            self.api.documents().list_by_project(project_id),
            CachedValue::Documents,
            |value| match value {
                CachedValue::Documents(documents) => Some(documents),
                _ => None,
            },
        )
        .await
    }

    /// Pending invitations of the current user.
    pub async fn invitations(&self) -> Result<Vec<Invitation>, ClientError> {
        self.read_through(
            CacheKey::Invitations,
            self.api.invitations().list_pending(),
            CachedValue::Invitations,
            |value| match value {
                CachedValue::Invitations(invitations) => Some(invitations),
                _ => None,
            },
        )
        .await
    }

    // ==================== MUTATIONS ====================

    pub async fn create_project(&self, name: &str, description: &str) -> Result<Project, ClientError> {
        self.mutate(Mutation::CreateProject, self.api.projects().create(name, description))
            .await
    }

    pub async fn update_project(
        &self,
        project_id: i64,
        changes: &UpdateProjectRequest,
    ) -> Result<Project, ClientError> {
        self.mutate(
            Mutation::UpdateProject { project_id },
            self.api.projects().update(project_id, changes),
        )
        .await
    }

    pub async fn delete_project(&self, project_id: i64) -> Result<(), ClientError> {
        self.mutate(
            Mutation::DeleteProject { project_id },
            self.api.projects().delete(project_id),
        )
        .await
    }

    pub async fn invite(&self, project_id: i64, login: &str) -> Result<(), ClientError> {
        self.mutate(
            Mutation::InviteToProject { project_id },
            self.api.projects().invite(project_id, login),
        )
        .await
    }

    pub async fn share_project(&self, project_id: i64, email: &str) -> Result<(), ClientError> {
        self.mutate(
            Mutation::ShareProject { project_id },
            self.api.projects().share(project_id, email),
        )
        .await
    }

    pub async fn upload_documents(
        &self,
        project_id: i64,
        files: Vec<UploadFile>,
    ) -> Result<Vec<Document>, ClientError> {
        self.mutate(
            Mutation::UploadDocuments { project_id },
            self.api.documents().upload(project_id, files),
        )
        .await
    }

    pub async fn replace_document(
        &self,
        project_id: i64,
        document_id: i64,
        file: UploadFile,
    ) -> Result<Document, ClientError> {
        self.mutate(
            Mutation::ReplaceDocument { project_id },
            self.api.documents().replace(document_id, file),
        )
        .await
    }

    pub async fn delete_document(&self, project_id: i64, document_id: i64) -> Result<(), ClientError> {
        self.mutate(
            Mutation::DeleteDocument { project_id },
            self.api.documents().delete(document_id),
        )
        .await
    }

    /// Save a document locally. Not a mutation and not cached.
    pub async fn download_document(
        &self,
        document_id: i64,
        filename: Option<&str>,
        dest_dir: &Path,
    ) -> Result<PathBuf, ClientError> {
        self.api.documents().download(document_id, filename, dest_dir).await
    }

    // ==================== PLUMBING ====================

    async fn read_through<T, Fut>(
        &self,
        key: CacheKey,
        fetch: Fut,
        pack: fn(T) -> CachedValue,
        unpack: fn(CachedValue) -> Option<T>,
    ) -> Result<T, ClientError>
    where
        T: Clone,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let version = self.session.version();
        if let Some(value) = self.cache.fresh(&key, version).and_then(unpack) {
            tracing::debug!("Cache hit for {}", key);
            return Ok(value);
        }

        tracing::debug!("Cache miss for {}", key);
        let ticket = self.cache.begin_fetch();
        let value = fetch.await?;
        self.cache.complete_fetch(key, ticket, version, pack(value.clone()));
        Ok(value)
    }

    async fn mutate<T, Fut>(&self, mutation: Mutation, call: Fut) -> Result<T, ClientError>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let result = call.await?;
        self.cache.invalidate(&mutation.invalidates());
        Ok(result)
    }
}
