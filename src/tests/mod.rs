//! Integration tests: the full client against an in-process fake service.


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use tempfile::TempDir;
use tokio::net::TcpListener;

use self::fake_server::{FakeState, SharedState};
use crate::auth::Navigator;
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{InvitationState, UpdateProjectRequest, UploadFile};
use crate::sync::{CacheKey, Decision, HandshakeOutcome};
use crate::DocshareClient;

#[derive(Default)]
struct RecordingNavigator {
    calls: AtomicUsize,
}

impl Navigator for RecordingNavigator {
    fn to_login(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl RecordingNavigator {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Test fixture with a running fake service and a connected client.
struct TestFixture {
    client: DocshareClient,
    state: SharedState,
    navigator: Arc<RecordingNavigator>,
    config: Config,
    temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut fake = FakeState::default();
        fake.add_user("alice", "alice@example.com", "secret", "abc");
        fake.add_user("bob", "bob@example.com", "hunter22", "bob-token");
        fake.add_user("carol", "carol@example.com", "carolpw", "carol-token");
        let state = Arc::new(Mutex::new(fake));

        let app = fake_server::router(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        let config = Config {
            api_url: format!("http://{}", addr),
            session_db_path: temp_dir.path().join("session.sqlite"),
            download_dir: temp_dir.path().join("downloads"),
            request_timeout: Duration::from_secs(5),
            log_level: "warn".to_string(),
            log_json: false,
        };

        let navigator = Arc::new(RecordingNavigator::default());
        let client = DocshareClient::connect(&config, navigator.clone())
            .await
            .expect("Failed to connect client");

        Self {
            client,
            state,
            navigator,
            config,
            temp_dir,
        }
    }

    /// A second client over the same session file, as after an application restart.
    async fn reopen(&self) -> DocshareClient {
        DocshareClient::connect(&self.config, self.navigator.clone())
            .await
            .expect("Failed to reconnect client")
    }

    async fn login_as(&self, login: &str, password: &str) {
        self.client
            .login(login, password)
            .await
            .expect("Login failed");
    }

    fn server(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn count(&self, method: &str, path: &str) -> usize {
        self.server().count(method, path)
    }

    fn authorization(&self, method: &str, path: &str) -> Option<String> {
        self.server()
            .last_request(method, path)
            .expect("request was not sent")
            .authorization
    }

    /// Seed a project owned by carol with a pending invitation for bob.
    fn seed_invitation(&self, token: &str, project_id: i64) {
        let mut server = self.server();
        let carol = server.user_by_login("carol").unwrap().id;
        server.insert_project(project_id, "Shared Plans", carol);
        server.add_invitation(
            token,
            project_id,
            "bob@example.com",
            Utc::now() + ChronoDuration::days(7),
        );
    }
}

// ==================== SESSION & AUTH ====================

#[tokio::test]
async fn test_login_populates_session_and_attaches_token() {
    let fixture = TestFixture::new().await;

    let session = fixture.client.login("alice", "secret").await.unwrap();

    assert_eq!(session.token(), Some("abc"));
    let user = session.user().unwrap();
    assert_eq!(user.login, "alice");
    assert_eq!(user.email, "alice@example.com");

    fixture.client.sync().projects().await.unwrap();

    assert_eq!(fixture.authorization("POST", "/login"), None);
    assert_eq!(
        fixture.authorization("GET", "/auth/me").as_deref(),
        Some("Bearer abc")
    );
    assert_eq!(
        fixture.authorization("GET", "/projects").as_deref(),
        Some("Bearer abc")
    );
}

#[tokio::test]
async fn test_bad_credentials_leave_session_empty() {
    let fixture = TestFixture::new().await;

    let err = fixture.client.login("alice", "wrong").await.unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(err.message(), "Incorrect login or password");
    assert!(!fixture.client.session().current().is_authenticated());
    assert!(fixture.client.require_session().is_err());
}

#[tokio::test]
async fn test_requests_without_session_carry_no_credentials() {
    let fixture = TestFixture::new().await;

    let err = fixture.client.sync().projects().await.unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(fixture.authorization("GET", "/projects"), None);
    assert_eq!(fixture.navigator.calls(), 1);
}

#[tokio::test]
async fn test_unauthorized_on_any_resource_clears_session() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let project = fixture
        .client
        .sync()
        .create_project("Roadmap", "")
        .await
        .unwrap();

    fixture.server().rotate_token("alice", "rotated");

    let err = fixture
        .client
        .sync()
        .documents(project.id)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)));
    assert!(fixture.client.session().current().token().is_none());
    assert!(fixture.client.session().current().user().is_none());
    assert_eq!(fixture.navigator.calls(), 1);

    // The cleared session is what gets restored next time
    let reopened = fixture.reopen().await;
    assert!(!reopened.session().current().is_authenticated());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;

    let reopened = fixture.reopen().await;

    let session = reopened.session().current();
    assert_eq!(session.token(), Some("abc"));
    assert_eq!(session.user().map(|u| u.login.as_str()), Some("alice"));
    assert!(reopened.sync().projects().await.is_ok());
    assert_eq!(fixture.count("POST", "/login"), 1);
}

#[tokio::test]
async fn test_logout_clears_session_and_cache() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    fixture.client.sync().projects().await.unwrap();

    fixture.client.logout().await;

    assert!(!fixture.client.session().current().is_authenticated());
    assert!(fixture.client.sync().cache().is_stale(&CacheKey::Projects));
    assert!(!fixture.reopen().await.session().current().is_authenticated());
    // Logging out is not a rejected session
    assert_eq!(fixture.navigator.calls(), 0);
}

#[tokio::test]
async fn test_sign_up_registers_and_logs_in() {
    let fixture = TestFixture::new().await;

    let user = fixture
        .client
        .sign_up("dave", "dave@example.com", "pw12345")
        .await
        .unwrap();

    assert_eq!(user.login, "dave");
    let session = fixture.client.session().current();
    assert_eq!(session.token(), Some("token-dave"));
    assert_eq!(session.user(), Some(&user));
}

#[tokio::test]
async fn test_duplicate_registration_is_validation_error() {
    let fixture = TestFixture::new().await;

    let err = fixture
        .client
        .sign_up("alice", "other@example.com", "pw")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(!fixture.client.session().current().is_authenticated());
}

#[tokio::test]
async fn test_refresh_profile() {
    let fixture = TestFixture::new().await;
    assert!(matches!(
        fixture.client.refresh_profile().await.unwrap_err(),
        ClientError::Auth(_)
    ));

    fixture.login_as("bob", "hunter22").await;
    let user = fixture.client.refresh_profile().await.unwrap();

    assert_eq!(user.login, "bob");
    assert_eq!(fixture.count("GET", "/auth/me"), 2);
}

#[tokio::test]
async fn test_switching_user_does_not_serve_previous_cache() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    fixture
        .client
        .sync()
        .create_project("Alice only", "")
        .await
        .unwrap();
    assert_eq!(fixture.client.sync().projects().await.unwrap().len(), 1);

    fixture.login_as("bob", "hunter22").await;
    let projects = fixture.client.sync().projects().await.unwrap();

    assert!(projects.is_empty());
    assert_eq!(fixture.count("GET", "/projects"), 2);
}

// ==================== PROJECTS ====================

#[tokio::test]
async fn test_create_project_invalidates_project_list() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();

    assert!(sync.projects().await.unwrap().is_empty());
    assert!(sync.projects().await.unwrap().is_empty());
    assert_eq!(fixture.count("GET", "/projects"), 1);

    let project = sync.create_project("Roadmap", "Q3 planning").await.unwrap();
    assert_eq!(project.name, "Roadmap");
    assert!(project.is_owned());
    assert!(sync.cache().is_stale(&CacheKey::Projects));

    let projects = sync.projects().await.unwrap();
    assert_eq!(fixture.count("GET", "/projects"), 2);
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, project.id);
    assert_eq!(projects[0].description.as_deref(), Some("Q3 planning"));
}

#[tokio::test]
async fn test_update_project_refreshes_details() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Draft", "").await.unwrap();

    assert_eq!(sync.project(project.id).await.unwrap().name, "Draft");

    let changes = UpdateProjectRequest {
        name: Some("Final".to_string()),
        description: None,
    };
    sync.update_project(project.id, &changes).await.unwrap();

    assert_eq!(sync.project(project.id).await.unwrap().name, "Final");
    assert_eq!(sync.projects().await.unwrap()[0].name, "Final");
}

#[tokio::test]
async fn test_failed_mutation_does_not_invalidate() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    sync.projects().await.unwrap();

    let err = sync.delete_project(999).await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(!sync.cache().is_stale(&CacheKey::Projects));
    sync.projects().await.unwrap();
    assert_eq!(fixture.count("GET", "/projects"), 1);
}

#[tokio::test]
async fn test_delete_requires_owner() {
    let fixture = TestFixture::new().await;
    fixture.seed_invitation("tok1", 7);
    fixture.login_as("bob", "hunter22").await;
    let sync = fixture.client.sync();
    sync.respond_to_invitation("tok1", 7, Decision::Accept)
        .await
        .unwrap();

    let err = sync.delete_project(7).await.unwrap_err();

    assert!(matches!(err, ClientError::Authorization(_)));
    let project = sync.project(7).await.unwrap();
    assert!(!project.is_owned());
}

#[tokio::test]
async fn test_owner_deletes_project() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Scratch", "").await.unwrap();
    assert_eq!(sync.projects().await.unwrap().len(), 1);

    sync.delete_project(project.id).await.unwrap();

    assert!(sync.projects().await.unwrap().is_empty());
    assert!(matches!(
        sync.project(project.id).await.unwrap_err(),
        ClientError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_invite_errors() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Team", "").await.unwrap();

    let err = sync.invite(project.id, "nobody").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    sync.invite(project.id, "bob").await.unwrap();
    let err = sync.invite(project.id, "bob").await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

#[tokio::test]
async fn test_invite_and_share_reach_invitee() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let team = sync.create_project("Team", "").await.unwrap();
    let press = sync.create_project("Press kit", "").await.unwrap();

    sync.invite(team.id, "bob").await.unwrap();
    sync.share_project(press.id, "bob@example.com").await.unwrap();

    fixture.login_as("bob", "hunter22").await;
    let invitations = fixture.client.sync().invitations().await.unwrap();
    let mut projects: Vec<i64> = invitations.iter().map(|i| i.project_id).collect();
    projects.sort();

    assert_eq!(projects, vec![team.id, press.id]);
    assert!(invitations
        .iter()
        .all(|i| i.state_at(Utc::now()) == InvitationState::Pending));
}

// ==================== INVITATION HANDSHAKE ====================

#[tokio::test]
async fn test_accept_invitation_moves_project_into_list() {
    let fixture = TestFixture::new().await;
    fixture.seed_invitation("tok1", 7);
    fixture.login_as("bob", "hunter22").await;
    let sync = fixture.client.sync();

    let pending = sync.invitations().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].token, "tok1");
    assert_eq!(pending[0].project_name, "Shared Plans");
    assert!(sync.projects().await.unwrap().is_empty());

    let outcome = sync.accept_invitation(&pending[0]).await.unwrap();
    assert_eq!(outcome, HandshakeOutcome::Resolved(InvitationState::Accepted));

    assert!(sync.invitations().await.unwrap().is_empty());
    let projects = sync.projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, 7);
    assert!(!projects[0].is_owned());
    assert_eq!(fixture.count("GET", "/invitations"), 2);
    assert_eq!(fixture.count("GET", "/projects"), 2);
}

#[tokio::test]
async fn test_decline_refreshes_projects_and_invitations() {
    let fixture = TestFixture::new().await;
    fixture.seed_invitation("tok1", 7);
    fixture.login_as("bob", "hunter22").await;
    let sync = fixture.client.sync();
    let pending = sync.invitations().await.unwrap();
    assert!(sync.projects().await.unwrap().is_empty());

    let outcome = sync.decline_invitation(&pending[0]).await.unwrap();

    assert_eq!(outcome, HandshakeOutcome::Resolved(InvitationState::Declined));
    assert!(sync.cache().is_stale(&CacheKey::Invitations));
    assert!(sync.cache().is_stale(&CacheKey::Projects));
    assert!(sync.invitations().await.unwrap().is_empty());

    // The service granted access regardless; the list follows the server
    let projects = sync.projects().await.unwrap();
    assert_eq!(fixture.count("GET", "/projects"), 2);
    assert_eq!(projects.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7]);
}

#[tokio::test]
async fn test_resolved_invitation_converges() {
    let fixture = TestFixture::new().await;
    fixture.seed_invitation("tok1", 7);
    fixture.login_as("bob", "hunter22").await;
    let sync = fixture.client.sync();
    let pending = sync.invitations().await.unwrap();

    // Resolved from another device
    fixture
        .client
        .api()
        .invitations()
        .respond("tok1", 7, true)
        .await
        .unwrap();
    assert!(matches!(
        fixture
            .client
            .api()
            .invitations()
            .respond("tok1", 7, true)
            .await
            .unwrap_err(),
        ClientError::Conflict(_)
    ));

    let outcome = sync.decline_invitation(&pending[0]).await.unwrap();

    assert_eq!(outcome, HandshakeOutcome::Converged);
    assert!(sync.invitations().await.unwrap().is_empty());
    assert_eq!(fixture.count("GET", "/invitations"), 2);
}

#[tokio::test]
async fn test_expired_invitation_is_reported() {
    let fixture = TestFixture::new().await;
    {
        let mut server = fixture.server();
        let carol = server.user_by_login("carol").unwrap().id;
        server.insert_project(9, "Old", carol);
        server.add_invitation(
            "stale",
            9,
            "bob@example.com",
            Utc::now() - ChronoDuration::hours(1),
        );
    }
    fixture.login_as("bob", "hunter22").await;
    let sync = fixture.client.sync();
    sync.invitations().await.unwrap();

    let err = sync
        .respond_to_invitation("stale", 9, Decision::Accept)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Expired(_)));
    assert_eq!(err.message(), "This invitation has expired");
    assert!(!sync.cache().is_stale(&CacheKey::Invitations));
    assert!(sync.projects().await.unwrap().is_empty());
}

// ==================== DOCUMENTS ====================

#[tokio::test]
async fn test_upload_invalidates_only_that_projects_documents() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let first = sync.create_project("First", "").await.unwrap();
    let second = sync.create_project("Second", "").await.unwrap();
    sync.projects().await.unwrap();
    assert!(sync.documents(first.id).await.unwrap().is_empty());
    assert!(sync.documents(second.id).await.unwrap().is_empty());

    let uploaded = sync
        .upload_documents(
            first.id,
            vec![
                UploadFile::new("a.txt", "text/plain", b"alpha".to_vec()),
                UploadFile::new("b.pdf", "application/pdf", b"%PDF-1.4".to_vec()),
            ],
        )
        .await
        .unwrap();

    assert_eq!(uploaded.len(), 2);
    assert!(sync.cache().is_stale(&CacheKey::Documents(first.id)));
    assert!(!sync.cache().is_stale(&CacheKey::Documents(second.id)));
    assert!(!sync.cache().is_stale(&CacheKey::Projects));

    let documents = sync.documents(first.id).await.unwrap();
    let mut names: Vec<&str> = documents.iter().map(|d| d.filename.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["a.txt", "b.pdf"]);
    assert_eq!(documents[0].size, Some(5));
    assert!(documents[0].storage_key.is_some());
}

#[tokio::test]
async fn test_rejected_upload_is_payload_error() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Uploads", "").await.unwrap();
    sync.documents(project.id).await.unwrap();

    let err = sync
        .upload_documents(
            project.id,
            vec![UploadFile::new("setup.exe", "application/octet-stream", vec![0u8; 4])],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Payload(_)));
    assert!(!sync.cache().is_stale(&CacheKey::Documents(project.id)));

    let err = sync.upload_documents(project.id, Vec::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Payload(_)));
}

#[tokio::test]
async fn test_download_saves_file() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Docs", "").await.unwrap();
    let uploaded = sync
        .upload_documents(
            project.id,
            vec![UploadFile::new("notes.txt", "text/plain", b"meeting notes".to_vec())],
        )
        .await
        .unwrap();
    let doc_id = uploaded[0].id;
    let dir = fixture.temp_dir.path().join("downloads");

    let path = sync.download_document(doc_id, None, &dir).await.unwrap();
    assert_eq!(path, dir.join("notes.txt"));
    assert_eq!(std::fs::read(&path).unwrap(), b"meeting notes");

    let renamed = sync
        .download_document(doc_id, Some("copy.txt"), &dir)
        .await
        .unwrap();
    assert_eq!(renamed, dir.join("copy.txt"));
    assert_eq!(std::fs::read(&renamed).unwrap(), b"meeting notes");
}

#[tokio::test]
async fn test_replace_and_delete_document() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Docs", "").await.unwrap();
    let doc = sync
        .upload_documents(
            project.id,
            vec![UploadFile::new("v1.txt", "text/plain", b"one".to_vec())],
        )
        .await
        .unwrap()
        .remove(0);
    sync.documents(project.id).await.unwrap();

    let replaced = sync
        .replace_document(
            project.id,
            doc.id,
            UploadFile::new("v2.txt", "text/plain", b"two!".to_vec()),
        )
        .await
        .unwrap();
    assert_eq!(replaced.id, doc.id);
    assert_eq!(replaced.filename, "v2.txt");
    assert_eq!(sync.documents(project.id).await.unwrap()[0].filename, "v2.txt");

    sync.delete_document(project.id, doc.id).await.unwrap();
    assert!(sync.documents(project.id).await.unwrap().is_empty());
    assert_eq!(fixture.count("GET", &format!("/project/{}/documents", project.id)), 3);
}

#[tokio::test]
async fn test_concurrent_reads() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Parallel", "").await.unwrap();

    let (projects, details, documents) = tokio::join!(
        sync.projects(),
        sync.project(project.id),
        sync.documents(project.id)
    );

    assert_eq!(projects.unwrap().len(), 1);
    assert_eq!(details.unwrap().id, project.id);
    assert!(documents.unwrap().is_empty());
    assert!(!sync.cache().is_stale(&CacheKey::Project(project.id)));
}

#[tokio::test]
async fn test_answering_with_existing_access_converges() {
    let fixture = TestFixture::new().await;
    fixture.seed_invitation("tok1", 7);
    {
        let mut server = fixture.server();
        let bob = server.user_by_login("bob").unwrap().id;
        server.access.push((7, bob, "participant".to_string()));
    }
    fixture.login_as("bob", "hunter22").await;
    let sync = fixture.client.sync();
    let pending = sync.invitations().await.unwrap();
    sync.projects().await.unwrap();

    let outcome = sync.accept_invitation(&pending[0]).await.unwrap();

    assert_eq!(outcome, HandshakeOutcome::Converged);
    assert!(sync.cache().is_stale(&CacheKey::Projects));
    assert!(sync.cache().is_stale(&CacheKey::Invitations));
    assert_eq!(sync.projects().await.unwrap()[0].id, 7);
}

// ==================== CONCURRENCY ====================

#[tokio::test]
async fn test_logout_does_not_retract_in_flight_credential() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let gate = Arc::new(tokio::sync::Notify::new());
    fixture.server().projects_gate = Some(gate.clone());

    let sync = fixture.client.sync().clone();
    let in_flight = tokio::spawn(async move { sync.projects().await });

    while fixture.count("GET", "/projects") == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    fixture.client.logout().await;
    gate.notify_one();

    let projects = in_flight.await.unwrap().unwrap();
    assert!(projects.is_empty());
    assert_eq!(
        fixture.authorization("GET", "/projects").as_deref(),
        Some("Bearer abc")
    );
    assert!(!fixture.client.session().current().is_authenticated());

    // Requests issued after the logout go out bare
    fixture.server().projects_gate = None;
    let err = fixture.client.sync().projects().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
    assert_eq!(fixture.authorization("GET", "/projects"), None);
}

#[tokio::test]
async fn test_duplicate_mutations_are_not_deduplicated() {
    let fixture = TestFixture::new().await;
    fixture.login_as("alice", "secret").await;
    let sync = fixture.client.sync();
    let project = sync.create_project("Twice", "").await.unwrap();
    let doc = sync
        .upload_documents(
            project.id,
            vec![UploadFile::new("gone.txt", "text/plain", b"bye".to_vec())],
        )
        .await
        .unwrap()
        .remove(0);

    let (first, second) = tokio::join!(
        sync.delete_document(project.id, doc.id),
        sync.delete_document(project.id, doc.id)
    );

    assert_eq!(fixture.count("DELETE", &format!("/document/{}", doc.id)), 2);
    assert!(first.is_ok() || second.is_ok());
    assert!(sync.documents(project.id).await.unwrap().is_empty());
}
