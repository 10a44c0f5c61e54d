//! DocShare command line client.
//!
//! A terminal front end over the session and synchronization core. The session is kept in
//! a local SQLite file, so a login persists across invocations until logout or a 401.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docshare_client::models::{InvitationState, UpdateProjectRequest, UploadFile};
use docshare_client::{ClientError, Config, Decision, DocshareClient, HandshakeOutcome, Navigator};

#[derive(Parser)]
#[command(name = "docshare", about = "Share projects and documents with DocShare")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and remember the session
    Login { login: String, password: String },
    /// Create an account and log in
    Register {
        login: String,
        email: String,
        password: String,
    },
    /// Forget the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectCommand),
    /// Manage a project's documents
    #[command(subcommand)]
    Documents(DocumentCommand),
    /// Answer invitations
    #[command(subcommand)]
    Invitations(InvitationCommand),
}

#[derive(Subcommand)]
enum ProjectCommand {
    List,
    Show {
        id: i64,
    },
    Create {
        name: String,
        #[arg(default_value = "")]
        description: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
    /// Invite a registered user by login
    Invite {
        id: i64,
        login: String,
    },
    /// Invite someone by email
    Share {
        id: i64,
        email: String,
    },
}

#[derive(Subcommand)]
enum DocumentCommand {
    List {
        project_id: i64,
    },
    Upload {
        project_id: i64,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    Download {
        document_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    Replace {
        project_id: i64,
        document_id: i64,
        file: PathBuf,
    },
    Delete {
        project_id: i64,
        document_id: i64,
    },
}

#[derive(Subcommand)]
enum InvitationCommand {
    List,
    Accept { token: String, project_id: i64 },
    Decline { token: String, project_id: i64 },
}

/// Sends the user back to `docshare login` after the session is rejected.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn to_login(&self) {
        eprintln!("Your session is no longer valid. Run `docshare login` to sign in again.");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Service: {}", config.api_url);
    tracing::debug!("Session database: {:?}", config.session_db_path);

    let client = DocshareClient::connect(&config, Arc::new(TerminalNavigator)).await?;

    if let Err(e) = run(&client, &config, cli.command).await {
        eprintln!("{}", e.message());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(client: &DocshareClient, config: &Config, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Login { login, password } => {
            let session = client.login(&login, &password).await?;
            match session.user() {
                Some(user) => println!("Logged in as {} <{}>", user.login, user.email),
                None => println!("Logged in as {}", login),
            }
        }
        Command::Register {
            login,
            email,
            password,
        } => {
            let user = client.sign_up(&login, &email, &password).await?;
            println!("Registered and logged in as {} (id {})", user.login, user.id);
        }
        Command::Logout => {
            client.logout().await;
            println!("Logged out");
        }
        Command::Whoami => {
            let user = client.refresh_profile().await?;
            println!("{} <{}> (id {})", user.login, user.email, user.id);
        }
        Command::Projects(command) => {
            client.require_session()?;
            run_projects(client, command).await?;
        }
        Command::Documents(command) => {
            client.require_session()?;
            run_documents(client, config, command).await?;
        }
        Command::Invitations(command) => {
            client.require_session()?;
            run_invitations(client, command).await?;
        }
    }
    Ok(())
}

async fn run_projects(client: &DocshareClient, command: ProjectCommand) -> Result<(), ClientError> {
    let sync = client.sync();
    match command {
        ProjectCommand::List => {
            for project in sync.projects().await? {
                println!(
                    "{:>5}  {:<30}  {:?}",
                    project.id,
                    project.name,
                    project.effective_role()
                );
            }
        }
        ProjectCommand::Show { id } => {
            let project = sync.project(id).await?;
            println!("{} (id {})", project.name, project.id);
            if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
                println!("{}", description);
            }
            println!("Created {} by user {}", project.created_at, project.owner_id);
        }
        ProjectCommand::Create { name, description } => {
            let project = sync.create_project(&name, &description).await?;
            println!("Created project {} (id {})", project.name, project.id);
        }
        ProjectCommand::Update {
            id,
            name,
            description,
        } => {
            let changes = UpdateProjectRequest { name, description };
            if changes.is_empty() {
                return Err(ClientError::Validation(
                    "Nothing to update; pass --name or --description".to_string(),
                ));
            }
            let project = sync.update_project(id, &changes).await?;
            println!("Updated project {} (id {})", project.name, project.id);
        }
        ProjectCommand::Delete { id } => {
            sync.delete_project(id).await?;
            println!("Deleted project {}", id);
        }
        ProjectCommand::Invite { id, login } => {
            sync.invite(id, &login).await?;
            println!("Invited {} to project {}", login, id);
        }
        ProjectCommand::Share { id, email } => {
            sync.share_project(id, &email).await?;
            println!("Sent an invitation for project {} to {}", id, email);
        }
    }
    Ok(())
}

async fn run_documents(
    client: &DocshareClient,
    config: &Config,
    command: DocumentCommand,
) -> Result<(), ClientError> {
    let sync = client.sync();
    match command {
        DocumentCommand::List { project_id } => {
            for doc in sync.documents(project_id).await? {
                let size_kb = doc.size.unwrap_or(0) as f64 / 1024.0;
                println!(
                    "{:>5}  {:<40}  {:>10.2} KB  {}",
                    doc.id, doc.filename, size_kb, doc.uploaded_at
                );
            }
        }
        DocumentCommand::Upload { project_id, files } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                uploads.push(UploadFile::from_path(path).await?);
            }
            let documents = sync.upload_documents(project_id, uploads).await?;
            for doc in documents {
                println!("Uploaded {} (id {})", doc.filename, doc.id);
            }
        }
        DocumentCommand::Download {
            document_id,
            name,
            dir,
        } => {
            let dir = dir.unwrap_or_else(|| config.download_dir.clone());
            let path = sync
                .download_document(document_id, name.as_deref(), &dir)
                .await?;
            println!("Saved {}", path.display());
        }
        DocumentCommand::Replace {
            project_id,
            document_id,
            file,
        } => {
            let upload = UploadFile::from_path(&file).await?;
            let doc = sync.replace_document(project_id, document_id, upload).await?;
            println!("Replaced document {} with {}", doc.id, doc.filename);
        }
        DocumentCommand::Delete {
            project_id,
            document_id,
        } => {
            sync.delete_document(project_id, document_id).await?;
            println!("Deleted document {}", document_id);
        }
    }
    Ok(())
}

async fn run_invitations(client: &DocshareClient, command: InvitationCommand) -> Result<(), ClientError> {
    let sync = client.sync();
    let (token, project_id, decision) = match command {
        InvitationCommand::List => {
            let now = Utc::now();
            for invitation in sync.invitations().await? {
                let marker = match invitation.state_at(now) {
                    InvitationState::Expired => " (expired)",
                    _ => "",
                };
                println!(
                    "{}  project {} \"{}\"  until {}{}",
                    invitation.token,
                    invitation.project_id,
                    invitation.project_name,
                    invitation.expires_at,
                    marker
                );
            }
            return Ok(());
        }
        InvitationCommand::Accept { token, project_id } => (token, project_id, Decision::Accept),
        InvitationCommand::Decline { token, project_id } => (token, project_id, Decision::Decline),
    };

    match sync.respond_to_invitation(&token, project_id, decision).await? {
        HandshakeOutcome::Resolved(InvitationState::Accepted) => {
            println!("Joined project {}", project_id)
        }
        HandshakeOutcome::Resolved(_) => println!("Declined invitation to project {}", project_id),
        HandshakeOutcome::Converged => {
            println!("That invitation was already answered; nothing left to do")
        }
    }
    Ok(())
}
