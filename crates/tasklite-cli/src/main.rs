mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tasklite_core::config::{BackendKind, Settings};
use tasklite_core::session::SessionController;
use tasklite_core::store::CredentialStore;
use tasklite_core::task::{TaskPriority, TaskStatus};

#[derive(Parser)]
#[command(name = "tasklite", version, about = "Manage tasks from the command line")]
struct Cli {
    /// Use the in-memory mock backend instead of the remote API
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Password confirmation; prompted when omitted
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Log in with an existing account
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out and forget the stored credential
    Logout,
    /// Show the currently authenticated user
    Whoami,
    /// Create a new task
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// List all tasks
    List,
    /// Show a single task
    Show { id: String },
    /// Update fields of an existing task
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete a task
    Remove { id: String },
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if cli.mock {
        settings.backend = BackendKind::Mock;
    }

    // Built once here and passed into the handlers; no globals.
    let store = CredentialStore::new()?;
    let sessions = SessionController::new(store);

    match cli.command {
        Command::Signup {
            email,
            password,
            confirm,
        } => commands::signup(&sessions, &settings, email, password, confirm),
        Command::Login { email, password } => {
            commands::login(&sessions, &settings, email, password)
        }
        Command::Logout => commands::logout(&sessions),
        Command::Whoami => commands::whoami(&sessions),
        Command::Create {
            title,
            description,
            priority,
            due,
        } => commands::create(&sessions, &settings, title, description, priority, due),
        Command::List => commands::list(&sessions, &settings),
        Command::Show { id } => commands::show(&sessions, &settings, &id),
        Command::Update {
            id,
            title,
            description,
            status,
            priority,
            due,
        } => commands::update(
            &sessions,
            &settings,
            &id,
            title,
            description,
            status,
            priority,
            due,
        ),
        Command::Remove { id } => commands::remove(&sessions, &settings, &id),
    }
}
