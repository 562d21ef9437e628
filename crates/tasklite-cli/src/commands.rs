use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use tasklite_core::config::{BackendKind, Settings};
use tasklite_core::session::{Session, SessionController};
use tasklite_core::task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use tasklite_core::{Backend, MockBackend, RemoteBackend};

/// Selects the backend variant for this invocation. The remote variant
/// carries the stored bearer token, if any.
fn backend_for(settings: &Settings, session: &Session) -> Box<dyn Backend> {
    match settings.backend {
        BackendKind::Mock => Box::new(MockBackend::new()),
        BackendKind::Remote => Box::new(
            RemoteBackend::new(&settings.api_base_url)
                .with_token(session.token().map(str::to_string)),
        ),
    }
}

pub fn signup(
    sessions: &SessionController,
    settings: &Settings,
    email: Option<String>,
    password: Option<String>,
    confirm: Option<String>,
) -> Result<()> {
    let email = or_prompt(email, "Email")?;
    let password = or_prompt(password, "Password")?;
    let confirm = or_prompt(confirm, "Confirm password")?;

    let backend = backend_for(settings, &sessions.current());
    let receipt = sessions.signup(backend.as_ref(), &email, &password, &confirm)?;
    println!(
        "{} Logged in as user {}.",
        receipt.message.as_deref().unwrap_or("Account created."),
        receipt.user_id
    );
    Ok(())
}

pub fn login(
    sessions: &SessionController,
    settings: &Settings,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = or_prompt(email, "Email")?;
    let password = or_prompt(password, "Password")?;

    let backend = backend_for(settings, &sessions.current());
    let receipt = sessions.login(backend.as_ref(), &email, &password)?;
    println!(
        "{} Logged in as user {}.",
        receipt.message.as_deref().unwrap_or("Login successful."),
        receipt.user_id
    );
    Ok(())
}

pub fn logout(sessions: &SessionController) -> Result<()> {
    sessions.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(sessions: &SessionController) -> Result<()> {
    match sessions.current() {
        Session::Authenticated(credential) => println!("Logged in as user {}.", credential.user_id),
        Session::Anonymous => println!("Not logged in."),
    }
    Ok(())
}

pub fn create(
    sessions: &SessionController,
    settings: &Settings,
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due: Option<String>,
) -> Result<()> {
    // Creating a task needs a session; offer an inline login rather than
    // failing outright. Declining aborts before anything is submitted.
    if !sessions.current().is_authenticated() {
        if !confirm("You are not logged in. Log in now?")? {
            println!("Task creation cancelled.");
            return Ok(());
        }
        let email = prompt("Email")?;
        let password = prompt("Password")?;
        let backend = backend_for(settings, &sessions.current());
        sessions
            .login(backend.as_ref(), &email, &password)
            .context("Login failed; task not created")?;
    }

    let title = or_prompt(title, "Task title")?;
    let description = match description {
        Some(description) => Some(description),
        None if confirm("Add a description?")? => Some(prompt("Task description")?),
        None => None,
    };

    let draft = TaskDraft {
        title,
        description,
        priority,
        due_date: due,
    };
    draft.validate()?;

    let backend = backend_for(settings, &sessions.current());
    let receipt = backend.create_task(&draft)?;
    println!(
        "{} ID: {}",
        receipt.message.as_deref().unwrap_or("Task created."),
        receipt.id
    );
    Ok(())
}

pub fn list(sessions: &SessionController, settings: &Settings) -> Result<()> {
    let backend = backend_for(settings, &sessions.current());
    let tasks = backend.list_tasks()?;
    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    for task in &tasks {
        println!("{}", render_task_line(task));
    }
    Ok(())
}

pub fn show(sessions: &SessionController, settings: &Settings, id: &str) -> Result<()> {
    let backend = backend_for(settings, &sessions.current());
    let task = backend.get_task(id)?;
    println!("id:          {}", task.id);
    println!("title:       {}", task.title);
    println!("status:      {}", task.status);
    println!("priority:    {}", task.priority);
    if let Some(description) = &task.description {
        println!("description: {description}");
    }
    if let Some(due) = &task.due_date {
        println!("due:         {due}");
    }
    Ok(())
}

pub fn update(
    sessions: &SessionController,
    settings: &Settings,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due: Option<String>,
) -> Result<()> {
    let patch = TaskPatch {
        title,
        description,
        status,
        priority,
        due_date: due,
    };
    if patch.is_empty() {
        bail!("Nothing to update; pass at least one field flag");
    }
    patch.validate()?;

    let backend = backend_for(settings, &sessions.current());
    let receipt = backend.update_task(id, &patch)?;
    println!("{}", receipt.message.as_deref().unwrap_or("Task updated."));
    Ok(())
}

pub fn remove(sessions: &SessionController, settings: &Settings, id: &str) -> Result<()> {
    let backend = backend_for(settings, &sessions.current());
    backend.delete_task(id)?;
    println!("Task {id} deleted.");
    Ok(())
}

fn render_task_line(task: &Task) -> String {
    let due = task.due_date.as_deref().unwrap_or("-");
    format!(
        "{} | {} | {} | {} | {}",
        task.id, task.status, task.priority, due, task.title
    )
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}

fn or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

fn confirm(label: &str) -> Result<bool> {
    let answer = prompt(&format!("{label} [y/N]"))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
