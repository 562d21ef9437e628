use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{Task, TaskDraft, TaskPatch};

/// How much of a server error body is kept when reporting a failure.
pub const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Task not found: {0}")]
    NotFound(String),
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl BackendError {
    pub fn api(status: u16, body: &str) -> Self {
        let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        BackendError::Api { status, body }
    }
}

/// Returned by signup and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthReceipt {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Returned by create; the id is the backend-assigned task id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReceipt {
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// The one interface both backend variants implement. Callers never know
/// whether they are talking to the remote API or the in-memory mock.
pub trait Backend {
    fn signup(&self, email: &str, password: &str) -> Result<AuthReceipt, BackendError>;
    fn login(&self, email: &str, password: &str) -> Result<AuthReceipt, BackendError>;

    fn list_tasks(&self) -> Result<Vec<Task>, BackendError>;
    fn get_task(&self, id: &str) -> Result<Task, BackendError>;
    fn create_task(&self, draft: &TaskDraft) -> Result<CreateReceipt, BackendError>;
    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<UpdateReceipt, BackendError>;
    fn delete_task(&self, id: &str) -> Result<(), BackendError>;
}
