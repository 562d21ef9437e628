use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;

use crate::backend::{AuthReceipt, Backend, BackendError, CreateReceipt, UpdateReceipt};
use crate::task::{Task, TaskDraft, TaskPatch};

/// Timeout applied to task creation. Other requests use the client default;
/// the server contract does not specify one for them.
pub const CREATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Backend variant that talks to the real HTTP API.
pub struct RemoteBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Maps a non-2xx response to an error carrying the status and the
    /// first part of the body.
    fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(BackendError::api(status.as_u16(), &body))
    }

    /// For requests addressing a single task, a 404 means the task itself
    /// is missing.
    fn check_task(response: Response, id: &str) -> Result<Response, BackendError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(id.to_string()));
        }
        Self::check(response)
    }
}

impl Backend for RemoteBackend {
    fn signup(&self, email: &str, password: &str) -> Result<AuthReceipt, BackendError> {
        debug!(%email, "POST /auth/signup");
        let response = self
            .client
            .post(self.url("/auth/signup"))
            .json(&json!({"email": email, "password": password}))
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn login(&self, email: &str, password: &str) -> Result<AuthReceipt, BackendError> {
        debug!(%email, "POST /auth/login");
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({"email": email, "password": password}))
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        debug!("GET /tasks");
        let response = self.authorized(self.client.get(self.url("/tasks"))).send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn get_task(&self, id: &str) -> Result<Task, BackendError> {
        debug!(%id, "GET /tasks/{{id}}");
        let response = self
            .authorized(self.client.get(self.url(&format!("/tasks/{id}"))))
            .send()?;
        Ok(Self::check_task(response, id)?.json()?)
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<CreateReceipt, BackendError> {
        debug!(title = %draft.title, "POST /tasks");
        let response = self
            .authorized(self.client.post(self.url("/tasks")))
            .timeout(CREATE_TIMEOUT)
            .json(draft)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<UpdateReceipt, BackendError> {
        debug!(%id, "PUT /tasks/{{id}}");
        let response = self
            .authorized(self.client.put(self.url(&format!("/tasks/{id}"))))
            .json(patch)
            .send()?;
        Ok(Self::check_task(response, id)?.json()?)
    }

    /// Deletion succeeds only on an exact 204. Any other status, 2xx
    /// included, is a failure the caller must respect.
    fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        debug!(%id, "DELETE /tasks/{{id}}");
        let response = self
            .authorized(self.client.delete(self.url(&format!("/tasks/{id}"))))
            .send()?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(id.to_string()));
        }
        let body = response.text().unwrap_or_default();
        Err(BackendError::api(status.as_u16(), &body))
    }
}
