use std::sync::Mutex;

use rand::Rng;
use tracing::debug;

use crate::backend::{AuthReceipt, Backend, BackendError, CreateReceipt, UpdateReceipt};
use crate::task::{Task, TaskDraft, TaskPatch};

/// In-process backend for local development. Auth always succeeds with a
/// fixed token; tasks live in memory for the lifetime of the process.
#[derive(Default)]
pub struct MockBackend {
    storage: Mutex<Vec<Task>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn receipt(message: &str) -> AuthReceipt {
        AuthReceipt {
            token: "mock_token".to_string(),
            user_id: "123".to_string(),
            message: Some(message.to_string()),
        }
    }
}

impl Backend for MockBackend {
    fn signup(&self, email: &str, _password: &str) -> Result<AuthReceipt, BackendError> {
        debug!(%email, "mock signup");
        Ok(Self::receipt("User created"))
    }

    fn login(&self, email: &str, _password: &str) -> Result<AuthReceipt, BackendError> {
        debug!(%email, "mock login");
        Ok(Self::receipt("Login successful"))
    }

    fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        Ok(self.storage.lock().unwrap().clone())
    }

    fn get_task(&self, id: &str) -> Result<Task, BackendError> {
        self.storage
            .lock()
            .unwrap()
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<CreateReceipt, BackendError> {
        // 4-digit id; collisions are not checked. Good enough for a mock,
        // never for production storage.
        let id = rand::thread_rng().gen_range(1000..=9999).to_string();
        let task = Task {
            id: id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: Default::default(),
            priority: draft.priority.unwrap_or_default(),
            due_date: draft.due_date.clone(),
        };
        debug!(%id, "mock create");
        self.storage.lock().unwrap().push(task);
        Ok(CreateReceipt {
            id,
            message: Some("Task created".to_string()),
        })
    }

    fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<UpdateReceipt, BackendError> {
        let mut storage = self.storage.lock().unwrap();
        let task = storage
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        patch.apply_to(task);
        Ok(UpdateReceipt {
            message: Some("Task updated".to_string()),
        })
    }

    /// Removes every task with the given id and reports success whether or
    /// not anything matched. The remote variant is stricter; callers that
    /// need existence checks must call get_task first.
    fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        self.storage.lock().unwrap().retain(|task| task.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskPriority, TaskStatus};
    use pretty_assertions::assert_eq;

    #[test]
    fn create_assigns_four_digit_ids_in_call_order() {
        let backend = MockBackend::new();
        let mut ids = Vec::new();
        for title in ["one", "two", "three"] {
            let receipt = backend
                .create_task(&TaskDraft::new(title))
                .expect("create");
            assert_eq!(receipt.id.len(), 4);
            assert!(receipt.id.chars().all(|c| c.is_ascii_digit()));
            ids.push(receipt.id);
        }
        let mut distinct = ids.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), ids.len(), "ids must be distinct");

        let listed: Vec<String> = backend
            .list_tasks()
            .expect("list")
            .into_iter()
            .map(|task| task.id)
            .collect();
        assert_eq!(listed, ids, "list preserves insertion order");
    }

    #[test]
    fn create_then_list_round_trip() {
        let backend = MockBackend::new();
        let receipt = backend
            .create_task(&TaskDraft::new("Buy milk"))
            .expect("create");
        assert_eq!(receipt.message.as_deref(), Some("Task created"));

        let tasks = backend.list_tasks().expect("list");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[0].priority, TaskPriority::Medium);
    }

    #[test]
    fn get_task_returns_stored_task_or_not_found() {
        let backend = MockBackend::new();
        let receipt = backend
            .create_task(&TaskDraft::new("Buy milk"))
            .expect("create");

        let task = backend.get_task(&receipt.id).expect("get");
        assert_eq!(task.title, "Buy milk");

        let err = backend.get_task("0").expect_err("unknown id");
        assert!(matches!(err, BackendError::NotFound(id) if id == "0"));
    }

    #[test]
    fn update_unknown_id_fails_and_leaves_storage_unchanged() {
        let backend = MockBackend::new();
        backend
            .create_task(&TaskDraft::new("Buy milk"))
            .expect("create");
        let before = backend.list_tasks().expect("list");

        let patch = TaskPatch {
            title: Some("changed".to_string()),
            ..TaskPatch::default()
        };
        let err = backend.update_task("0", &patch).expect_err("unknown id");
        assert!(matches!(err, BackendError::NotFound(_)));
        assert_eq!(backend.list_tasks().expect("list"), before);
    }

    #[test]
    fn partial_update_preserves_existing_fields() {
        let backend = MockBackend::new();
        let mut draft = TaskDraft::new("Buy milk");
        draft.description = Some("2 liters".to_string());
        let receipt = backend.create_task(&draft).expect("create");

        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        };
        let update = backend.update_task(&receipt.id, &patch).expect("update");
        assert_eq!(update.message.as_deref(), Some("Task updated"));

        let task = backend.get_task(&receipt.id).expect("get");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description.as_deref(), Some("2 liters"));
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn delete_unknown_id_silently_succeeds() {
        let backend = MockBackend::new();
        backend
            .create_task(&TaskDraft::new("Buy milk"))
            .expect("create");
        let before = backend.list_tasks().expect("list");

        backend.delete_task("0").expect("delete is always ok");
        assert_eq!(backend.list_tasks().expect("list"), before);
    }

    #[test]
    fn delete_removes_matching_tasks() {
        let backend = MockBackend::new();
        let receipt = backend
            .create_task(&TaskDraft::new("Buy milk"))
            .expect("create");
        backend.delete_task(&receipt.id).expect("delete");
        assert!(backend.list_tasks().expect("list").is_empty());
    }
}
