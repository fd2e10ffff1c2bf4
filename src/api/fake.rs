//! In-process [`TaskApi`] for tests: a [`TaskStore`] that records calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{ApiError, TaskApi};
use crate::model::{NewTask, Task, TaskId, TaskUpdate};
use crate::server::store::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(NewTask),
    Update(TaskId, TaskUpdate),
    Delete(TaskId),
}

#[derive(Default)]
struct FakeState {
    store: TaskStore,
    calls: Vec<Call>,
    fail_with: Option<StatusCode>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Arc<Self> {
        Arc::new(FakeApi {
            state: Mutex::new(FakeState {
                store: TaskStore::from_tasks(tasks),
                ..Default::default()
            }),
        })
    }

    /// Make every following call fail with `status` (or succeed again)
    pub fn fail_with(&self, status: Option<StatusCode>) {
        self.state.lock().unwrap().fail_with = status;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.fail_with {
            Some(status) => Err(ApiError::Status {
                status,
                body: "injected failure".into(),
            }),
            None => Ok(state),
        }
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: StatusCode::NOT_FOUND,
        body: "Task not found".into(),
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let state = self.record(Call::List)?;
        Ok(state.store.list().to_vec())
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        let mut state = self.record(Call::Create(task.clone()))?;
        Ok(state.store.create(task.clone()))
    }

    async fn update(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, ApiError> {
        let mut state = self.record(Call::Update(id, update.clone()))?;
        state.store.update(id, update).ok_or_else(not_found)
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let mut state = self.record(Call::Delete(id))?;
        if state.store.delete(id) {
            Ok(())
        } else {
            Err(not_found())
        }
    }
}
