//! The task controller: sole owner of the client-side task list.
//!
//! The list is a cache of the server's collection. It changes only when a
//! server response arrives: loads replace it, creates append, updates
//! replace the matching entry, deletes remove it. Failures never touch the
//! list; they overwrite the single error slot instead.
//!
//! Every remote call is split into three steps so the same reconciliation
//! runs whether the call is awaited inline (CLI, tests) or on a background
//! task (TUI, see [`super::dispatch`]):
//!
//! 1. [`Controller::begin`] stamps the operation with a sequence number,
//! 2. [`Operation::execute`] performs the round trip,
//! 3. [`Controller::finish`] applies the outcome.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{ApiError, TaskApi};
use crate::model::{NewTask, Task, TaskId, TaskUpdate, find_task};

/// A remote operation, ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    LoadAll,
    Create(NewTask),
    Update { id: TaskId, update: TaskUpdate },
    Delete(TaskId),
}

/// Successful result of an [`Operation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded(Vec<Task>),
    Created(Task),
    Updated(Task),
    Deleted(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    LoadAll,
    Create,
    Update,
    Delete,
}

impl OpKind {
    /// Prefix of the error message shown when this operation fails
    pub fn failure_label(self) -> &'static str {
        match self {
            OpKind::LoadAll => "Failed to fetch tasks",
            OpKind::Create => "Failed to add task",
            OpKind::Update => "Failed to update task",
            OpKind::Delete => "Failed to delete task",
        }
    }
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::LoadAll => OpKind::LoadAll,
            Operation::Create(_) => OpKind::Create,
            Operation::Update { .. } => OpKind::Update,
            Operation::Delete(_) => OpKind::Delete,
        }
    }

    /// The task this operation targets, if it targets an existing one
    pub fn target(&self) -> Option<TaskId> {
        match self {
            Operation::Update { id, .. } | Operation::Delete(id) => Some(*id),
            Operation::LoadAll | Operation::Create(_) => None,
        }
    }

    /// Perform the round trip. Exactly one request per call, no retries.
    pub async fn execute(&self, api: &dyn TaskApi) -> Result<Outcome, ApiError> {
        match self {
            Operation::LoadAll => api.list().await.map(Outcome::Loaded),
            Operation::Create(task) => api.create(task).await.map(Outcome::Created),
            Operation::Update { id, update } => {
                api.update(*id, update).await.map(Outcome::Updated)
            }
            Operation::Delete(id) => api.delete(*id).await.map(|()| Outcome::Deleted(*id)),
        }
    }
}

/// Identifies an in-flight operation when its result comes back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub kind: OpKind,
    pub target: Option<TaskId>,
}

/// An operation that has been begun but not yet executed
#[derive(Debug, Clone)]
pub struct Request {
    pub ticket: Ticket,
    pub op: Operation,
}

/// What [`Controller::finish`] did with a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The list (or error slot) was updated
    Applied,
    /// A newer result for the same target was already applied, or the
    /// target is no longer cached
    Stale,
    /// The operation failed; the error slot was set
    Failed,
}

pub struct Controller {
    api: Arc<dyn TaskApi>,
    tasks: Vec<Task>,
    error: Option<String>,
    loads_in_flight: usize,
    next_seq: u64,
    /// Sequence number of the newest load whose result was applied
    last_load: u64,
    /// Sequence number of the newest mutation applied, per task
    last_mutation: HashMap<TaskId, u64>,
}

impl Controller {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Controller {
            api,
            tasks: Vec::new(),
            error: None,
            loads_in_flight: 0,
            next_seq: 1,
            last_load: 0,
            last_mutation: HashMap::new(),
        }
    }

    pub fn api(&self) -> Arc<dyn TaskApi> {
        Arc::clone(&self.api)
    }

    /// The cached task list, in server order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        find_task(&self.tasks, id)
    }

    /// Message from the most recent failed operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while at least one load is outstanding
    pub fn is_loading(&self) -> bool {
        self.loads_in_flight > 0
    }

    // -----------------------------------------------------------------------
    // Operations (awaited inline)
    // -----------------------------------------------------------------------

    pub async fn load_all(&mut self) -> Applied {
        self.run(Operation::LoadAll).await
    }

    pub async fn create(&mut self, title: &str) -> Applied {
        self.run(Operation::Create(NewTask::new(title))).await
    }

    pub async fn update(&mut self, id: TaskId, update: TaskUpdate) -> Applied {
        self.run(Operation::Update { id, update }).await
    }

    pub async fn delete(&mut self, id: TaskId) -> Applied {
        self.run(Operation::Delete(id)).await
    }

    /// Invert `completed` on a cached task. Returns `None` without touching
    /// the network when the id is not in the list.
    pub async fn toggle_completion(&mut self, id: TaskId) -> Option<Applied> {
        let op = self.toggle_operation(id)?;
        Some(self.run(op).await)
    }

    async fn run(&mut self, op: Operation) -> Applied {
        let Request { ticket, op } = self.begin(op);
        let api = self.api();
        let result = op.execute(api.as_ref()).await;
        self.finish(ticket, result)
    }

    // -----------------------------------------------------------------------
    // Begin / finish
    // -----------------------------------------------------------------------

    /// The update that toggles `id`: the cached record with `completed`
    /// inverted.
    pub fn toggle_operation(&self, id: TaskId) -> Option<Operation> {
        let task = self.find(id)?;
        let mut update = TaskUpdate::from_task(task);
        update.completed = Some(!task.completed);
        Some(Operation::Update { id, update })
    }

    /// Stamp an operation so its result can be matched up later
    pub fn begin(&mut self, op: Operation) -> Request {
        let ticket = Ticket {
            seq: self.next_seq,
            kind: op.kind(),
            target: op.target(),
        };
        self.next_seq += 1;
        if ticket.kind == OpKind::LoadAll {
            self.loads_in_flight += 1;
        }
        debug!(seq = ticket.seq, kind = ?ticket.kind, target = ?ticket.target, "begin");
        Request { ticket, op }
    }

    /// Reconcile the list with the result of a begun operation.
    ///
    /// Runs for both outcomes, so the loading state is always released here.
    pub fn finish(&mut self, ticket: Ticket, result: Result<Outcome, ApiError>) -> Applied {
        if ticket.kind == OpKind::LoadAll {
            self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = format!("{}: {}", ticket.kind.failure_label(), err.summary());
                warn!(
                    seq = ticket.seq,
                    target = ?ticket.target,
                    status = ?err.status(),
                    error = %err,
                    "{message}"
                );
                self.error = Some(message);
                return Applied::Failed;
            }
        };

        match outcome {
            Outcome::Loaded(tasks) => {
                if ticket.seq < self.last_load {
                    debug!(seq = ticket.seq, newest = self.last_load, "stale load dropped");
                    return Applied::Stale;
                }
                self.last_load = ticket.seq;
                debug!(count = tasks.len(), "loaded tasks");
                self.last_mutation
                    .retain(|id, _| tasks.iter().any(|t| t.id == *id));
                self.tasks = tasks;
                self.error = None;
            }
            Outcome::Created(task) => {
                self.last_mutation.insert(task.id, ticket.seq);
                debug!(task_id = task.id.0, "created task");
                self.tasks.push(task);
            }
            Outcome::Updated(task) => {
                if self.is_stale(task.id, ticket.seq) {
                    return Applied::Stale;
                }
                let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) else {
                    debug!(task_id = task.id.0, "updated task no longer cached");
                    return Applied::Stale;
                };
                self.last_mutation.insert(task.id, ticket.seq);
                *slot = task;
            }
            // The server only confirms a delete it ran last for this id, so a
            // successful delete always wins over any update result.
            Outcome::Deleted(id) => {
                self.last_mutation.remove(&id);
                self.tasks.retain(|t| t.id != id);
                debug!(task_id = id.0, "deleted task");
            }
        }
        Applied::Applied
    }

    fn is_stale(&self, id: TaskId, seq: u64) -> bool {
        let stale = self.last_mutation.get(&id).is_some_and(|&newest| seq < newest);
        if stale {
            debug!(task_id = id.0, seq, "stale mutation result dropped");
        }
        stale
    }
}
