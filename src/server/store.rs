use chrono::Utc;

use crate::model::{NewTask, Task, TaskId, TaskUpdate};

/// In-memory task collection with sequential ids
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskStore {
    /// A store holding `tasks` as-is; new ids continue after the largest one
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        TaskStore { tasks, next_id }
    }

    /// Two sample tasks, one of them done
    pub fn seeded() -> Self {
        let mut store = TaskStore::default();
        store.create(NewTask::new("Read the API docs"));
        let second = store.create(NewTask::new("Try the terminal client"));
        store.update(second.id, &TaskUpdate::completed(true));
        store
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn create(&mut self, new: NewTask) -> Task {
        let task = Task {
            id: TaskId(self.next_id),
            title: new.title,
            completed: new.completed,
            created_at: Some(Utc::now()),
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        task
    }

    /// Merge `update` into the task. `None` if the id is unknown.
    pub fn update(&mut self, id: TaskId, update: &TaskUpdate) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        update.apply_to(task);
        Some(task.clone())
    }

    /// Returns false if the id is unknown
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }
}
