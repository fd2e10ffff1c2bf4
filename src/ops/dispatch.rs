//! Background execution of controller operations.
//!
//! The TUI cannot await a request without freezing the screen, so each
//! operation runs as a tokio task and its result is sent back over a
//! channel. The event loop calls [`Dispatcher::drain`] between frames; that
//! is the only place results touch the controller, so all list mutation
//! stays on the UI thread. Several operations may be in flight at once and
//! are applied in arrival order, subject to the controller's stale-result
//! checks.
//!
//! Dropping the dispatcher aborts every outstanding request; their results
//! are never applied.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::debug;

use super::controller::{Applied, Controller, Operation, Outcome, Request, Ticket};
use crate::api::ApiError;
use crate::model::TaskId;

/// A finished request waiting to be applied
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub result: Result<Outcome, ApiError>,
}

pub struct Dispatcher {
    handle: Handle,
    tasks: JoinSet<()>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    /// Submitted but not yet applied
    outstanding: usize,
}

impl Dispatcher {
    pub fn new(handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Dispatcher {
            handle,
            tasks: JoinSet::new(),
            tx,
            rx,
            outstanding: 0,
        }
    }

    /// Number of operations whose result has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.outstanding
    }

    /// Begin `op` on the controller and run it in the background
    pub fn submit(&mut self, controller: &mut Controller, op: Operation) -> Ticket {
        let Request { ticket, op } = controller.begin(op);
        let api = controller.api();
        let tx = self.tx.clone();
        self.tasks.spawn_on(
            async move {
                let result = op.execute(api.as_ref()).await;
                // The receiver only goes away with the dispatcher itself
                let _ = tx.send(Completion { ticket, result });
            },
            &self.handle,
        );
        self.outstanding += 1;
        ticket
    }

    /// Submit the toggle for `id`, or do nothing if it is not cached
    pub fn toggle(&mut self, controller: &mut Controller, id: TaskId) -> Option<Ticket> {
        let op = controller.toggle_operation(id)?;
        Some(self.submit(controller, op))
    }

    /// Apply every result that has arrived so far. Never blocks.
    pub fn drain(&mut self, controller: &mut Controller) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(controller, completion);
            applied += 1;
        }
        while self.tasks.try_join_next().is_some() {}
        applied
    }

    /// Wait for the next result and apply it. Returns `None` when nothing is
    /// in flight.
    pub async fn apply_next(&mut self, controller: &mut Controller) -> Option<Applied> {
        if self.outstanding == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        Some(self.apply(controller, completion))
    }

    fn apply(&mut self, controller: &mut Controller, completion: Completion) -> Applied {
        self.outstanding = self.outstanding.saturating_sub(1);
        let applied = controller.finish(completion.ticket, completion.result);
        debug!(seq = completion.ticket.seq, ?applied, "applied completion");
        applied
    }
}
