//! Cancellable deferred tasks and the debouncer built on them.

use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

/// Handle to a task scheduled with [`schedule`].
#[derive(Debug)]
pub struct DeferredTask {
    handle: JoinHandle<()>,
}

impl DeferredTask {
    /// Stops the task if its delay has not elapsed yet. A task that already
    /// started running is aborted at its next await point.
    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Runs `task` on the current tokio runtime once `delay` has elapsed.
pub fn schedule<F>(delay: Duration, task: F) -> DeferredTask
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task.await;
    });
    DeferredTask { handle }
}

/// Coalesces bursts of triggers into one deferred run after a quiet period.
///
/// Every trigger cancels the pending task and schedules a fresh one, so
/// only the last trigger of a burst runs. The generation passed to the task
/// lets the receiver drop a run that fired just before it was superseded.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    generation: u64,
    pending: Option<DeferredTask>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            generation: 0,
            pending: None,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    pub fn trigger<F, Fut>(&mut self, task: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(schedule(self.quiet_period, task(self.generation)));
        self.generation
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
    }

    /// Marks the pending run as delivered without aborting it.
    pub fn settle(&mut self) {
        self.pending = None;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
