//! Task scheduler
//!
//! Execution is single-threaded and cooperative. Calling an async block
//! queues a task behind a pending promise; queued tasks run in call order
//! when something awaits, and whatever is left runs when the program unit
//! finishes. Timer waits block on a current-thread tokio runtime, which is
//! only built the first time something actually sleeps.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use tokio::runtime::{Builder, Runtime as TokioRuntime};
use tracing::trace;

use super::signal::RuntimeError;
use super::value::{Promise, Task, Value};

/// Shared state of one promise
pub type PromiseCell = Rc<RefCell<Promise>>;

#[derive(Default)]
pub struct Scheduler {
    runtime: Option<TokioRuntime>,
    ready: VecDeque<PromiseCell>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` and answer its pending promise
    pub fn spawn(
        &mut self,
        task: Task,
    ) -> Value {
        let cell = Rc::new(RefCell::new(Promise::Pending(task)));
        self.ready.push_back(Rc::clone(&cell));
        trace!("queued task ({} ready)", self.ready.len());
        Value::Promise(cell)
    }

    /// Next queued promise that has not been started elsewhere
    pub fn next_ready(&mut self) -> Option<PromiseCell> {
        while let Some(cell) = self.ready.pop_front() {
            if cell.borrow().is_pending() {
                return Some(cell);
            }
        }
        None
    }

    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    fn runtime(&mut self) -> Result<&TokioRuntime, RuntimeError> {
        if self.runtime.is_none() {
            let runtime = Builder::new_current_thread()
                .enable_time()
                .build()
                .map_err(|e| RuntimeError::Scheduler(e.to_string()))?;
            self.runtime = Some(runtime);
        }
        self.runtime
            .as_ref()
            .ok_or_else(|| RuntimeError::Scheduler("runtime unavailable".to_string()))
    }

    /// Suspend until `deadline`
    pub fn sleep_until(
        &mut self,
        deadline: Instant,
    ) -> Result<(), RuntimeError> {
        let now = Instant::now();
        if deadline <= now {
            return Ok(());
        }

        trace!("sleeping {:?}", deadline - now);
        let deadline = tokio::time::Instant::from_std(deadline);
        let runtime = self.runtime()?;
        // The timer has to be created inside the runtime to find its driver.
        runtime.block_on(async move { tokio::time::sleep_until(deadline).await });
        Ok(())
    }
}
