//! Main queue - the UI-affinity execution context
//!
//! Completions and group notifications are never run on the thread a
//! platform callback arrives on. They are sent as jobs over an unbounded
//! channel to a single consumer, the `MainLoop`, which runs them in order.
//!
//! - **MainQueue** (mpsc sender): cloneable, usable from any thread, never blocks
//! - **MainLoop** (mpsc receiver): the one place jobs run

use tokio::sync::mpsc;

use crate::core::{PermissionError, PermissionResult};

/// A unit of work for the main loop
pub type Job = Box<dyn FnOnce() + Send + 'static>;

// ============================================================================
// Channel Creation
// ============================================================================

/// Create a new main queue pair
///
/// Returns (queue, loop). Hand the queue to the registry and run the loop on
/// the thread or task that owns the UI.
pub fn create_main_queue() -> (MainQueue, MainLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MainQueue { tx }, MainLoop { rx })
}

// ============================================================================
// MainQueue
// ============================================================================

/// Sending half of the main queue
#[derive(Clone, Debug)]
pub struct MainQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl MainQueue {
    /// Create a queue whose loop runs as a tokio task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn() -> Self {
        let (queue, main_loop) = create_main_queue();
        tokio::spawn(main_loop.run());
        queue
    }

    /// Schedule a job on the main loop
    pub fn dispatch<F>(&self, job: F) -> PermissionResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(Box::new(job))
            .map_err(|_| PermissionError::ChannelClosed)
    }

    /// Schedule a job, logging instead of failing if the loop is gone
    pub(crate) fn post<F>(&self, what: &str, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.dispatch(job).is_err() {
            tracing::warn!(job = what, "Main loop stopped, dropping job");
        }
    }

    /// Check if the loop has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ============================================================================
// MainLoop
// ============================================================================

/// Receiving half of the main queue
#[derive(Debug)]
pub struct MainLoop {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl MainLoop {
    /// Run jobs until every queue handle is dropped
    pub async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            job();
        }
        tracing::debug!("Main loop finished");
    }

    /// Wait for the next job and run it
    ///
    /// Returns `false` once every queue handle is dropped.
    pub async fn turn(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run every job that is ready, including jobs queued while draining
    ///
    /// Returns the number of jobs run. For hosts that pump their own event loop.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}
