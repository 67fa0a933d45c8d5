//! Scheduler Module
//!
//! Where load and store jobs run.
//!
//! ## Executors
//! - [`InlineExecutor`]: runs the job on the calling thread
//! - [`SingleWorker`]: one named thread draining a FIFO queue, so jobs run
//!   strictly one at a time in submission order
//!
//! Each engine owns its executor; two engines never queue behind each other.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, SendError, Sender};

use crate::error::Result;

/// A unit of work handed to an executor
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs somewhere
pub trait Executor: Send + Sync {
    /// Run `job` exactly once
    fn execute(&self, job: Job);

    /// True when called from a thread this executor runs jobs on
    fn is_current(&self) -> bool {
        false
    }
}

// =============================================================================
// Inline
// =============================================================================

/// Runs every job immediately on the caller's thread
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, job: Job) {
        job();
    }

    fn is_current(&self) -> bool {
        true
    }
}

// =============================================================================
// Single Worker
// =============================================================================

/// A dedicated thread with an unbounded FIFO queue
///
/// Dropping the worker closes the queue; jobs already queued still run and the
/// drop waits for them.
pub struct SingleWorker {
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl SingleWorker {
    /// Spawn the worker thread
    pub fn spawn(name: &str) -> Result<Self> {
        let (sender, receiver) = channel::unbounded::<Job>();

        let thread_name = name.to_string();
        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                tracing::debug!("Worker {} started", thread_name);
                for job in receiver.iter() {
                    job();
                }
                tracing::debug!("Worker {} stopped", thread_name);
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Name of the worker thread
    pub fn name(&self) -> Option<&str> {
        self.handle.as_ref().and_then(|handle| handle.thread().name())
    }
}

impl Executor for SingleWorker {
    fn execute(&self, job: Job) {
        let result = match &self.sender {
            Some(sender) => sender.send(job),
            None => Err(SendError(job)),
        };

        // The worker is gone; run here so the job still completes once
        if let Err(SendError(job)) = result {
            tracing::warn!("Worker queue closed, running job on the calling thread");
            job();
        }
    }

    fn is_current(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.thread().id() == thread::current().id())
            .unwrap_or(false)
    }
}

impl Drop for SingleWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once the queue drains
        drop(self.sender.take());

        if let Some(handle) = self.handle.take() {
            // Joining from inside a job would wait on ourselves
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                tracing::warn!("Worker thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for SingleWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleWorker")
            .field("name", &self.name())
            .field("running", &self.sender.is_some())
            .finish()
    }
}

