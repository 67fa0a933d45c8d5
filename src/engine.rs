//! Engine Module
//!
//! Coordinates the store, the storage collaborators and the scheduler.
//!
//! ## Responsibilities
//! - Own the [`Store`] and hand out shared handles to it
//! - Run load (read + parse) and store (serialize + write) on the configured
//!   executor
//! - Deliver exactly one completion per operation, on the thread that ran it

use std::sync::Arc;

use crossbeam::channel;

use crate::config::{Config, ExecutionMode};
use crate::error::{IniError, Result};
use crate::format::{self, Parser};
use crate::model::Store;
use crate::scheduler::{Executor, InlineExecutor, Job, SingleWorker};
use crate::storage::{Readable, Writable};

/// Outcome of a load or store: the store handle, or what went wrong
pub type Completion = Result<Arc<Store>>;

/// Load/store front end over a [`Store`]
///
/// ## Concurrency Model
///
/// - **Async mode**: jobs run on one worker thread owned by this engine, one
///   at a time in submission order. Loads and stores never overlap.
/// - **Sync mode**: jobs run inline on the caller's thread.
/// - **Direct access** through [`Engine::handle`] is only structurally safe:
///   a reader may see a partially parsed store while a load is running.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// The document being loaded, edited and stored
    store: Arc<Store>,

    /// Where load/store jobs run
    executor: Box<dyn Executor>,
}

impl Engine {
    /// Create an engine with an empty store, without loading
    ///
    /// Spawns the worker thread when the config asks for async mode.
    pub fn new(config: Config) -> Result<Self> {
        let executor: Box<dyn Executor> = match config.mode {
            ExecutionMode::Sync => Box::new(InlineExecutor),
            ExecutionMode::Async => Box::new(SingleWorker::spawn(&config.worker_name)?),
        };
        Ok(Self::with_executor(config, executor))
    }

    /// Create an engine that runs its jobs on `executor`
    ///
    /// `config.mode` is ignored; the executor decides where work happens.
    pub fn with_executor(config: Config, executor: Box<dyn Executor>) -> Self {
        Self {
            config,
            store: Arc::new(Store::new()),
            executor,
        }
    }

    /// Create an engine and immediately load from the configured source
    ///
    /// In sync mode `on_loaded` has fired by the time this returns.
    pub fn open<F>(config: Config, on_loaded: F) -> Result<Self>
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        let engine = Self::new(config)?;
        engine.load(on_loaded);
        Ok(engine)
    }

    // =========================================================================
    // Load / Store
    // =========================================================================

    /// Read the source and parse it into the store
    ///
    /// Parsed records are added to whatever the store already holds; existing
    /// records keep their values.
    pub fn load<F>(&self, on_complete: F)
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        self.executor.execute(self.load_job(on_complete));
    }

    /// Serialize the store and write it to the sink
    pub fn store<F>(&self, on_complete: F)
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        self.executor.execute(self.store_job(on_complete));
    }

    /// Load and wait for the completion
    ///
    /// Called from inside a completion on the worker thread, the load runs
    /// right there instead of queueing behind the running job.
    pub fn load_blocking(&self) -> Completion {
        let (sender, receiver) = channel::bounded(1);
        let job = self.load_job(move |completion| {
            let _ = sender.send(completion);
        });
        self.dispatch_blocking(job);
        receiver
            .recv()
            .map_err(|_| IniError::Worker("load completion was dropped".to_string()))?
    }

    /// Store and wait for the completion
    pub fn store_blocking(&self) -> Completion {
        let (sender, receiver) = channel::bounded(1);
        let job = self.store_job(move |completion| {
            let _ = sender.send(completion);
        });
        self.dispatch_blocking(job);
        receiver
            .recv()
            .map_err(|_| IniError::Worker("store completion was dropped".to_string()))?
    }

    fn dispatch_blocking(&self, job: Job) {
        if self.executor.is_current() {
            job();
        } else {
            self.executor.execute(job);
        }
    }

    fn load_job<F>(&self, on_complete: F) -> Job
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let source = self.config.source.clone();
        let merge_adjacent_quotes = self.config.merge_adjacent_quotes;

        Box::new(move || {
            let completion = load_now(source.as_deref(), &store, merge_adjacent_quotes)
                .map(|_| store);
            if let Err(e) = &completion {
                tracing::warn!("Load failed: {}", e);
            }
            on_complete(completion);
        })
    }

    fn store_job<F>(&self, on_complete: F) -> Job
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let sink = self.config.sink.clone();

        Box::new(move || {
            let completion = store_now(sink.as_deref(), &store).map(|_| store);
            if let Err(e) = &completion {
                tracing::warn!("Store failed: {}", e);
            }
            on_complete(completion);
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Shared handle to the store
    pub fn handle(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    /// Borrow the store for direct access
    pub fn data(&self) -> &Store {
        &self.store
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the execution mode
    pub fn mode(&self) -> ExecutionMode {
        self.config.mode
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("groups", &self.store.group_count())
            .finish()
    }
}

/// Open the source once and parse everything it yields
fn load_now(
    source: Option<&dyn Readable>,
    store: &Store,
    merge_adjacent_quotes: bool,
) -> Result<()> {
    let source = source
        .ok_or_else(|| IniError::Config("no source configured for load".to_string()))?;

    let reader = source.read()?;
    let stats = Parser::new(store)
        .merge_adjacent_quotes(merge_adjacent_quotes)
        .parse_reader(reader)?;

    tracing::debug!(
        "Loaded {} lines: {} records, {} headers, {} comments, {} ignored",
        stats.lines,
        stats.records,
        stats.headers,
        stats.comments,
        stats.ignored
    );
    Ok(())
}

/// Open the sink once and write the whole store to it
fn store_now(sink: Option<&dyn Writable>, store: &Store) -> Result<()> {
    let sink = sink.ok_or_else(|| IniError::Config("no sink configured for store".to_string()))?;

    let writer = sink.write()?;
    let written = format::serialize(store, std::io::BufWriter::new(writer))?;

    tracing::debug!(
        "Stored {} groups ({} bytes)",
        store.group_count(),
        written
    );
    Ok(())
}
