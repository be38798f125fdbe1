//! The action/event pipeline.
//!
//! A [`Store`] owns one live [`Document`], an inbound action channel and an
//! outbound event channel. A single background task (the processor) takes
//! actions off the inbound channel one at a time, applies them to a copy of
//! the document, swaps the copy in, and publishes a
//! [`STATE_CHANGED`](crate::event::STATE_CHANGED) event for each one that
//! succeeded.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> roz::Result<()> {
//! use roz::{Action, Store};
//! use serde_json::json;
//!
//! let store = Store::new(json!({"user_settings": {"theme": "dark"}}));
//! let events = store.subscribe();
//! store.start();
//!
//! store.dispatch(Action::set_state("user_settings.theme", "light"));
//! let event = events.recv().await.unwrap();
//! assert_eq!(event.old_value(), Some(&json!("dark")));
//! assert_eq!(event.new_value(), &json!("light"));
//!
//! store.stop().await;
//! assert_eq!(store.snapshot(), json!({"user_settings": {"theme": "light"}}));
//! # Ok(())
//! # }
//! ```
//!
//! # Ordering
//!
//! Actions are applied in the order they were dispatched and events are
//! published in the order actions were applied. A snapshot always reflects
//! some prefix of the applied actions, never a half-applied one.
//!
//! # Failures
//!
//! Unknown, malformed and unapplicable actions are logged and skipped. They
//! produce no event and leave the document as it was. Nothing is returned
//! to the caller of [`Store::dispatch`].

mod error;
mod processor;
mod stream;

use std::{
    fmt,
    sync::{
        Arc, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use arc_swap::ArcSwap;
use tokio::{
    sync::{Mutex, mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

pub use error::StoreError;
use processor::Processor;
pub use stream::EventStream;

use crate::{
    Result,
    action::Action,
    doc::{self, Document, Path, PathExt},
    event::Event,
    loader,
};

/// Handle to a running or idle state container.
///
/// Cloning is cheap; all clones refer to the same document and channels.
/// When the last clone is dropped the action channel closes and a running
/// processor exits on its own.
#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

struct Shared {
    state: Arc<ArcSwap<Document>>,

    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: Arc<Mutex<mpsc::UnboundedReceiver<Action>>>,

    event_tx: mpsc::UnboundedSender<Event>,
    events: EventStream,

    /// Actions successfully enqueued.
    dispatched: AtomicU64,
    /// Actions taken off the queue, whatever their outcome.
    processed: Arc<watch::Sender<u64>>,

    processor: std::sync::Mutex<Option<ProcessorHandle>>,
}

struct ProcessorHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Shared {
    fn processor(&self) -> MutexGuard<'_, Option<ProcessorHandle>> {
        self.processor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store {
    /// Creates an idle store holding `initial`.
    pub fn new(initial: Document) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (processed, _) = watch::channel(0);

        Self {
            shared: Arc::new(Shared {
                state: Arc::new(ArcSwap::from_pointee(initial)),
                action_tx,
                action_rx: Arc::new(Mutex::new(action_rx)),
                event_tx,
                events: EventStream::new(event_rx),
                dispatched: AtomicU64::new(0),
                processed: Arc::new(processed),
                processor: std::sync::Mutex::new(None),
            }),
        }
    }

    /// Creates an idle store from a JSON state file.
    ///
    /// Starts from an empty document if the file cannot be loaded; see
    /// [`loader::load_initial_state`].
    pub fn open(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(loader::load_initial_state(path))
    }

    /// Starts the action processor.
    ///
    /// Must be called from within a Tokio runtime. Does nothing but log a
    /// warning if the processor is already running.
    pub fn start(&self) {
        let mut slot = self.shared.processor();
        if slot.as_ref().is_some_and(|handle| !handle.task.is_finished()) {
            warn!("Action processor already running");
            return;
        }

        let (stop, stop_rx) = oneshot::channel();
        let processor = Processor::new(
            Arc::clone(&self.shared.state),
            Arc::clone(&self.shared.action_rx),
            self.shared.event_tx.clone(),
            Arc::clone(&self.shared.processed),
        );
        let task = tokio::spawn(processor.run(stop_rx));

        *slot = Some(ProcessorHandle { stop, task });
        info!("Action processor started");
    }

    /// Stops the action processor and waits for it to exit.
    ///
    /// An action being applied when this is called is finished first.
    /// Actions still queued stay queued for the next [`start`](Self::start).
    /// Does nothing if the processor is not running.
    pub async fn stop(&self) {
        let handle = self.shared.processor().take();
        let Some(handle) = handle else {
            debug!("Action processor not running, nothing to stop");
            return;
        };

        // The task may already have exited on its own
        let _ = handle.stop.send(());
        if let Err(e) = handle.task.await {
            error!("Action processor task failed: {e}");
        }
        info!("Action processor stopped");
    }

    /// Returns `true` while the processor is consuming actions.
    pub fn is_running(&self) -> bool {
        self.shared
            .processor()
            .as_ref()
            .is_some_and(|handle| !handle.task.is_finished())
    }

    /// Enqueues an action and returns immediately.
    ///
    /// The action is applied later by the processor, in dispatch order.
    /// Outcomes are visible only through the event stream and the log.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        debug!(kind = action.kind(), "Action dispatched");

        // Count before sending: a flush target covers every queued action
        self.shared.dispatched.fetch_add(1, Ordering::AcqRel);
        if let Err(e) = self.shared.action_tx.send(action) {
            self.shared.dispatched.fetch_sub(1, Ordering::AcqRel);
            warn!("Action channel closed, dropping {} action", e.0.kind());
        }
    }

    /// Waits until every action dispatched before this call has been
    /// processed, whether it was applied or discarded.
    ///
    /// Fails with [`StoreError::NotRunning`] if the processor is idle. If the
    /// processor is stopped while this is waiting, it waits until a later
    /// [`start`](Self::start) catches up.
    pub async fn flush(&self) -> Result<()> {
        if !self.is_running() {
            return Err(StoreError::NotRunning.into());
        }

        let target = self.shared.dispatched.load(Ordering::Acquire);
        let mut processed = self.shared.processed.subscribe();
        processed
            .wait_for(|count| *count >= target)
            .await
            .map_err(|_| StoreError::ProcessorGone)?;
        Ok(())
    }

    /// Returns a handle onto the event stream.
    ///
    /// All handles share one stream; see [`EventStream`].
    pub fn subscribe(&self) -> EventStream {
        self.shared.events.clone()
    }

    /// Returns an independent copy of the current document.
    pub fn snapshot(&self) -> Document {
        let current = self.shared.state.load_full();
        Document::clone(&current)
    }

    /// Returns a copy of the value at `path` in the current document.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Document> {
        self.shared.state.load().get_path(path).cloned()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(doc::empty())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("running", &self.is_running())
            .field(
                "dispatched",
                &self.shared.dispatched.load(Ordering::Relaxed),
            )
            .field("processed", &*self.shared.processed.borrow())
            .finish()
    }
}
