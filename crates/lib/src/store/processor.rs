//! The single consumer of a store's action channel.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use arc_swap::ArcSwap;
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::StoreError;
use crate::{
    action::{Action, SET_STATE},
    doc::{Document, Path, PathError, PathExt},
    event::Event,
};

/// Writes a value into a scratch document.
type WriteFn = fn(&mut Document, &Path, Document) -> Result<(), PathError>;

fn write_value(scratch: &mut Document, path: &Path, value: Document) -> Result<(), PathError> {
    scratch.set_path(path, value)
}

/// Owns everything one run of the processing loop touches.
pub(super) struct Processor {
    state: Arc<ArcSwap<Document>>,
    actions: Arc<Mutex<mpsc::UnboundedReceiver<Action>>>,
    events: mpsc::UnboundedSender<Event>,
    processed: Arc<watch::Sender<u64>>,
    write: WriteFn,
}

impl Processor {
    pub(super) fn new(
        state: Arc<ArcSwap<Document>>,
        actions: Arc<Mutex<mpsc::UnboundedReceiver<Action>>>,
        events: mpsc::UnboundedSender<Event>,
        processed: Arc<watch::Sender<u64>>,
    ) -> Self {
        Self {
            state,
            actions,
            events,
            processed,
            write: write_value,
        }
    }

    /// Consumes actions until `stop` fires or the action channel closes.
    pub(super) async fn run(self, mut stop: oneshot::Receiver<()>) {
        async move {
            let mut actions = self.actions.lock().await;
            info!("Action processor is running, waiting for actions");

            loop {
                tokio::select! {
                    biased;

                    _ = &mut stop => {
                        info!("Action processor cancelled");
                        break;
                    }

                    next = actions.recv() => match next {
                        Some(action) => self.process(action),
                        None => {
                            info!("Action channel closed, action processor exiting");
                            break;
                        }
                    },
                }
            }
        }
        .instrument(info_span!("action_processor"))
        .await
    }

    /// Applies one action, publishes its event and records it as processed.
    ///
    /// Never panics: a fault while applying is logged and the action skipped.
    fn process(&self, action: Action) {
        debug!(kind = action.kind(), "Processing action");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.apply(action)))
            .unwrap_or_else(|payload| {
                Err(StoreError::Panicked {
                    reason: panic_reason(payload.as_ref()),
                })
            });

        match outcome {
            Ok(event) => {
                debug!(path = %event.path(), "State updated, emitting {}", event.kind());
                if self.events.send(event).is_err() {
                    debug!("Event stream dropped, event discarded");
                }
            }
            Err(e) if e.is_fault() => error!("{e}"),
            Err(e) => warn!("{e}"),
        }

        self.processed.send_modify(|count| *count += 1);
    }

    /// Applies a `SET_STATE` action to a copy of the live document and swaps
    /// it in.
    ///
    /// On any error the live document is left untouched.
    fn apply(&self, action: Action) -> Result<Event, StoreError> {
        let (path, value) = match &action {
            Action::SetState { path, value, .. } => (path.clone(), value.clone().unwrap_or_default()),
            Action::Other { kind, .. } if kind == SET_STATE => {
                return Err(StoreError::MalformedAction {
                    kind: kind.clone(),
                    reason: "missing string 'path'".to_string(),
                });
            }
            Action::Other { kind, .. } => {
                return Err(StoreError::UnknownActionType { kind: kind.clone() });
            }
        };

        let current = self.state.load_full();
        let old_value = current.get_path(&path).cloned();

        let mut scratch = Document::clone(&current);
        (self.write)(&mut scratch, &path, value).map_err(|source| StoreError::ApplyFailed {
                path: path.clone(),
                source,
            })?;

        let next = Arc::new(scratch);
        self.state.store(Arc::clone(&next));
        let new_value = next.get_path(&path).cloned().unwrap_or(Document::Null);

        Ok(Event::StateChanged {
            path,
            old_value,
            new_value,
            action_source: action,
        })
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
