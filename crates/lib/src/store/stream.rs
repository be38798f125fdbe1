use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::event::Event;

/// Handle onto a store's event stream.
///
/// There is exactly one stream per store. Clones of the handle share it, so
/// each event is received by exactly one caller; listeners that all need
/// every event must fan out themselves.
#[derive(Debug, Clone)]
pub struct EventStream {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Event>>>,
}

impl EventStream {
    pub(super) fn new(rx: mpsc::UnboundedReceiver<Event>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the store and its processor are gone and every
    /// pending event has been received.
    pub async fn recv(&self) -> Option<Event> {
        self.rx.lock().await.recv().await
    }

    /// Returns the next event if one is ready.
    ///
    /// Also returns `None` while another caller is blocked in
    /// [`recv`](Self::recv).
    pub fn try_recv(&self) -> Option<Event> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }

    /// Takes every event that is ready right now.
    pub fn drain(&self) -> Vec<Event> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
