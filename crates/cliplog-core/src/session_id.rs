//! Observable session id.
//!
//! The logger owns the only writable [`SessionIdCell`]. Everything else that
//! needs the id holds a [`SessionIdHandle`], which can read the current value
//! and subscribe to changes but never set it.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

type Subscriber = Arc<dyn Fn(Option<&str>) + Send + Sync>;

#[derive(Default)]
struct Shared {
    value: RwLock<Option<String>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl Shared {
    fn get(&self) -> Option<String> {
        self.value.read().clone()
    }

    fn subscribe(&self, subscriber: Subscriber) {
        self.subscribers.lock().push(subscriber);
    }
}

/// Writable session id holder.
#[derive(Default)]
pub struct SessionIdCell {
    shared: Arc<Shared>,
}

impl SessionIdCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell holding an initial id.
    pub fn with_value(value: impl Into<String>) -> Self {
        let cell = Self::new();
        *cell.shared.value.write() = Some(value.into());
        cell
    }

    pub fn get(&self) -> Option<String> {
        self.shared.get()
    }

    /// Replace the value, notifying subscribers when it changes.
    ///
    /// Subscribers run on the calling thread, outside every lock. A
    /// subscriber added during a notification is called from the next change.
    pub fn set(&self, value: Option<String>) {
        {
            let mut current = self.shared.value.write();
            if *current == value {
                return;
            }
            *current = value.clone();
        }

        let subscribers: Vec<Subscriber> = self.shared.subscribers.lock().clone();
        for subscriber in &subscribers {
            subscriber(value.as_deref());
        }
    }

    /// Read-only handle for consumers.
    pub fn handle(&self) -> SessionIdHandle {
        SessionIdHandle {
            shared: self.shared.clone(),
        }
    }
}

impl std::fmt::Debug for SessionIdCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdCell")
            .field("value", &self.get())
            .finish()
    }
}

/// Read-only view of a [`SessionIdCell`].
#[derive(Clone)]
pub struct SessionIdHandle {
    shared: Arc<Shared>,
}

impl SessionIdHandle {
    pub fn get(&self) -> Option<String> {
        self.shared.get()
    }

    /// Register a callback invoked with every new value.
    pub fn subscribe(&self, subscriber: impl Fn(Option<&str>) + Send + Sync + 'static) {
        self.shared.subscribe(Arc::new(subscriber));
    }
}

impl std::fmt::Debug for SessionIdHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdHandle")
            .field("value", &self.get())
            .finish()
    }
}
