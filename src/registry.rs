//! # Subscriber Registry
//!
//! Thread-safe set of connected WebSocket clients and the fan-out path that
//! delivers one serialized snapshot to all of them.
//!
//! Each client owns the receiving half of an unbounded MPSC channel; its
//! socket task drains the channel and performs the actual network writes.
//! Fan-out therefore never blocks on a slow client: `broadcast` only clones
//! an `Arc` pointer to the payload per client. A send failure means the
//! receiving task is gone (the client disconnected), and the handle is
//! evicted in place without disturbing the rest of the iteration.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Internal representation of one connected client.
struct ClientHandle {
    /// Unique identifier, derived from the connection counter.
    id: String,
    /// Sending half of the client's channel. Unbounded, so sends succeed
    /// instantly unless the receiver has been dropped.
    sender: mpsc::UnboundedSender<Arc<str>>,
}

/// Registry of active subscribers. Shared via `Arc` between the connection
/// handlers and the broadcaster; all synchronization is internal.
pub struct Registry {
    clients: Mutex<Vec<ClientHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
        }
    }

    /// Registers a new client and returns the receiver its socket task
    /// should drain. Every payload broadcast after this call is delivered
    /// to the returned channel.
    pub fn add_client(&self, id: &str) -> mpsc::UnboundedReceiver<Arc<str>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut clients = self.clients.lock().expect("Registry lock poisoned");
        clients.push(ClientHandle {
            id: id.to_string(),
            sender: tx,
        });
        log::info!("Client '{}' registered", id);
        rx
    }

    /// Removes a client by id. Safe to call for an already-evicted client.
    pub fn remove_client(&self, id: &str) {
        let mut clients = self.clients.lock().expect("Registry lock poisoned");
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() < before {
            log::info!("Client '{}' removed", id);
        }
    }

    /// Delivers one serialized payload to every registered client.
    ///
    /// Each client receives an `Arc` clone of the same bytes. Clients whose
    /// channel is closed are evicted; a single failing client never aborts
    /// delivery to the others.
    pub fn broadcast(&self, payload: Arc<str>) {
        let mut clients = self.clients.lock().expect("Registry lock poisoned");
        clients.retain(|client| match client.sender.send(Arc::clone(&payload)) {
            Ok(()) => true,
            Err(_) => {
                log::info!("Client '{}' disconnected. Evicting from registry.", client.id);
                false
            }
        });
    }

    /// Number of currently registered clients.
    pub fn client_count(&self) -> usize {
        self.clients.lock().expect("Registry lock poisoned").len()
    }

    /// Ids of currently registered clients, in registration order.
    pub fn client_ids(&self) -> Vec<String> {
        self.clients
            .lock()
            .expect("Registry lock poisoned")
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
