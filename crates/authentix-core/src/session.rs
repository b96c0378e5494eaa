//! Auth token persistence and session lifecycle notifications.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::consts::AUTH_TOKEN_KEY;
use crate::error::Result;
use crate::store::KeyValueStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    /// The API rejected the stored token (HTTP 401).
    Expired,
}

/// Publish/subscribe hub for session events.
///
/// Clones share subscribers. Subscribers whose receiver was dropped are
/// pruned on the next publish.
#[derive(Clone, Debug, Default)]
pub struct SessionEvents {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<SessionEvent>>>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.lock_subscribers().push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber. Returns how many received it.
    pub fn publish(&self, event: SessionEvent) -> usize {
        let mut subs = self.lock_subscribers();
        subs.retain(|tx| tx.send(event.clone()).is_ok());
        debug!(?event, delivered = subs.len(), "Session event published");
        subs.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    /// A poisoned lock is taken over; the list is never left half-updated.
    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<mpsc::Sender<SessionEvent>>> {
        self.subscribers.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Session subscriber lock was poisoned, recovering");
            self.subscribers.clear_poison();
            poisoned.into_inner()
        })
    }
}

/// Bearer-token session backed by an injected store.
#[derive(Debug)]
pub struct AuthSession<S> {
    store: S,
    events: SessionEvents,
}

impl<S: KeyValueStore> AuthSession<S> {
    pub fn new(store: S, events: SessionEvents) -> Self {
        Self { store, events }
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    pub fn is_signed_in(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// `Authorization` header value for the stored token, if any.
    pub fn authorization_header(&self) -> Result<Option<String>> {
        Ok(self.token()?.map(|t| format!("Bearer {t}")))
    }

    pub fn sign_in(&mut self, token: &str) -> Result<()> {
        self.store.set(AUTH_TOKEN_KEY, token)?;
        info!("Signed in");
        self.events.publish(SessionEvent::SignedIn);
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.store.clear(AUTH_TOKEN_KEY)?;
        info!("Signed out");
        self.events.publish(SessionEvent::SignedOut);
        Ok(())
    }

    /// React to an HTTP 401: forget the token and tell every subscriber.
    pub fn handle_unauthorized(&mut self) -> Result<()> {
        self.store.clear(AUTH_TOKEN_KEY)?;
        info!("Session expired");
        self.events.publish(SessionEvent::Expired);
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
