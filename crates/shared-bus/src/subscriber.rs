//! # Listeners and Subscriptions
//!
//! `CommitListener` waits for the one event of its transaction.
//! `Subscription` observes the whole event flow for monitoring.

use crate::events::{CommitEvent, EventFilter};
use crate::publisher::ListenerRegistry;
use shared_types::TransactionId;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, oneshot};
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The hub was dropped.
    #[error("Commit event hub closed")]
    Closed,
}

/// Handle for the commit event of a single transaction.
///
/// Unregisters from the hub exactly once: explicitly through
/// [`CommitListener::unregister`] or implicitly on drop.
pub struct CommitListener {
    tx_id: TransactionId,
    receiver: Option<oneshot::Receiver<CommitEvent>>,
    registry: Arc<ListenerRegistry>,
    active: bool,
}

impl CommitListener {
    pub(crate) fn new(
        tx_id: TransactionId,
        receiver: oneshot::Receiver<CommitEvent>,
        registry: Arc<ListenerRegistry>,
    ) -> Self {
        Self {
            tx_id,
            receiver: Some(receiver),
            registry,
            active: true,
        }
    }

    /// Transaction this listener waits for.
    #[must_use]
    pub fn tx_id(&self) -> &TransactionId {
        &self.tx_id
    }

    /// Wait for the commit event.
    ///
    /// Cancel-safe: dropping the future before it completes leaves the
    /// listener able to receive. Returns `None` once the event has been
    /// consumed or if it can no longer arrive.
    pub async fn recv(&mut self) -> Option<CommitEvent> {
        let receiver = self.receiver.as_mut()?;
        let result = receiver.await;
        self.receiver = None;
        result.ok()
    }

    /// Take the event if it has already arrived.
    pub fn try_recv(&mut self) -> Option<CommitEvent> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(event) => {
                self.receiver = None;
                Some(event)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.receiver = None;
                None
            }
        }
    }

    /// Remove this listener from the hub.
    ///
    /// Returns `false` if the entry was already gone.
    pub fn unregister(mut self) -> bool {
        self.active = false;
        self.registry.release(&self.tx_id)
    }
}

impl Drop for CommitListener {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            self.registry.release(&self.tx_id);
        }
    }
}

impl std::fmt::Debug for CommitListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitListener")
            .field("tx_id", &self.tx_id)
            .field("pending", &self.receiver.is_some())
            .field("active", &self.active)
            .finish()
    }
}

/// Monitoring handle receiving a copy of every matching event.
pub struct Subscription {
    receiver: broadcast::Receiver<CommitEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<CommitEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next event that matches the filter.
    ///
    /// Returns `None` when the hub is gone.
    pub async fn recv(&mut self) -> Option<CommitEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next matching event without blocking.
    pub fn try_recv(&mut self) -> Result<Option<CommitEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
