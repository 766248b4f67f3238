//! # Commit Event Hub
//!
//! Routes commit events to the single listener registered for each
//! transaction id, and mirrors every event to monitoring subscribers.

use crate::events::{CommitEvent, EventFilter};
use crate::subscriber::{CommitListener, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::TransactionId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, warn};

/// Errors from hub operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HubError {
    /// A listener for this transaction already exists.
    #[error("listener already registered for transaction {0}")]
    AlreadyRegistered(TransactionId),
}

/// Anything that can emit commit events.
pub trait EventPublisher: Send + Sync {
    /// Publish an event. Returns `true` if a registered listener took it.
    fn publish(&self, event: CommitEvent) -> bool;

    /// Total events published so far.
    fn events_published(&self) -> u64;
}

/// Listener slot in the registry.
pub(crate) struct ListenerSlot {
    /// Taken on first delivery; later events for the same id are dropped.
    sender: Option<oneshot::Sender<CommitEvent>>,
    registered_at: Instant,
}

/// Shared table of per-transaction listeners.
pub(crate) struct ListenerRegistry {
    slots: DashMap<TransactionId, ListenerSlot>,
    stats: HubStats,
}

impl ListenerRegistry {
    /// Remove the slot for `tx_id`. Returns `true` if one was present.
    pub(crate) fn release(&self, tx_id: &TransactionId) -> bool {
        match self.slots.remove(tx_id) {
            Some((_, slot)) => {
                self.stats.total_unregistered.fetch_add(1, Ordering::Relaxed);
                debug!(
                    tx_id = %tx_id.short(),
                    held_ms = slot.registered_at.elapsed().as_millis() as u64,
                    "Listener unregistered"
                );
                true
            }
            None => false,
        }
    }
}

/// Hub counters.
#[derive(Debug, Default)]
pub struct HubStats {
    pub total_registered: AtomicU64,
    pub total_delivered: AtomicU64,
    pub total_unregistered: AtomicU64,
    pub total_unmatched: AtomicU64,
}

impl HubStats {
    /// Copy the current counter values.
    pub fn snapshot(&self) -> HubStatsSnapshot {
        HubStatsSnapshot {
            total_registered: self.total_registered.load(Ordering::Relaxed),
            total_delivered: self.total_delivered.load(Ordering::Relaxed),
            total_unregistered: self.total_unregistered.load(Ordering::Relaxed),
            total_unmatched: self.total_unmatched.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`HubStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct HubStatsSnapshot {
    pub total_registered: u64,
    pub total_delivered: u64,
    pub total_unregistered: u64,
    pub total_unmatched: u64,
}

/// In-memory commit event hub.
///
/// Cloning is cheap and every clone shares the same registry.
#[derive(Clone)]
pub struct CommitEventHub {
    registry: Arc<ListenerRegistry>,
    monitor: broadcast::Sender<CommitEvent>,
    events_published: Arc<AtomicU64>,
}

impl CommitEventHub {
    /// Create a hub with default monitor capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a hub whose monitoring channel buffers `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (monitor, _) = broadcast::channel(capacity.max(1));
        Self {
            registry: Arc::new(ListenerRegistry {
                slots: DashMap::new(),
                stats: HubStats::default(),
            }),
            monitor,
            events_published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register the listener for one transaction.
    ///
    /// The returned handle unregisters itself when dropped.
    pub fn register(&self, tx_id: &TransactionId) -> Result<CommitListener, HubError> {
        let (sender, receiver) = oneshot::channel();
        match self.registry.slots.entry(tx_id.clone()) {
            Entry::Occupied(_) => {
                warn!(tx_id = %tx_id.short(), "Duplicate listener registration rejected");
                return Err(HubError::AlreadyRegistered(tx_id.clone()));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(ListenerSlot {
                    sender: Some(sender),
                    registered_at: Instant::now(),
                });
            }
        }
        self.registry
            .stats
            .total_registered
            .fetch_add(1, Ordering::Relaxed);
        debug!(tx_id = %tx_id.short(), "Listener registered");
        Ok(CommitListener::new(
            tx_id.clone(),
            receiver,
            self.registry.clone(),
        ))
    }

    /// Remove the listener for `tx_id`, if any.
    pub fn unregister(&self, tx_id: &TransactionId) -> bool {
        self.registry.release(tx_id)
    }

    /// Whether a listener is currently registered for `tx_id`.
    #[must_use]
    pub fn is_registered(&self, tx_id: &TransactionId) -> bool {
        self.registry.slots.contains_key(tx_id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.slots.len()
    }

    /// Hub counters.
    #[must_use]
    pub fn stats(&self) -> HubStatsSnapshot {
        self.registry.stats.snapshot()
    }

    /// Subscribe to a copy of every published event matching `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(
            tx_ids = filter.tx_ids.len(),
            invalid_only = filter.invalid_only,
            "New monitoring subscription"
        );
        Subscription::new(self.monitor.subscribe(), filter)
    }

    /// Number of monitoring subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.monitor.receiver_count()
    }

    /// Listeners registered longer than `max_age`.
    ///
    /// Only reports; listeners are removed by their owners.
    #[must_use]
    pub fn stale_listeners(&self, max_age: Duration) -> Vec<TransactionId> {
        self.registry
            .slots
            .iter()
            .filter(|entry| entry.registered_at.elapsed() > max_age)
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for CommitEventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for CommitEventHub {
    fn publish(&self, event: CommitEvent) -> bool {
        self.events_published.fetch_add(1, Ordering::Relaxed);

        // Monitors see everything; a send error only means nobody is watching.
        let _ = self.monitor.send(event.clone());

        let sender = self
            .registry
            .slots
            .get_mut(&event.tx_id)
            .and_then(|mut slot| slot.sender.take());

        let tx_id = event.tx_id.clone();
        match sender {
            Some(sender) => {
                if sender.send(event).is_ok() {
                    self.registry
                        .stats
                        .total_delivered
                        .fetch_add(1, Ordering::Relaxed);
                    debug!(tx_id = %tx_id.short(), "Commit event delivered");
                    true
                } else {
                    debug!(tx_id = %tx_id.short(), "Listener went away before delivery");
                    false
                }
            }
            None => {
                self.registry
                    .stats
                    .total_unmatched
                    .fetch_add(1, Ordering::Relaxed);
                debug!(tx_id = %tx_id.short(), "No listener for commit event");
                false
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
