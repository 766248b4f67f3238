//! # Shared Bus - Commit Event Hub
//!
//! Delivers commit notifications from committing peers to the transaction
//! that is waiting for them.
//!
//! ## Routing Rules
//!
//! - Every listener is keyed by exactly one `TransactionId`.
//! - An event is delivered only to the listener registered for its id.
//! - Removing one listener never touches another's entry.
//! - Events for ids nobody listens to are counted and dropped.
//!
//! ```text
//! ┌──────────────┐   publish()   ┌──────────────────┐   tx_id match   ┌────────────────┐
//! │  Committer   │ ────────────→ │  CommitEventHub  │ ──────────────→ │ CommitListener │
//! └──────────────┘               │  (DashMap by id) │                 └────────────────┘
//!                                │                  │   subscribe()   ┌────────────────┐
//!                                │    broadcast     │ ──────────────→ │  Subscription  │
//!                                └──────────────────┘   (monitors)    └────────────────┘
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{CommitEvent, EventFilter};
pub use publisher::{CommitEventHub, EventPublisher, HubError, HubStats, HubStatsSnapshot};
pub use subscriber::{CommitListener, Subscription, SubscriptionError};

/// Maximum events to buffer per monitoring subscriber before it lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
