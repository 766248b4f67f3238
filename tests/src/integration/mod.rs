//! # Integration Tests
//!
//! Cross-crate flows: coordinator, commit event hub, development network,
//! HTTP gateway and runtime wiring.

pub mod concurrency;
pub mod http_flows;
pub mod ledger_flows;
pub mod scenarios;
