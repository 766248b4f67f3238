//! # Digital Contracts Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── submission_benchmarks.rs   # Signing, endorsement, full submit
//! └── src/
//!     ├── fixtures.rs                # Scripted peers and orderer
//!     └── integration/
//!         ├── scenarios.rs           # VALID / rejected / timeout / INVALID
//!         ├── concurrency.rs         # Many in-flight transactions
//!         ├── ledger_flows.rs        # Chaincode through the dev network
//!         └── http_flows.rs          # Runtime wiring over HTTP
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p dc-tests
//!
//! # By category
//! cargo test -p dc-tests integration::scenarios::
//! cargo test -p dc-tests integration::http_flows::
//!
//! # Benchmarks
//! cargo bench -p dc-tests
//! ```

pub mod fixtures;
pub mod integration;
