//! # Digital Contracts Gateway Runtime
//!
//! Process bootstrap for the gateway binary and the `dc-query` tool.
//!
//! ## Startup Sequence
//!
//! 1. Install the log subscriber (`RUST_LOG`, `DC_LOG_JSON`)
//! 2. Load configuration (defaults, `DC_CONFIG` file, `DC_*` overrides)
//! 3. Load the user's MSP credentials
//! 4. Build the network session and submission service
//! 5. Bind the HTTP listener
//!
//! Any failure before step 5 completes is fatal and exits non-zero.

pub mod bootstrap;
pub mod config;
pub mod logging;

pub use bootstrap::{connect, load_identity, BootstrapError, Connection, GatewayRuntime, Identity};
pub use config::{ConfigError, IdentityConfig, NetworkConfig, RuntimeConfig, SubmissionSettings};
pub use logging::{init_logging, LoggingConfig, LoggingError};
