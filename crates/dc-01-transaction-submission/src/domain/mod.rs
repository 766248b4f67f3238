//! Domain module for Transaction Submission
//!
//! State machine, endorsement evaluation, errors and peer message parsing.

pub mod errors;
pub mod evaluation;
pub mod message;
pub mod state;

pub use errors::*;
pub use evaluation::{evaluate, Endorsed};
pub use message::extract_message;
pub use state::{SubmissionState, SubmissionTracker};
