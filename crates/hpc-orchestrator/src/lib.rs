//! HPC Orchestrator
//!
//! Turns a stream of rendered documents into validation and cost results:
//! - [`Debouncer`]: releases a document once it has been stable for the quiet period
//! - [`RequestState`]: per-kind status with epoch-based stale-response discard
//! - [`OrchestratorHandle`]: submit documents, observe [`PipelineSnapshot`]s
//!   and failure [`Notification`]s
//!
//! A placeholder document resets both kinds to idle without calling out; a
//! released document identical to the previous one is ignored.

#![warn(unreachable_pub)]

pub mod config;
pub mod debounce;
pub mod error;
pub mod notification;
pub mod pipeline;
pub mod request_state;

pub use config::{PipelineConfig, DEFAULT_DEBOUNCE};
pub use debounce::Debouncer;
pub use error::OrchestratorError;
pub use notification::{CallKind, Notification};
pub use pipeline::{OrchestratorHandle, PipelineSnapshot};
pub use request_state::{ApplyOutcome, RequestState, RequestStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
