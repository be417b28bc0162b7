//! HPC Blueprint command-line front end
//!
//! Library half of the `hpc-blueprint` binary:
//! - [`config`]: layered service and pipeline settings
//! - [`commands`]: catalog listing, session loading, one-shot checks, reports
//! - [`shell`]: interactive editing driving the background pipeline

#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod shell;

pub use config::{ConfigError, HpcConfig};
pub use shell::Shell;
