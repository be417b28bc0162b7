//! HPC Component Catalog
//!
//! The read-only registry of provisionable resource types:
//! - [`ComponentDefinition`]: one resource type with price and options
//! - [`OptionSpec`]: one configurable option (text, number, select, slider)
//! - [`OptionValue`]: a default or configured value
//! - [`Catalog`]: checked, ordered collection of definitions
//!
//! # Example
//!
//! ```rust
//! use hpc_catalog::{Catalog, Category};
//!
//! let catalog = Catalog::builtin();
//! let c2 = catalog.get("c2-standard-8").unwrap();
//! assert_eq!(c2.category, Category::Compute);
//! assert_eq!(c2.options[0].id, "cpuCount");
//! ```

#![warn(unreachable_pub)]

mod builtin;
pub mod definition;
pub mod error;
pub mod registry;

pub use definition::{
    Category, Choice, ComponentDefinition, OptionKind, OptionSpec, OptionValue, ValueIssue,
};
pub use error::CatalogError;
pub use registry::Catalog;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
