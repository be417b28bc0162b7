//! HPC Blueprint
//!
//! Configuration state and its textual rendering:
//! - [`ConfigurationStore`]: ordered list of configured component instances
//! - [`serialize`]: deterministic instances → blueprint document function
//! - [`Session`]: catalog + store owned by one user session
//! - [`cost::estimate`]: local price table from catalog prices
//! - [`export::write_document`]: save a document to disk
//!
//! # Example
//!
//! ```rust
//! use hpc_blueprint::{serialize, Session};
//! use hpc_catalog::{Catalog, OptionValue};
//!
//! let mut session = Session::new(Catalog::builtin());
//! let id = session.add("c2-standard-8").unwrap();
//! session.update_field(&id, "cpuCount", OptionValue::Number(16.0)).unwrap();
//!
//! let doc = serialize(session.store().list());
//! assert!(doc.contains("source: compute/c2-standard-8"));
//! assert!(doc.contains("cpuCount: 16"));
//! ```

#![warn(unreachable_pub)]

pub mod cost;
pub mod error;
pub mod export;
pub mod instance;
pub mod serializer;
pub mod session;
pub mod store;

pub use error::{BlueprintError, ExportError, StoreError};
pub use instance::{ConfiguredInstance, InstanceId, OptionValues};
pub use serializer::{is_placeholder, serialize, PLACEHOLDER};
pub use session::{ComponentEntry, Session, SessionSpec, ValueWarning};
pub use store::ConfigurationStore;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with blueprints
    pub use crate::{
        is_placeholder, serialize, ConfigurationStore, ConfiguredInstance, InstanceId, Session,
    };
    pub use hpc_catalog::{Catalog, ComponentDefinition, OptionValue};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
