//! Error types for the component catalog

/// Catalog construction and lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two definitions share an id
    #[error("duplicate component definition: {0}")]
    DuplicateDefinition(String),

    /// Two options of one definition share an id
    #[error("duplicate option '{option}' in component '{component}'")]
    DuplicateOption {
        /// Owning component id
        component: String,
        /// Repeated option id
        option: String,
    },

    /// A select option was declared without choices
    #[error("select option '{option}' in component '{component}' has no choices")]
    MissingChoices {
        /// Owning component id
        component: String,
        /// Offending option id
        option: String,
    },

    /// Lookup of an id that is not registered
    #[error("unknown component definition: {0}")]
    UnknownDefinition(String),
}
