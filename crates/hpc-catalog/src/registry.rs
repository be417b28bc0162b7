//! Catalog registry
//!
//! Read-only list of component definitions, checked once at construction.

use crate::definition::{Category, ComponentDefinition, OptionKind};
use crate::error::CatalogError;
use std::collections::HashSet;
use std::sync::Arc;

/// Immutable set of component definitions in registration order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: Vec<Arc<ComponentDefinition>>,
}

impl Catalog {
    /// Build a catalog, rejecting malformed definitions
    ///
    /// # Errors
    /// - `CatalogError::DuplicateDefinition` if two definitions share an id
    /// - `CatalogError::DuplicateOption` if a definition repeats an option id
    /// - `CatalogError::MissingChoices` if a select option has no choices
    pub fn new(definitions: Vec<ComponentDefinition>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for def in &definitions {
            if !ids.insert(def.id.as_str()) {
                return Err(CatalogError::DuplicateDefinition(def.id.clone()));
            }
            check_options(def)?;
        }

        Ok(Self {
            definitions: definitions.into_iter().map(Arc::new).collect(),
        })
    }

    /// The built-in HPC catalog
    #[must_use]
    pub fn builtin() -> Self {
        // The built-in entries satisfy every construction check.
        Self {
            definitions: crate::builtin::definitions()
                .into_iter()
                .map(Arc::new)
                .collect(),
        }
    }

    /// Look up a definition by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<ComponentDefinition>> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Look up a definition by id, failing if absent
    ///
    /// # Errors
    /// `CatalogError::UnknownDefinition` if no definition has this id
    pub fn require(&self, id: &str) -> Result<Arc<ComponentDefinition>, CatalogError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownDefinition(id.to_string()))
    }

    /// Iterate definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ComponentDefinition>> {
        self.definitions.iter()
    }

    /// Definitions of one category, in registration order
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Arc<ComponentDefinition>> {
        self.definitions
            .iter()
            .filter(move |d| d.category == category)
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn check_options(def: &ComponentDefinition) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for option in &def.options {
        if !seen.insert(option.id.as_str()) {
            return Err(CatalogError::DuplicateOption {
                component: def.id.clone(),
                option: option.id.clone(),
            });
        }
        if option.kind == OptionKind::Select && option.choices.is_empty() {
            return Err(CatalogError::MissingChoices {
                component: def.id.clone(),
                option: option.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::OptionSpec;

    #[test]
    fn builtin_passes_construction_checks() {
        let defs = crate::builtin::definitions();
        let checked = Catalog::new(defs).unwrap();
        assert_eq!(checked.len(), Catalog::builtin().len());
    }

    #[test]
    fn rejects_duplicate_definition() {
        let a = ComponentDefinition::new("x", "X", Category::Compute);
        let err = Catalog::new(vec![a.clone(), a]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateDefinition("x".into()));
    }

    #[test]
    fn rejects_duplicate_option() {
        let def = ComponentDefinition::new("x", "X", Category::Storage)
            .with_option(OptionSpec::number("size", "Size", 1.0))
            .with_option(OptionSpec::number("size", "Size again", 2.0));
        assert!(matches!(
            Catalog::new(vec![def]),
            Err(CatalogError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn rejects_select_without_choices() {
        let def = ComponentDefinition::new("x", "X", Category::Network)
            .with_option(OptionSpec::select("mode", "Mode", "A", vec![]));
        assert!(matches!(
            Catalog::new(vec![def]),
            Err(CatalogError::MissingChoices { .. })
        ));
    }

    #[test]
    fn lookup_and_category_filter() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("persistent-ssd").is_some());
        assert!(catalog.require("tpu-v5").is_err());
        let storage: Vec<_> = catalog
            .by_category(Category::Storage)
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(storage, vec!["persistent-ssd", "hyperdisk-balanced"]);
    }
}
