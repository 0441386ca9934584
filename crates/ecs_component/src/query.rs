//! Component sets for system data access declarations.
//!
//! A [`ComponentSet`] names the component types a system needs. The
//! dispatcher checks it against an entity's attached types before any system
//! code runs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentTypeId};

/// An ordered, duplicate-free set of component types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSet {
    types: BTreeSet<ComponentTypeId>,
}

impl ComponentSet {
    /// Create a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: BTreeSet::new(),
        }
    }

    /// Add the component type `T`.
    #[must_use]
    pub fn with<T: Component>(self) -> Self {
        self.with_id(T::component_type_id())
    }

    /// Add a component type by tag.
    #[must_use]
    pub fn with_id(mut self, type_id: ComponentTypeId) -> Self {
        self.types.insert(type_id);
        self
    }

    /// Insert a component type. Returns `false` if it was already present.
    pub fn insert(&mut self, type_id: ComponentTypeId) -> bool {
        self.types.insert(type_id)
    }

    /// Remove a component type. Returns `false` if it was not present.
    pub fn remove(&mut self, type_id: ComponentTypeId) -> bool {
        self.types.remove(&type_id)
    }

    #[must_use]
    pub fn contains(&self, type_id: ComponentTypeId) -> bool {
        self.types.contains(&type_id)
    }

    /// Returns `true` if every type in `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &ComponentSet) -> bool {
        self.types.is_subset(&other.types)
    }

    /// Types in `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &ComponentSet) -> ComponentSet {
        self.types.difference(&other.types).copied().collect()
    }

    /// Types in either set.
    #[must_use]
    pub fn union(&self, other: &ComponentSet) -> ComponentSet {
        self.types.union(&other.types).copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over the types in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.types.iter().copied()
    }
}

impl FromIterator<ComponentTypeId> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = ComponentTypeId>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for ComponentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, ty) in self.types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty}")?;
        }
        write!(f, "}}")
    }
}
