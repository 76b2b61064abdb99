//! Registry of [`ComponentDescriptor`]s, used by [`crate::snapshot`] to
//! serialize and restore type-erased component data without the [`World`]
//! ever needing to know a concrete Rust type.
//!
//! [`World`]: crate::world::World

use std::collections::HashMap;

use atlas_component::{Component, ComponentDescriptor, ComponentTypeId};

/// A host-populated table of component descriptors, one per component type
/// the world is expected to snapshot.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    descriptors: HashMap<ComponentTypeId, ComponentDescriptor>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T`'s descriptor, overwriting any prior registration for
    /// the same type.
    pub fn register<T: Component>(&mut self) {
        let descriptor = T::descriptor();
        self.descriptors.insert(descriptor.type_id, descriptor);
    }

    /// Looks up the descriptor for a given type id.
    #[must_use]
    pub fn get(&self, type_id: ComponentTypeId) -> Option<&ComponentDescriptor> {
        self.descriptors.get(&type_id)
    }

    /// Returns the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no descriptors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
