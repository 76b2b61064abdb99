//! The sparse, archetype-free entity-component [`World`].
//!
//! Components are stored type-erased behind `Box<dyn Any + Send + Sync>`
//! keyed by [`ComponentTypeId`], one inner map per entity. There is no
//! archetype layer: adding or removing a component never moves an entity
//! between storage tables, trading iteration locality for API simplicity
//! and trivially clear snapshot semantics.

use std::any::Any;
use std::collections::HashMap;

use atlas_component::{Component, ComponentTypeId, Entity, EntityAllocator};

type ComponentMap = HashMap<ComponentTypeId, Box<dyn Any + Send + Sync>>;

/// Per-tick callback signature: `(dt_seconds) -> ()`.
pub type TickCallback = Box<dyn FnMut(f32)>;

/// The entity-component world.
///
/// Maintains insertion-ordered live entities and, per entity, a sparse map
/// from component type to type-erased component value.
pub struct World {
    allocator: EntityAllocator,
    roster: Vec<Entity>,
    components: HashMap<Entity, ComponentMap>,
    tick_callback: Option<TickCallback>,
}

impl World {
    /// Creates a new, empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            roster: Vec::new(),
            components: HashMap::new(),
            tick_callback: None,
        }
    }

    /// Allocates a new entity and appends it to the live roster.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.roster.push(entity);
        self.components.insert(entity, HashMap::new());
        entity
    }

    /// Removes an entity from the roster and drops its entire component map.
    ///
    /// Preserves the relative order of surviving entities. Returns `true` if
    /// the entity existed.
    pub fn destroy_entity(&mut self, id: Entity) -> bool {
        if self.components.remove(&id).is_none() {
            return false;
        }
        self.roster.retain(|&e| e != id);
        true
    }

    /// Returns `true` if `id` is present in the live roster.
    #[must_use]
    pub fn is_alive(&self, id: Entity) -> bool {
        self.components.contains_key(&id)
    }

    /// Returns live entities in creation order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.roster
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.roster.len()
    }

    /// Attaches a component to `id`, overwriting any existing component of
    /// the same type. Returns `false` if the entity does not exist.
    pub fn add_component<T: Component>(&mut self, id: Entity, value: T) -> bool {
        let Some(map) = self.components.get_mut(&id) else {
            return false;
        };
        map.insert(T::component_type_id(), Box::new(value));
        true
    }

    /// Returns a reference to `id`'s component of type `T`, if present.
    #[must_use]
    pub fn get_component<T: Component>(&self, id: Entity) -> Option<&T> {
        self.components
            .get(&id)?
            .get(&T::component_type_id())?
            .downcast_ref::<T>()
    }

    /// Returns a mutable reference to `id`'s component of type `T`, if present.
    pub fn get_component_mut<T: Component>(&mut self, id: Entity) -> Option<&mut T> {
        self.components
            .get_mut(&id)?
            .get_mut(&T::component_type_id())?
            .downcast_mut::<T>()
    }

    /// Returns `true` if `id` currently has a component of type `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, id: Entity) -> bool {
        self.components
            .get(&id)
            .is_some_and(|map| map.contains_key(&T::component_type_id()))
    }

    /// Removes `id`'s component of type `T`. Returns `true` if one was removed.
    pub fn remove_component<T: Component>(&mut self, id: Entity) -> bool {
        self.components
            .get_mut(&id)
            .is_some_and(|map| map.remove(&T::component_type_id()).is_some())
    }

    /// Returns the set of component types currently attached to `id`, in
    /// unspecified order.
    #[must_use]
    pub fn component_types(&self, id: Entity) -> Vec<ComponentTypeId> {
        self.components
            .get(&id)
            .map(|map| map.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Registers the per-tick callback, replacing any previous one.
    pub fn set_tick_callback(&mut self, callback: TickCallback) {
        self.tick_callback = Some(callback);
    }

    /// Invokes the registered tick callback (if any) with `dt`.
    pub fn update(&mut self, dt: f32) {
        if let Some(callback) = &mut self.tick_callback {
            callback(dt);
        }
    }

    /// Drops every entity and component, leaving the tick callback intact.
    ///
    /// Used by [`crate::snapshot::restore_from`] to reset world state before
    /// replaying a snapshot's roster.
    pub(crate) fn clear_entities(&mut self) {
        self.roster.clear();
        self.components.clear();
    }

    /// Appends `id` to the roster with an empty component map, bypassing
    /// the allocator. `id` must not already be present.
    ///
    /// Used by [`crate::snapshot::restore_from`] to recreate entities at
    /// their original ids.
    pub(crate) fn insert_entity_raw(&mut self, id: Entity) {
        self.allocator.bump_past(id.id());
        self.roster.push(id);
        self.components.insert(id, HashMap::new());
    }

    /// Inserts an already type-erased component value directly, bypassing
    /// the `Component` type parameter. Used by snapshot restoration, where
    /// the concrete type is only known through a [`ComponentTypeId`] looked
    /// up in a [`crate::registry::ComponentRegistry`].
    pub(crate) fn insert_erased(
        &mut self,
        id: Entity,
        type_id: ComponentTypeId,
        value: Box<dyn Any + Send + Sync>,
    ) {
        if let Some(map) = self.components.get_mut(&id) {
            map.insert(type_id, value);
        }
    }

    /// Iterates `id`'s components as `(type_id, &dyn Any)` pairs, in
    /// unspecified order. Used by snapshot serialization.
    pub(crate) fn erased_components(
        &self,
        id: Entity,
    ) -> impl Iterator<Item = (ComponentTypeId, &(dyn Any + Send + Sync))> {
        self.components
            .get(&id)
            .into_iter()
            .flat_map(|map| map.iter().map(|(ty, val)| (*ty, val.as_ref())))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entity_count", &self.entity_count())
            .field("has_tick_callback", &self.tick_callback.is_some())
            .finish()
    }
}
