//! # atlas_ecs
//!
//! The sparse, archetype-free entity-component [`World`](world::World), its
//! [`ComponentRegistry`](registry::ComponentRegistry) for snapshot support,
//! and the [`snapshot`] module implementing the opaque byte encoding the
//! networking layer treats as `WorldSnapshot.ecsState`.

pub mod registry;
pub mod snapshot;
pub mod world;

pub use registry::ComponentRegistry;
pub use snapshot::SnapshotError;
pub use world::{TickCallback, World};
