//! Core [`Component`] trait and the type-erasure machinery the sparse world
//! uses to store heterogeneous component values in one map.

use std::any::Any;

use serde::{Deserialize, Serialize};

/// A unique identifier for a component type, derived from [`std::any::TypeId`].
///
/// Two components of the same Rust type always produce the same
/// `ComponentTypeId`. The inner value is an opaque `u64` hash — do not rely
/// on its numeric value being stable across compiler versions or builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// Compute the [`ComponentTypeId`] for a concrete type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        use std::any::TypeId;
        use std::hash::{Hash, Hasher};
        let type_id = TypeId::of::<T>();
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        type_id.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// The core component trait.
///
/// All data stored in the world must implement this trait. Components must
/// be serialisable (so a [`ComponentDescriptor`] can snapshot them without
/// knowing the concrete type) and `Send + Sync` so a host embedding the
/// engine can move world state across a thread boundary even though the
/// core tick loop itself never does.
pub trait Component: Any + Send + Sync + Serialize + for<'de> Deserialize<'de> {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId
    where
        Self: Sized,
    {
        ComponentTypeId::of::<Self>()
    }

    /// Returns the [`ComponentDescriptor`] for this component type.
    fn descriptor() -> ComponentDescriptor
    where
        Self: Sized,
    {
        ComponentDescriptor {
            type_id: Self::component_type_id(),
            name: Self::type_name(),
            serialize_fn: |value: &dyn Any| {
                let value = value
                    .downcast_ref::<Self>()
                    .expect("descriptor invoked with mismatched component type");
                rmp_serde::to_vec(value)
            },
            deserialize_fn: |bytes: &[u8]| {
                let value: Self = rmp_serde::from_slice(bytes)?;
                Ok(Box::new(value))
            },
        }
    }

    /// Type-erases `self` for storage in the world's sparse component map.
    fn into_erased(self) -> Box<dyn Any + Send + Sync>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

/// Serialises a type-erased component back into MessagePack bytes.
pub type SerializeFn = fn(&dyn Any) -> Result<Vec<u8>, rmp_serde::encode::Error>;

/// Deserialises MessagePack bytes into a fresh type-erased component value.
pub type DeserializeFn =
    fn(&[u8]) -> Result<Box<dyn Any + Send + Sync>, rmp_serde::decode::Error>;

/// Metadata a host registers once per component type so the world can
/// snapshot and restore type-erased component data without knowing the
/// concrete Rust types involved.
#[derive(Clone, Copy)]
pub struct ComponentDescriptor {
    /// The unique type identifier this descriptor describes.
    pub type_id: ComponentTypeId,
    /// The human-readable name of the component (e.g. `"Health"`).
    pub name: &'static str,
    /// Serialise a single component instance to MessagePack bytes.
    pub serialize_fn: SerializeFn,
    /// Deserialise a single component instance from MessagePack bytes.
    pub deserialize_fn: DeserializeFn,
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_id", &self.type_id)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[test]
    fn test_component_type_id_is_stable() {
        let id1 = Health::component_type_id();
        let id2 = Health::component_type_id();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_component_type_id_differs_between_types() {
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        struct Velocity {
            x: f32,
            y: f32,
        }
        impl Component for Velocity {
            fn type_name() -> &'static str {
                "Velocity"
            }
        }

        assert_ne!(Health::component_type_id(), Velocity::component_type_id());
    }

    #[test]
    fn test_descriptor_name() {
        let d = Health::descriptor();
        assert_eq!(d.name, "Health");
    }

    #[test]
    fn test_descriptor_roundtrip() {
        let d = Health::descriptor();
        let health = Health {
            current: 80.0,
            max: 100.0,
        };
        let bytes = (d.serialize_fn)(&health).unwrap();
        let restored = (d.deserialize_fn)(&bytes).unwrap();
        let restored = restored.downcast_ref::<Health>().unwrap();
        assert_eq!(restored, &health);
    }
}
