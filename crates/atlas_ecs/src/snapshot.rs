//! World snapshot serialization — the integration seam between the ECS and
//! the networking layer's opaque `WorldSnapshot.ecsState` byte buffer.
//!
//! Layout (little-endian, in the same manual-encoding idiom as the asset
//! codec): roster order, then per entity an `(EntityId, componentCount)`
//! header followed by `componentCount` many `(ComponentTypeId, payloadLen,
//! payload)` triples. Component types with no registered descriptor are
//! skipped on write and reported on read rather than silently dropped.

use thiserror::Error;

use atlas_component::{ComponentTypeId, Entity};

use crate::registry::ComponentRegistry;
use crate::world::World;

/// Errors produced while restoring a world from a snapshot buffer.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The buffer ended before a complete record could be read.
    #[error("snapshot buffer truncated")]
    Truncated,
    /// A component type id in the buffer has no registered descriptor.
    #[error("no descriptor registered for component type {0:?}")]
    UnknownComponentType(ComponentTypeId),
    /// A registered descriptor's `deserialize_fn` rejected a payload.
    #[error("failed to decode component payload: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Serializes `world`'s entities and components into an opaque byte buffer.
///
/// Component types with no descriptor in `registry` are skipped — the
/// buffer only round-trips components the host has registered.
#[must_use]
pub fn snapshot(world: &World, registry: &ComponentRegistry) -> Vec<u8> {
    let mut out = Vec::new();
    let entities = world.entities();
    out.extend_from_slice(&(entities.len() as u32).to_le_bytes());

    for &entity in entities {
        let components: Vec<(ComponentTypeId, Vec<u8>)> = world
            .erased_components(entity)
            .filter_map(|(type_id, value)| {
                let descriptor = registry.get(type_id)?;
                let bytes = (descriptor.serialize_fn)(value).ok()?;
                Some((type_id, bytes))
            })
            .collect();

        out.extend_from_slice(&entity.id().to_le_bytes());
        out.extend_from_slice(&(components.len() as u32).to_le_bytes());
        for (type_id, bytes) in components {
            out.extend_from_slice(&type_id.0.to_le_bytes());
            out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            out.extend_from_slice(&bytes);
        }
    }

    out
}

/// Replaces `world`'s entities and components with the roster encoded in
/// `bytes`, resolving component payloads through `registry`.
///
/// On error, `world` is left cleared (the restore does not partially apply
/// a subset of entities and then stop silently).
pub fn restore_from(
    world: &mut World,
    bytes: &[u8],
    registry: &ComponentRegistry,
) -> Result<(), SnapshotError> {
    let mut cursor = Cursor::new(bytes);
    let entity_count = cursor.read_u32()?;

    world.clear_entities();

    for _ in 0..entity_count {
        let entity = Entity::from_raw(cursor.read_u64()?);
        world.insert_entity_raw(entity);

        let component_count = cursor.read_u32()?;
        for _ in 0..component_count {
            let type_id = ComponentTypeId(cursor.read_u64()?);
            let len = cursor.read_u32()? as usize;
            let payload = cursor.read_bytes(len)?;

            let descriptor = registry
                .get(type_id)
                .ok_or(SnapshotError::UnknownComponentType(type_id))?;
            let value = (descriptor.deserialize_fn)(payload)?;
            world.insert_erased(entity, type_id, value);
        }
    }

    Ok(())
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], SnapshotError> {
        let end = self.pos.checked_add(len).ok_or(SnapshotError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(SnapshotError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, SnapshotError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn read_u64(&mut self) -> Result<u64, SnapshotError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }
}
