//! # atlas_asset
//!
//! The `.atlasb` binary codec for compiled bytecode graphs
//! ([`codec::write_graph`] / [`codec::read_graph`]) and the
//! [`registry::AssetRegistry`] that indexes asset files on disk and polls
//! for modifications.

pub mod codec;
pub mod format;
pub mod registry;

pub use codec::{read_graph, write_graph, AssetError};
pub use format::{AssetHeader, AssetType, ASSET_MAGIC, ASSET_VERSION};
pub use registry::{AssetEntry, AssetRegistry};
