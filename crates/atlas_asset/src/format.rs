//! On-disk asset header layout.

/// Magic number gating every asset blob: the ASCII bytes `"ATLS"` read as a
/// little-endian `u32`. Readers reject any blob whose header does not open
/// with this value.
pub const ASSET_MAGIC: u32 = 0x4154_4C53;

/// The current on-disk format version written by [`crate::codec::write_graph`].
pub const ASSET_VERSION: u16 = 1;

/// The kind of payload an asset blob carries.
///
/// Only [`AssetType::Graph`] is read/written by the core today; the
/// remaining variants are carried forward from the original asset format
/// so the header stays forward-compatible with asset kinds a fuller
/// authoring pipeline may add later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum AssetType {
    /// A compiled bytecode graph — the only kind `atlas_asset` round-trips.
    Graph = 0,
    World = 1,
    Planet = 2,
    Galaxy = 3,
    Mesh = 4,
    Material = 5,
    Mechanic = 6,
    VoxelSchema = 7,
    GameType = 8,
    EditorProfile = 9,
}

impl AssetType {
    /// Decodes a raw `u16` type tag. Unknown values fall back to `Graph`
    /// rather than failing the whole read — the type tag is advisory for
    /// every operation the core actually performs.
    #[must_use]
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => AssetType::Graph,
            1 => AssetType::World,
            2 => AssetType::Planet,
            3 => AssetType::Galaxy,
            4 => AssetType::Mesh,
            5 => AssetType::Material,
            6 => AssetType::Mechanic,
            7 => AssetType::VoxelSchema,
            8 => AssetType::GameType,
            9 => AssetType::EditorProfile,
            _ => AssetType::Graph,
        }
    }

    #[must_use]
    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

/// The fixed-size header prefixing every asset blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetHeader {
    /// Must equal [`ASSET_MAGIC`] for the blob to be accepted.
    pub magic: u32,
    /// Format version. Not validated today; reserved for a future gate.
    pub version: u16,
    /// The payload kind.
    pub asset_type: AssetType,
    /// Advisory byte count of the payload that follows. Not validated on
    /// read.
    pub size: u32,
    /// Reserved content hash. Writers may set `0`; never validated on read.
    pub hash: u64,
}

impl AssetHeader {
    /// Builds a header for a `Graph` payload of the given advisory size.
    #[must_use]
    pub fn for_graph(size: u32) -> Self {
        Self {
            magic: ASSET_MAGIC,
            version: ASSET_VERSION,
            asset_type: AssetType::Graph,
            size,
            hash: 0,
        }
    }
}
