//! Binary codec for compiled [`Bytecode`] blobs — the `.atlasb` format.
//!
//! Round-trip law: `read_graph(write_graph(bc)) == bc`, element-wise over
//! constants and instructions.

use std::path::Path;

use atlas_vm::{Bytecode, Instruction, OpCode};
use thiserror::Error;

use crate::format::{AssetHeader, ASSET_MAGIC, ASSET_VERSION};

/// Size in bytes of the fixed [`AssetHeader`] prefix.
const HEADER_LEN: usize = 4 + 2 + 2 + 4 + 8;
/// Size in bytes of one encoded [`Instruction`]: `opcode:u8, pad:u24, a,b,c:u32`.
const INSTRUCTION_LEN: usize = 1 + 3 + 4 + 4 + 4;

/// Errors produced by the asset codec.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The underlying filesystem operation failed.
    #[error("asset I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The blob's header did not open with [`ASSET_MAGIC`].
    #[error("asset blob has bad magic number")]
    BadMagic,
    /// The blob ended before a complete record could be read.
    #[error("asset blob truncated")]
    Truncated,
}

/// Writes `bytecode` to `path` as a `Graph`-typed asset blob.
pub fn write_graph(path: impl AsRef<Path>, bytecode: &Bytecode) -> Result<(), AssetError> {
    let payload_size = 4
        + bytecode.constants.len() * 8
        + 4
        + bytecode.instructions.len() * INSTRUCTION_LEN;
    let header = AssetHeader::for_graph(payload_size as u32);

    let mut out = Vec::with_capacity(HEADER_LEN + payload_size);
    encode_header(&header, &mut out);

    out.extend_from_slice(&(bytecode.constants.len() as u32).to_le_bytes());
    for value in &bytecode.constants {
        out.extend_from_slice(&value.to_le_bytes());
    }

    out.extend_from_slice(&(bytecode.instructions.len() as u32).to_le_bytes());
    for inst in &bytecode.instructions {
        encode_instruction(inst, &mut out);
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Reads a `Graph`-typed asset blob from `path`, reconstructing its
/// [`Bytecode`]. Rejects any blob whose magic does not match.
pub fn read_graph(path: impl AsRef<Path>) -> Result<Bytecode, AssetError> {
    let bytes = std::fs::read(path)?;
    let mut cursor = Cursor::new(&bytes);

    let header = decode_header(&mut cursor)?;
    if header.magic != ASSET_MAGIC {
        return Err(AssetError::BadMagic);
    }

    let const_count = cursor.read_u32()? as usize;
    let mut constants = Vec::with_capacity(const_count);
    for _ in 0..const_count {
        constants.push(cursor.read_i64()?);
    }

    let code_count = cursor.read_u32()? as usize;
    let mut instructions = Vec::with_capacity(code_count);
    for _ in 0..code_count {
        instructions.push(decode_instruction(&mut cursor)?);
    }

    Ok(Bytecode { constants, instructions })
}

fn encode_header(header: &AssetHeader, out: &mut Vec<u8>) {
    out.extend_from_slice(&header.magic.to_le_bytes());
    out.extend_from_slice(&header.version.to_le_bytes());
    out.extend_from_slice(&header.asset_type.to_u16().to_le_bytes());
    out.extend_from_slice(&header.size.to_le_bytes());
    out.extend_from_slice(&header.hash.to_le_bytes());
}

fn decode_header(cursor: &mut Cursor<'_>) -> Result<AssetHeader, AssetError> {
    let magic = cursor.read_u32()?;
    let version = cursor.read_u16()?;
    let asset_type = crate::format::AssetType::from_u16(cursor.read_u16()?);
    let size = cursor.read_u32()?;
    let hash = cursor.read_u64()?;
    Ok(AssetHeader {
        magic,
        version: if version == 0 { ASSET_VERSION } else { version },
        asset_type,
        size,
        hash,
    })
}

fn encode_instruction(inst: &Instruction, out: &mut Vec<u8>) {
    out.push(inst.opcode.to_byte());
    out.extend_from_slice(&[0u8; 3]);
    out.extend_from_slice(&inst.a.to_le_bytes());
    out.extend_from_slice(&inst.b.to_le_bytes());
    out.extend_from_slice(&inst.c.to_le_bytes());
}

fn decode_instruction(cursor: &mut Cursor<'_>) -> Result<Instruction, AssetError> {
    let opcode = OpCode::from_byte(cursor.read_u8()?);
    cursor.skip(3)?;
    let a = cursor.read_u32()?;
    let b = cursor.read_u32()?;
    let c = cursor.read_u32()?;
    Ok(Instruction { opcode, a, b, c })
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], AssetError> {
        let end = self.pos.checked_add(len).ok_or(AssetError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(AssetError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), AssetError> {
        self.read_bytes(len).map(|_| ())
    }

    fn read_u8(&mut self) -> Result<u8, AssetError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, AssetError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn read_u32(&mut self) -> Result<u32, AssetError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn read_u64(&mut self) -> Result<u64, AssetError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn read_i64(&mut self) -> Result<i64, AssetError> {
        let bytes = self.read_bytes(8)?;
        Ok(i64::from_le_bytes(bytes.try_into().unwrap()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips_element_wise() {
        let dir = std::env::temp_dir().join(format!(
            "atlas_asset_codec_test_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prog.atlasb");

        let bytecode = Bytecode {
            constants: vec![10, 20, 30],
            instructions: vec![
                Instruction::new(OpCode::LoadConst, 0),
                Instruction::new(OpCode::LoadConst, 1),
                Instruction::bare(OpCode::Add),
                Instruction::new(OpCode::StoreVar, 0),
                Instruction::bare(OpCode::End),
            ],
        };

        write_graph(&path, &bytecode).unwrap();
        let restored = read_graph(&path).unwrap();

        assert_eq!(restored.constants, bytecode.constants);
        assert_eq!(restored.instructions, bytecode.instructions);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn bad_magic_is_rejected() {
        let dir = std::env::temp_dir().join(format!(
            "atlas_asset_codec_badmagic_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.atlasb");
        std::fs::write(&path, [0u8; HEADER_LEN]).unwrap();

        let err = read_graph(&path).unwrap_err();
        assert!(matches!(err, AssetError::BadMagic));

        std::fs::remove_dir_all(&dir).ok();
    }
}
