//! Checksummed description of the cell numbering.
//!
//! A rules engine running elsewhere can store or receive this blob and check
//! that "cell 27" means the same square on both sides.

use tracing::warn;

use crate::board::{self, PLAYABLE_CELLS};
use crate::error::{BoardError, LayoutError, Result};
use crate::types::GridPosition;

const MAGIC: &[u8; 4] = b"CKLY";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 20;

/// Encodes this crate's numbering:
/// magic, version, count, crc32 of payload, reserved, then one
/// `(column, row)` byte pair per cell index.
pub fn encode() -> Vec<u8> {
    let payload = payload();
    let crc = crc32fast::hash(&payload);

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(PLAYABLE_CELLS as u32).to_le_bytes());
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&payload);
    out
}

/// CRC-32 of the numbering payload.
pub fn checksum() -> u32 {
    crc32fast::hash(&payload())
}

/// Parses a descriptor and returns the position of each index it describes.
pub fn decode(data: &[u8]) -> Result<Vec<GridPosition>> {
    if data.len() < HEADER_SIZE {
        return Err(LayoutError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        }
        .into());
    }
    if &data[0..4] != MAGIC {
        return Err(LayoutError::BadMagic.into());
    }

    let version = read_u32_le(data, 4);
    if version != VERSION {
        return Err(LayoutError::UnsupportedVersion {
            expected: VERSION,
            actual: version,
        }
        .into());
    }

    let count = read_u32_le(data, 8) as usize;
    let expected_crc = read_u32_le(data, 12);
    let payload = &data[HEADER_SIZE..];

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(LayoutError::CrcMismatch {
            expected: expected_crc,
            actual: actual_crc,
        }
        .into());
    }

    if count.checked_mul(2) != Some(payload.len()) {
        return Err(LayoutError::BadLength {
            count,
            actual: payload.len(),
        }
        .into());
    }

    payload
        .chunks_exact(2)
        .map(|pair| GridPosition::new(pair[0] as i64, pair[1] as i64))
        .collect()
}

/// Decodes `data` and checks that it numbers the cells exactly as this crate does.
pub fn verify(data: &[u8]) -> Result<()> {
    let theirs = decode(data)?;
    let ours = board::positions();

    let mismatch = ours
        .iter()
        .zip(theirs.iter())
        .position(|(a, b)| a != b)
        .or_else(|| (theirs.len() != ours.len()).then(|| ours.len().min(theirs.len())));

    match mismatch {
        Some(index) => {
            warn!(index, "layout descriptor disagrees with board numbering");
            Err(BoardError::LayoutMismatch { index })
        }
        None => Ok(()),
    }
}

fn payload() -> Vec<u8> {
    board::positions()
        .iter()
        .flat_map(|p| [p.column, p.row])
        .collect()
}

// Callers check `data.len() >= HEADER_SIZE` first.
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
