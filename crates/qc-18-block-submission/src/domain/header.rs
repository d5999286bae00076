//! Positional block header codec
//!
//! Layout (little-endian integers, hashes in wire order):
//!
//! ```text
//! offset  width  field
//!      0      4  version          i32
//!      4     32  prev_block_hash
//!     36     32  merkle_root
//!     68      4  time             u32
//!     72      8  difficulty       u64
//!     80      4  nonce            u32
//!     84      2  shift            u16
//!     86         (end of header)
//! ```

use super::entities::BlockHeader;
use crate::error::{Result, SubmissionError};
use crate::utils::hashing::sha256d_h256;
use crate::HEADER_SIZE;
use byteorder::{LittleEndian, ReadBytesExt};
use primitive_types::H256;
use std::io::{Cursor, Read};

/// Offset of the `time` field
pub const TIME_OFFSET: usize = 68;

/// Offset of the `difficulty` field
pub const DIFFICULTY_OFFSET: usize = 72;

/// Offset of the `nonce` field
pub const NONCE_OFFSET: usize = 80;

/// Offset of the `shift` field
pub const SHIFT_OFFSET: usize = 84;

/// Bytes covered by the block hash (everything before `shift`)
pub const HASHED_HEADER_SIZE: usize = SHIFT_OFFSET;

impl BlockHeader {
    /// Decode the header from the front of `bytes`.
    ///
    /// Only the first [`HEADER_SIZE`] bytes are read; anything after them is
    /// left to the caller.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(SubmissionError::TruncatedSubmission {
                length: bytes.len(),
                minimum: HEADER_SIZE,
            });
        }

        let mut cursor = Cursor::new(&bytes[..HEADER_SIZE]);
        Self::read_fields(&mut cursor).map_err(|_| SubmissionError::TruncatedSubmission {
            length: bytes.len(),
            minimum: HEADER_SIZE,
        })
    }

    fn read_fields(cursor: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        let version = cursor.read_i32::<LittleEndian>()?;
        let prev_block_hash = read_hash(cursor)?;
        let merkle_root = read_hash(cursor)?;
        let time = cursor.read_u32::<LittleEndian>()?;
        let difficulty = cursor.read_u64::<LittleEndian>()?;
        let nonce = cursor.read_u32::<LittleEndian>()?;
        let shift = cursor.read_u16::<LittleEndian>()?;

        Ok(Self {
            version,
            prev_block_hash,
            merkle_root,
            time,
            difficulty,
            nonce,
            shift,
        })
    }

    /// Encode back into the fixed wire layout
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..TIME_OFFSET].copy_from_slice(self.merkle_root.as_bytes());
        out[TIME_OFFSET..DIFFICULTY_OFFSET].copy_from_slice(&self.time.to_le_bytes());
        out[DIFFICULTY_OFFSET..NONCE_OFFSET].copy_from_slice(&self.difficulty.to_le_bytes());
        out[NONCE_OFFSET..SHIFT_OFFSET].copy_from_slice(&self.nonce.to_le_bytes());
        out[SHIFT_OFFSET..HEADER_SIZE].copy_from_slice(&self.shift.to_le_bytes());
        out
    }

    /// Block hash: double SHA-256 over version..nonce (shift excluded)
    pub fn hash(&self) -> H256 {
        sha256d_h256(&self.to_bytes()[..HASHED_HEADER_SIZE])
    }
}

fn read_hash(cursor: &mut Cursor<&[u8]>) -> std::io::Result<H256> {
    let mut buf = [0u8; 32];
    cursor.read_exact(&mut buf)?;
    Ok(H256::from(buf))
}
