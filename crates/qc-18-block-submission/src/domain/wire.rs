//! Hex wire decoding for submitted blobs

use crate::error::{Result, SubmissionError};

/// Decode a hex string into bytes.
///
/// Accepts upper, lower and mixed case. Odd length or any non-hex character
/// (including a `0x` prefix or whitespace) is `MalformedEncoding`.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| SubmissionError::MalformedEncoding(e.to_string()))
}

/// Encode bytes as lowercase hex
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Number of bytes a hex string would decode to, if it were valid
#[inline]
pub fn decoded_len(s: &str) -> usize {
    s.len() / 2
}
