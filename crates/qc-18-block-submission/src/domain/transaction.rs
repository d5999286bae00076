//! Transaction vector deserialization
//!
//! The blob is a CompactSize count followed by that many transactions. Every
//! read is bounds-checked against the remaining buffer, and vector
//! pre-allocation is capped by what the remaining bytes could actually hold.

use super::entities::{OutPoint, Transaction, TxIn, TxOut};
use crate::config::TrailingBytesPolicy;
use crate::error::{Result, SubmissionError};
use byteorder::{LittleEndian, ReadBytesExt};
use primitive_types::H256;
use std::io::{Cursor, Read};
use tracing::debug;

/// Largest length a CompactSize prefix may declare
pub const MAX_COMPACT_SIZE: u64 = 0x0200_0000;

/// Smallest possible transaction: version, two empty counts, lock time
const MIN_TX_SIZE: usize = 4 + 1 + 1 + 4;

/// Smallest possible input: outpoint, empty script, sequence
const MIN_TXIN_SIZE: usize = 32 + 4 + 1 + 4;

/// Smallest possible output: value, empty script
const MIN_TXOUT_SIZE: usize = 8 + 1;

/// Limits applied while decoding a transaction blob
#[derive(Copy, Clone, Debug)]
pub struct TxDecodeLimits {
    /// Maximum declared transaction count
    pub max_transactions: usize,

    /// Handling of bytes after the vector
    pub trailing: TrailingBytesPolicy,
}

impl Default for TxDecodeLimits {
    fn default() -> Self {
        Self {
            max_transactions: crate::DEFAULT_MAX_TRANSACTIONS,
            trailing: TrailingBytesPolicy::Ignore,
        }
    }
}

/// Decode a CompactSize-prefixed list of transactions.
///
/// An empty buffer has no count prefix and fails; `[0x00]` is the empty list.
pub fn decode_transactions(bytes: &[u8], limits: TxDecodeLimits) -> Result<Vec<Transaction>> {
    let mut reader = WireReader::new(bytes);

    let count = reader.read_length("transaction count")?;
    if count > limits.max_transactions {
        return Err(decode_failure(format!(
            "transaction count {} exceeds limit {}",
            count, limits.max_transactions
        )));
    }

    let mut transactions = Vec::with_capacity(reader.capacity_hint(count, MIN_TX_SIZE));
    for i in 0..count {
        let tx = reader
            .read_transaction()
            .map_err(|e| decode_failure(format!("transaction {i}: {e}")))?;
        transactions.push(tx);
    }

    let trailing = reader.remaining();
    if trailing > 0 {
        match limits.trailing {
            TrailingBytesPolicy::Ignore => {
                debug!(trailing, "Ignoring bytes after transaction list");
            }
            TrailingBytesPolicy::Reject => {
                return Err(decode_failure(format!(
                    "{trailing} unexpected bytes after transaction list"
                )));
            }
        }
    }

    Ok(transactions)
}

fn decode_failure(reason: impl Into<String>) -> SubmissionError {
    SubmissionError::TransactionDecodeFailure(reason.into())
}

/// Bounds-checked little-endian reader over an untrusted buffer
struct WireReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> WireReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    /// Capacity to reserve for `count` items of at least `min_size` bytes
    fn capacity_hint(&self, count: usize, min_size: usize) -> usize {
        count.min(self.remaining() / min_size)
    }

    fn eof(what: &str) -> SubmissionError {
        decode_failure(format!("unexpected end of data reading {what}"))
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| Self::eof(what))
    }

    fn read_u16(&mut self, what: &str) -> Result<u16> {
        self.cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| Self::eof(what))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| Self::eof(what))
    }

    fn read_i32(&mut self, what: &str) -> Result<i32> {
        self.cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| Self::eof(what))
    }

    fn read_u64(&mut self, what: &str) -> Result<u64> {
        self.cursor
            .read_u64::<LittleEndian>()
            .map_err(|_| Self::eof(what))
    }

    fn read_i64(&mut self, what: &str) -> Result<i64> {
        self.cursor
            .read_i64::<LittleEndian>()
            .map_err(|_| Self::eof(what))
    }

    fn read_hash(&mut self, what: &str) -> Result<H256> {
        let mut buf = [0u8; 32];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| Self::eof(what))?;
        Ok(H256::from(buf))
    }

    /// Read a canonical CompactSize no larger than [`MAX_COMPACT_SIZE`]
    fn read_compact_size(&mut self, what: &str) -> Result<u64> {
        let value = match self.read_u8(what)? {
            tag @ 0..=0xFC => u64::from(tag),
            0xFD => {
                let v = u64::from(self.read_u16(what)?);
                if v < 0xFD {
                    return Err(decode_failure(format!("non-canonical size for {what}")));
                }
                v
            }
            0xFE => {
                let v = u64::from(self.read_u32(what)?);
                if v < 0x1_0000 {
                    return Err(decode_failure(format!("non-canonical size for {what}")));
                }
                v
            }
            0xFF => {
                let v = self.read_u64(what)?;
                if v < 0x1_0000_0000 {
                    return Err(decode_failure(format!("non-canonical size for {what}")));
                }
                v
            }
        };

        if value > MAX_COMPACT_SIZE {
            return Err(decode_failure(format!("size too large for {what}: {value}")));
        }
        Ok(value)
    }

    fn read_length(&mut self, what: &str) -> Result<usize> {
        // MAX_COMPACT_SIZE fits in usize on every supported target
        self.read_compact_size(what).map(|v| v as usize)
    }

    fn read_var_bytes(&mut self, what: &str) -> Result<Vec<u8>> {
        let len = self.read_length(what)?;
        if len > self.remaining() {
            return Err(Self::eof(what));
        }
        let mut buf = vec![0u8; len];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| Self::eof(what))?;
        Ok(buf)
    }

    fn read_transaction(&mut self) -> Result<Transaction> {
        let version = self.read_i32("version")?;

        let input_count = self.read_length("input count")?;
        let mut inputs = Vec::with_capacity(self.capacity_hint(input_count, MIN_TXIN_SIZE));
        for _ in 0..input_count {
            inputs.push(self.read_input()?);
        }

        let output_count = self.read_length("output count")?;
        let mut outputs = Vec::with_capacity(self.capacity_hint(output_count, MIN_TXOUT_SIZE));
        for _ in 0..output_count {
            outputs.push(self.read_output()?);
        }

        let lock_time = self.read_u32("lock time")?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    fn read_input(&mut self) -> Result<TxIn> {
        let hash = self.read_hash("prevout hash")?;
        let index = self.read_u32("prevout index")?;
        let script_sig = self.read_var_bytes("scriptSig")?;
        let sequence = self.read_u32("sequence")?;

        Ok(TxIn {
            prevout: OutPoint { hash, index },
            script_sig,
            sequence,
        })
    }

    fn read_output(&mut self) -> Result<TxOut> {
        let value = self.read_i64("output value")?;
        let script_pubkey = self.read_var_bytes("scriptPubKey")?;
        Ok(TxOut {
            value,
            script_pubkey,
        })
    }
}
