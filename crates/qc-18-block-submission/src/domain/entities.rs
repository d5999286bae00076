//! Domain entities for block submission

use crate::utils::hashing::{merkle_root, sha256d_h256};
use primitive_types::H256;

/// Fixed-layout block header decoded from the first [`crate::HEADER_SIZE`] bytes.
///
/// Hash fields hold the raw wire bytes (no reversal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block format version
    pub version: i32,

    /// Hash of the previous block
    pub prev_block_hash: H256,

    /// Merkle root of the block's transactions
    pub merkle_root: H256,

    /// Unix timestamp
    pub time: u32,

    /// Difficulty target encoding
    pub difficulty: u64,

    /// PoW nonce
    pub nonce: u32,

    /// Proof shift parameter of the prime-gap PoW
    pub shift: u16,
}

/// Opaque PoW auxiliary bytes trailing the header, copied verbatim
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdditiveData(Vec<u8>);

impl AdditiveData {
    /// Wrap raw bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no bytes follow the header
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully reconstructed, not yet validated block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateBlock {
    /// Decoded header fields
    pub header: BlockHeader,

    /// PoW auxiliary data following the header
    pub additive_data: AdditiveData,

    /// Transactions; empty unless a transaction blob was supplied
    pub transactions: Vec<Transaction>,
}

impl CandidateBlock {
    /// Create a candidate with an empty transaction list
    pub fn new(header: BlockHeader, additive_data: AdditiveData) -> Self {
        Self {
            header,
            additive_data,
            transactions: Vec::new(),
        }
    }

    /// Block hash (see [`BlockHeader::hash`])
    pub fn hash(&self) -> H256 {
        self.header.hash()
    }

    /// Merkle root over the transaction ids, `None` without transactions
    pub fn compute_merkle_root(&self) -> Option<H256> {
        let txids: Vec<H256> = self.transactions.iter().map(Transaction::txid).collect();
        merkle_root(&txids)
    }
}

/// Reference to a previous transaction output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutPoint {
    /// Id of the referenced transaction
    pub hash: H256,

    /// Output index within that transaction
    pub index: u32,
}

/// Transaction input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxIn {
    /// Output being spent
    pub prevout: OutPoint,

    /// Unlocking script (not interpreted here)
    pub script_sig: Vec<u8>,

    /// Sequence number
    pub sequence: u32,
}

/// Transaction output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOut {
    /// Amount in base units
    pub value: i64,

    /// Locking script (not interpreted here)
    pub script_pubkey: Vec<u8>,
}

/// Transaction in the node's wire format
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version
    pub version: i32,

    /// Inputs
    pub inputs: Vec<TxIn>,

    /// Outputs
    pub outputs: Vec<TxOut>,

    /// Lock time
    pub lock_time: u32,
}

impl Transaction {
    /// Canonical wire serialization
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);

        out.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(input.prevout.hash.as_bytes());
            out.extend_from_slice(&input.prevout.index.to_le_bytes());
            write_compact_size(&mut out, input.script_sig.len() as u64);
            out.extend_from_slice(&input.script_sig);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            write_compact_size(&mut out, output.script_pubkey.len() as u64);
            out.extend_from_slice(&output.script_pubkey);
        }

        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }

    /// Transaction id: double SHA-256 of the serialization
    pub fn txid(&self) -> H256 {
        sha256d_h256(&self.serialize())
    }
}

/// Append a CompactSize length prefix in its shortest form
pub fn write_compact_size(out: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xFC => out.push(value as u8),
        0xFD..=0xFFFF => {
            out.push(0xFD);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.push(0xFE);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xFF);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Submission result as seen by the caller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Validation engine accepted the block
    Accepted,

    /// Validation engine refused the block under consensus rules
    Rejected,

    /// The submission could not be decoded into a block
    DecodeError(crate::error::DecodeErrorKind),

    /// The validation engine failed to produce a verdict
    EngineFailure(String),
}

impl SubmissionResult {
    /// True only for [`SubmissionResult::Accepted`]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TxIn {
                prevout: OutPoint {
                    hash: H256::zero(),
                    index: u32::MAX,
                },
                script_sig: vec![0x51],
                sequence: u32::MAX,
            }],
            outputs: vec![TxOut {
                value: 50_0000_0000,
                script_pubkey: vec![0x76, 0xA9],
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_compact_size_boundaries() {
        let mut out = Vec::new();
        write_compact_size(&mut out, 0xFC);
        assert_eq!(out, vec![0xFC]);

        out.clear();
        write_compact_size(&mut out, 0xFD);
        assert_eq!(out, vec![0xFD, 0xFD, 0x00]);

        out.clear();
        write_compact_size(&mut out, 0x1_0000);
        assert_eq!(out, vec![0xFE, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_transaction_serialize_layout() {
        let bytes = sample_tx().serialize();
        // version + vin count + outpoint + script len + script + sequence
        // + vout count + value + script len + script + lock time
        assert_eq!(bytes.len(), 4 + 1 + 36 + 1 + 1 + 4 + 1 + 8 + 1 + 2 + 4);
        assert_eq!(&bytes[0..4], &1i32.to_le_bytes());
    }

    #[test]
    fn test_txid_changes_with_content() {
        let a = sample_tx();
        let mut b = sample_tx();
        b.lock_time = 1;
        assert_ne!(a.txid(), b.txid());
    }

    #[test]
    fn test_candidate_merkle_root() {
        let header = BlockHeader {
            version: 2,
            prev_block_hash: H256::zero(),
            merkle_root: H256::zero(),
            time: 0,
            difficulty: 0,
            nonce: 0,
            shift: 0,
        };
        let mut block = CandidateBlock::new(header, AdditiveData::new(vec![0]));
        assert!(block.transactions.is_empty());
        assert_eq!(block.compute_merkle_root(), None);

        let tx = sample_tx();
        block.transactions.push(tx.clone());
        assert_eq!(block.compute_merkle_root(), Some(tx.txid()));
    }

    #[test]
    fn test_submission_result_accepted() {
        assert!(SubmissionResult::Accepted.is_accepted());
        assert!(!SubmissionResult::Rejected.is_accepted());
    }
}
