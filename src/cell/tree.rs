//! The frozen phase of cell construction
//!
//! A [`Cell`] is immutable from the moment it leaves the builder. Its
//! representation hash is computed once at finalization, which makes the
//! cell content-addressed: anything that would change the serialized bits
//! or the reference tree changes the hash, and with it any signature made
//! over the cell.

use std::fmt;
use std::sync::Arc;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

use super::CellSlice;

/// An immutable, content-addressed cell: up to 1023 data bits and up to 4
/// references to child cells.
#[derive(Clone)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
    depth: u16,
    hash: [u8; 32],
}

impl Cell {
    /// Freeze builder output. The representation hash and depth are fixed
    /// here and never recomputed.
    pub(super) fn from_parts(data: Vec<u8>, bit_len: usize, refs: Vec<Arc<Cell>>) -> Self {
        let depth = refs.iter().map(|r| r.depth + 1).max().unwrap_or(0);
        let hash = Self::compute_repr_hash(&data, bit_len, &refs);
        Self {
            data,
            bit_len,
            refs,
            depth,
            hash,
        }
    }

    /// Standard representation: descriptor bytes, data padded with a
    /// completion tag, then each child's depth and hash.
    fn compute_repr_hash(data: &[u8], bit_len: usize, refs: &[Arc<Cell>]) -> [u8; 32] {
        let full_bytes = bit_len / 8;
        let stored_bytes = bit_len.div_ceil(8);

        let mut repr = Vec::with_capacity(2 + stored_bytes + refs.len() * 34);
        repr.push(refs.len() as u8); // d1, level 0, ordinary
        repr.push((full_bytes + stored_bytes) as u8); // d2
        repr.extend_from_slice(&data[..stored_bytes]);
        if bit_len % 8 != 0 {
            // completion tag on the first unused bit of the last byte
            let last = repr.len() - 1;
            repr[last] |= 0x80 >> (bit_len % 8);
        }
        for r in refs {
            repr.extend_from_slice(&r.depth.to_be_bytes());
        }
        for r in refs {
            repr.extend_from_slice(&r.hash);
        }

        Sha256::digest(&repr).into()
    }

    /// Data bits, packed most significant bit first.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of data bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Child references, in store order.
    pub fn refs(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    /// Child reference by index.
    pub fn reference(&self, index: usize) -> Option<&Arc<Cell>> {
        self.refs.get(index)
    }

    /// Height of the reference tree below this cell.
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// The representation hash this cell is addressed (and signed) by.
    pub fn repr_hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Start reading the cell back from the first bit.
    pub fn parse(&self) -> CellSlice<'_> {
        CellSlice::new(self)
    }

    /// Detached Ed25519 signature over the representation hash.
    pub fn sign(&self, key: &SigningKey) -> [u8; 64] {
        key.sign(&self.hash).to_bytes()
    }

    /// Check a detached signature over the representation hash.
    pub fn verify(&self, key: &VerifyingKey, signature: &[u8; 64]) -> bool {
        key.verify(&self.hash, &Signature::from_bytes(signature))
            .is_ok()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Cell {}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("bit_len", &self.bit_len)
            .field("refs", &self.refs.len())
            .field("hash", &hex::encode(self.hash))
            .finish()
    }
}
