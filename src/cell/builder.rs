//! The mutable phase of cell construction
//!
//! A [`CellBuilder`] is append-only and capacity-checked: every store either
//! succeeds completely or leaves the builder untouched and returns a typed
//! [`CellError`]. Finalization consumes the builder, which is what makes the
//! building → finalized transition one-way at the type level.

use std::sync::Arc;

use super::{Cell, CellError, MAX_CELL_BITS, MAX_CELL_REFS};

/// Append-only writer for the data bits and references of one cell.
///
/// Integer stores are big-endian, most significant bit first, matching the
/// layout the wallet contract decodes on-chain.
#[derive(Debug, Default, Clone)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl CellBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data bits stored so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of references stored so far.
    pub fn refs_len(&self) -> usize {
        self.refs.len()
    }

    /// Data bits still available before the 1023-bit cap.
    pub fn remaining_bits(&self) -> usize {
        MAX_CELL_BITS - self.bit_len
    }

    fn ensure_bits(&self, requested: usize) -> Result<(), CellError> {
        if self.bit_len + requested > MAX_CELL_BITS {
            return Err(CellError::BitsOverflow {
                stored: self.bit_len,
                requested,
                limit: MAX_CELL_BITS,
            });
        }
        Ok(())
    }

    fn ensure_refs(&self, requested: usize) -> Result<(), CellError> {
        if self.refs.len() + requested > MAX_CELL_REFS {
            return Err(CellError::RefsOverflow {
                stored: self.refs.len(),
                requested,
                limit: MAX_CELL_REFS,
            });
        }
        Ok(())
    }

    /// Capacity must have been checked by the caller.
    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            self.data[self.bit_len / 8] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Append a single bit.
    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Append an unsigned integer as `bits` big-endian bits.
    ///
    /// Fails if the value does not fit the width, so a truncated field can
    /// never be signed by accident.
    pub fn store_uint(&mut self, value: u64, bits: u32) -> Result<&mut Self, CellError> {
        if bits == 0 || bits > 64 {
            return Err(CellError::UnsupportedWidth { bits });
        }
        if bits < 64 && value >> bits != 0 {
            return Err(CellError::ValueOutOfRange { value, bits });
        }
        self.ensure_bits(bits as usize)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Append a signed integer as `bits` big-endian two's-complement bits.
    pub fn store_int(&mut self, value: i64, bits: u32) -> Result<&mut Self, CellError> {
        if bits == 0 || bits > 64 {
            return Err(CellError::UnsupportedWidth { bits });
        }
        if bits < 64 {
            let min = -(1i64 << (bits - 1));
            let max = (1i64 << (bits - 1)) - 1;
            if value < min || value > max {
                return Err(CellError::SignedValueOutOfRange { value, bits });
            }
        }
        self.ensure_bits(bits as usize)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Append the first `bits` bits of `bytes`, most significant bit first.
    pub fn store_slice(&mut self, bytes: &[u8], bits: usize) -> Result<&mut Self, CellError> {
        debug_assert!(bits <= bytes.len() * 8, "store_slice bit count exceeds input");
        self.ensure_bits(bits)?;
        for i in 0..bits {
            self.push_bit(bytes[i / 8] & (0x80 >> (i % 8)) != 0);
        }
        Ok(self)
    }

    /// Append a reference to a finalized child cell.
    pub fn store_ref(&mut self, cell: Cell) -> Result<&mut Self, CellError> {
        self.store_ref_shared(Arc::new(cell))
    }

    /// Append a reference to an already-shared child cell.
    pub fn store_ref_shared(&mut self, cell: Arc<Cell>) -> Result<&mut Self, CellError> {
        self.ensure_refs(1)?;
        self.refs.push(cell);
        Ok(self)
    }

    /// Append the entire contents of a finalized cell: all of its data bits
    /// followed by all of its references, in order.
    ///
    /// This is the "prepend" half of the sign-then-prepend pattern: the
    /// envelope builder stores the signature first, then inlines the frozen
    /// payload with this method.
    pub fn store_cell(&mut self, cell: &Cell) -> Result<&mut Self, CellError> {
        self.ensure_bits(cell.bit_len())?;
        self.ensure_refs(cell.refs().len())?;
        for i in 0..cell.bit_len() {
            self.push_bit(cell.data()[i / 8] & (0x80 >> (i % 8)) != 0);
        }
        self.refs.extend(cell.refs().iter().cloned());
        Ok(self)
    }

    /// Finalize into an immutable [`Cell`], consuming the builder.
    pub fn build(self) -> Cell {
        Cell::from_parts(self.data, self.bit_len, self.refs)
    }
}
