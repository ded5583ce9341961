//! Read cursor over a frozen cell

use std::sync::Arc;

use super::{Cell, CellError};

/// Cursor over the data bits and references of a [`Cell`].
///
/// Reads consume bits and references in store order; the underlying cell is
/// never modified.
#[derive(Debug, Clone)]
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    pub(super) fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    /// Data bits not yet consumed.
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    /// References not yet consumed.
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs().len() - self.ref_pos
    }

    fn ensure(&self, requested: usize) -> Result<(), CellError> {
        if requested > self.remaining_bits() {
            return Err(CellError::DataUnderflow {
                requested,
                remaining: self.remaining_bits(),
            });
        }
        Ok(())
    }

    /// Read one bit.
    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        self.ensure(1)?;
        let bit = self.cell.data()[self.bit_pos / 8] & (0x80 >> (self.bit_pos % 8)) != 0;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read `bits` big-endian bits as an unsigned integer.
    pub fn load_uint(&mut self, bits: u32) -> Result<u64, CellError> {
        if bits == 0 || bits > 64 {
            return Err(CellError::UnsupportedWidth { bits });
        }
        self.ensure(bits as usize)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.load_bit()?);
        }
        Ok(value)
    }

    /// Read `bits` big-endian two's-complement bits as a signed integer.
    pub fn load_int(&mut self, bits: u32) -> Result<i64, CellError> {
        let raw = self.load_uint(bits)?;
        if bits == 64 {
            return Ok(raw as i64);
        }
        // sign-extend
        let sign_bit = 1u64 << (bits - 1);
        if raw & sign_bit != 0 {
            Ok((raw | !(sign_bit | (sign_bit - 1))) as i64)
        } else {
            Ok(raw as i64)
        }
    }

    /// Read `bits` into a byte vector, most significant bit first.
    pub fn load_bytes(&mut self, bits: usize) -> Result<Vec<u8>, CellError> {
        self.ensure(bits)?;
        let mut out = vec![0u8; bits.div_ceil(8)];
        for i in 0..bits {
            if self.load_bit()? {
                out[i / 8] |= 0x80 >> (i % 8);
            }
        }
        Ok(out)
    }

    /// Skip `bits` without reading them.
    pub fn skip(&mut self, bits: usize) -> Result<&mut Self, CellError> {
        self.ensure(bits)?;
        self.bit_pos += bits;
        Ok(self)
    }

    /// Consume the next child reference.
    pub fn load_ref(&mut self) -> Result<&'a Arc<Cell>, CellError> {
        let cell = self
            .cell
            .reference(self.ref_pos)
            .ok_or(CellError::RefsUnderflow {
                index: self.ref_pos,
                available: self.cell.refs().len(),
            })?;
        self.ref_pos += 1;
        Ok(cell)
    }
}
