//! One outgoing transfer and its send mode

use std::sync::Arc;

use crate::cell::{Cell, CellError};

/// Send-mode flag bits for one transfer.
///
/// Combined with bitwise OR and stored as the 8-bit mode field in front of
/// each inner-message reference.
pub mod send_mode {
    /// Pay forwarding fees from the wallet balance instead of the
    /// transferred amount.
    pub const PAY_GAS_SEPARATELY: u8 = 1;

    /// Ignore errors from this transfer during action-phase processing.
    pub const IGNORE_ERRORS: u8 = 2;

    /// Destroy the sending account if its balance reaches zero.
    pub const DESTROY_IF_ZERO: u8 = 32;

    /// Carry the entire remaining balance of the wallet.
    pub const CARRY_ALL_REMAINING_BALANCE: u8 = 128;
}

/// Anything that can serialize itself into a finalized cell.
///
/// Inner messages are opaque to the wallet core; they are serialized once
/// per build and attached as references in the signed payload.
pub trait SerializeCell: Send + Sync {
    fn to_cell(&self) -> Result<Cell, CellError>;
}

/// An already-finalized cell serializes to itself.
impl SerializeCell for Cell {
    fn to_cell(&self) -> Result<Cell, CellError> {
        Ok(self.clone())
    }
}

/// One outgoing transfer: the opaque inner message plus its send mode.
///
/// Owned by the caller and read-only to the builder; send order within a
/// message is significant and preserved.
#[derive(Clone)]
pub struct Transfer {
    message: Arc<dyn SerializeCell>,
    mode: u8,
}

impl Transfer {
    pub fn new(message: Arc<dyn SerializeCell>, mode: u8) -> Self {
        Self { message, mode }
    }

    /// Convenience constructor for an already-serialized inner message.
    pub fn from_cell(cell: Cell, mode: u8) -> Self {
        Self::new(Arc::new(cell), mode)
    }

    pub fn message(&self) -> &dyn SerializeCell {
        self.message.as_ref()
    }

    pub fn mode(&self) -> u8 {
        self.mode
    }
}

impl std::fmt::Debug for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transfer").field("mode", &self.mode).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellBuilder;

    #[test]
    fn finalized_cell_serializes_to_itself() {
        let mut b = CellBuilder::new();
        b.store_uint(99, 16).unwrap();
        let cell = b.build();
        let transfer = Transfer::from_cell(cell.clone(), send_mode::PAY_GAS_SEPARATELY | send_mode::IGNORE_ERRORS);
        assert_eq!(transfer.mode(), 3);
        assert_eq!(transfer.message().to_cell().unwrap(), cell);
    }
}
