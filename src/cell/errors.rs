//! Error types for cell serialization and deserialization

use thiserror::Error;

/// Errors raised while packing bits into a [`super::CellBuilder`] or reading
/// them back through a [`super::CellSlice`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// Appending would exceed the 1023-bit data capacity of a cell
    #[error("cell data overflow: {stored} bits stored, cannot append {requested} more (limit {limit})")]
    BitsOverflow {
        stored: usize,
        requested: usize,
        limit: usize,
    },

    /// Appending would exceed the 4-reference capacity of a cell
    #[error("cell reference overflow: {stored} references stored, cannot append {requested} more (limit {limit})")]
    RefsOverflow {
        stored: usize,
        requested: usize,
        limit: usize,
    },

    /// The value does not fit into the requested bit width
    #[error("value {value:#x} does not fit into {bits} bits")]
    ValueOutOfRange { value: u64, bits: u32 },

    /// The signed value does not fit into the requested bit width
    #[error("signed value {value} does not fit into {bits} bits")]
    SignedValueOutOfRange { value: i64, bits: u32 },

    /// Integer stores support widths of 1 through 64 bits
    #[error("unsupported integer width of {bits} bits (expected 1..=64)")]
    UnsupportedWidth { bits: u32 },

    /// A read ran past the end of the cell's data bits
    #[error("cell underflow: tried to read {requested} bits with {remaining} remaining")]
    DataUnderflow { requested: usize, remaining: usize },

    /// A read ran past the end of the cell's references
    #[error("cell underflow: tried to load reference {index} of a cell with {available}")]
    RefsUnderflow { index: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = CellError::BitsOverflow {
            stored: 1000,
            requested: 64,
            limit: 1023,
        };
        assert_eq!(
            err.to_string(),
            "cell data overflow: 1000 bits stored, cannot append 64 more (limit 1023)"
        );

        let err = CellError::ValueOutOfRange { value: 256, bits: 8 };
        assert_eq!(err.to_string(), "value 0x100 does not fit into 8 bits");
    }
}
