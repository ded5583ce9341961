//! Bit-level cell serialization
//!
//! TON represents all serialized data as *cells*: up to 1023 data bits plus
//! up to 4 references to child cells, forming a directed acyclic graph. The
//! wallet message layout is a single cell tree, so this module provides
//! exactly what the builder needs:
//!
//! - [`CellBuilder`]: the mutable, append-only phase. Fields are stored
//!   big-endian, most significant bit first.
//! - [`Cell`]: the frozen phase. Finalizing a builder consumes it, so a cell
//!   can never be mutated after its representation hash (and therefore its
//!   signature) exists.
//! - [`CellSlice`]: a cursor for reading a frozen cell back, field by field.
//!
//! Signatures are detached Ed25519 over [`Cell::repr_hash`], the standard
//! representation hash (descriptor bytes, tag-padded data, child depths and
//! hashes).

mod builder;
mod errors;
mod slice;
mod tree;

pub use builder::CellBuilder;
pub use errors::CellError;
pub use slice::CellSlice;
pub use tree::Cell;

/// Maximum number of data bits a single cell can hold.
pub const MAX_CELL_BITS: usize = 1023;

/// Maximum number of child references a single cell can hold.
pub const MAX_CELL_REFS: usize = 4;
