//! External-message construction and signing for TON v4 wallet contracts.
//!
//! The crate builds the signed external message a `wallet v4r2` contract
//! expects when asked to execute up to four outgoing transfers in one
//! request: a bit-exact unsigned payload (subwallet id, expiry, seqno,
//! opcode, per-transfer mode + message reference) followed by a detached
//! Ed25519 signature over the payload's representation hash.
//!
//! Network access is behind the [`wallet::TonTransport`] trait; the only
//! call this crate issues is the read-only `seqno` get-method used for
//! replay protection.

pub mod cell;
pub mod wallet;

pub use cell::{Cell, CellBuilder, CellError, CellSlice};
pub use wallet::{
    resolve_seqno, Address, BlockId, Clock, Revision, SignedEnvelope, StackValue, SystemClock,
    TonTransport, Transfer, TransportError, WalletError, WalletV4R2,
};
