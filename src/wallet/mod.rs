//! Wallet v4 external-message core
//!
//! The module is split into focused pieces:
//! - **types**: account addresses, block identifiers, the injected clock
//! - **errors**: the error taxonomy for message building
//! - **code**: embedded v4r1/v4r2 contract bytecode images
//! - **transfer**: one outgoing transfer and its send-mode byte
//! - **seqno**: the sequence resolver and the `TonTransport` seam
//! - **v4r2**: payload assembly, signing, and the final envelope

pub mod code;
mod errors;
mod seqno;
mod transfer;
mod types;
mod v4r2;

pub use code::Revision;
pub use errors::{TransportError, WalletError};
pub use seqno::{resolve_seqno, StackValue, TonTransport};
pub use transfer::{send_mode, SerializeCell, Transfer};
pub use types::{Address, BlockId, Clock, SystemClock};
pub use v4r2::{SignedEnvelope, WalletV4R2, DEFAULT_SUBWALLET_ID, MAX_TRANSFERS};
