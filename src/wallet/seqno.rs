//! Sequence-number resolution
//!
//! Replay protection for external messages: each message carries the
//! account's current seqno and the contract increments it on acceptance.
//! An uninitialized account always starts at 0 with no network read; an
//! initialized one is queried through the read-only `seqno` get-method.
//!
//! Cancellation follows normal future semantics: dropping the in-flight
//! call abandons it, and transports that enforce their own deadline report
//! [`TransportError::Timeout`] or [`TransportError::Cancelled`].

use async_trait::async_trait;
use tracing::debug;

use super::errors::{TransportError, WalletError};
use super::types::{Address, BlockId};
use crate::cell::Cell;

/// One dynamically-typed value from a get-method result stack.
///
/// Replies are checked once, at this boundary; the rest of the crate only
/// ever sees a typed integer.
#[derive(Debug, Clone, PartialEq)]
pub enum StackValue {
    Int(i64),
    Cell(Cell),
    Null,
}

impl StackValue {
    /// The integer payload, if this value is integer-shaped.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StackValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Human-readable shape name for error reporting.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackValue::Int(_) => "int",
            StackValue::Cell(_) => "cell",
            StackValue::Null => "null",
        }
    }
}

/// Read-only access to on-chain contract state.
///
/// The wallet core issues exactly one kind of call through this seam: the
/// `seqno` get-method against a caller-chosen reference block.
#[async_trait]
pub trait TonTransport: Send + Sync {
    /// Execute a read-only get-method and return its result stack.
    async fn run_get_method(
        &self,
        block: &BlockId,
        account: &Address,
        method: &str,
    ) -> Result<Vec<StackValue>, TransportError>;
}

/// Resolve the next valid sequence number for `account`.
///
/// Returns 0 without any I/O when the account is not initialized yet.
/// Otherwise the reply must be a single integer that fits 32 bits;
/// out-of-range values are a hard [`WalletError::SeqnoOutOfRange`], never
/// silently truncated.
pub async fn resolve_seqno(
    transport: &dyn TonTransport,
    initialized: bool,
    block: &BlockId,
    account: &Address,
) -> Result<u32, WalletError> {
    if !initialized {
        debug!(account = %account, "account not initialized, seqno starts at 0");
        return Ok(0);
    }

    let stack = transport.run_get_method(block, account, "seqno").await?;

    let value = stack.first().ok_or(WalletError::UnexpectedReply {
        expected: "one int",
        got: "empty stack".to_string(),
    })?;
    let raw = value.as_int().ok_or_else(|| WalletError::UnexpectedReply {
        expected: "one int",
        got: value.type_name().to_string(),
    })?;
    let seqno = u32::try_from(raw).map_err(|_| WalletError::SeqnoOutOfRange { value: raw })?;

    debug!(account = %account, seqno, "resolved on-chain seqno");
    Ok(seqno)
}
