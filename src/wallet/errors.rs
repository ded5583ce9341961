//! Error taxonomy for external-message building
//!
//! The builder performs no local recovery: every failure is wrapped with
//! enough context (offending index, observed value, reply shape) and
//! returned to the caller. Retry policy lives with the caller, guided by
//! [`WalletError::is_retryable`].

use thiserror::Error;

use crate::cell::CellError;

/// Failure surfaced by a [`super::TonTransport`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The RPC call failed network- or server-side
    #[error("rpc call failed: {message}")]
    Rpc { message: String },

    /// The transport's own deadline fired
    #[error("rpc call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The caller cancelled the call
    #[error("rpc call cancelled")]
    Cancelled,
}

/// Everything that can go wrong while building one external message.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Precondition failure: the v4 contract accepts at most 4 transfers
    /// per external message. Caller bug, never retried.
    #[error("at most {max} transfers can be sent in one external message, got {count}")]
    TooManyTransfers { count: usize, max: usize },

    /// The seqno lookup failed transport-side; propagated unmodified
    #[error("seqno lookup failed: {0}")]
    Transport(#[from] TransportError),

    /// The seqno get-method replied with something other than one integer.
    /// Indicates a protocol mismatch, treated as fatal.
    #[error("unexpected seqno reply: expected {expected}, got {got}")]
    UnexpectedReply {
        expected: &'static str,
        got: String,
    },

    /// The on-chain seqno does not fit the 32-bit wire field
    #[error("on-chain seqno {value} does not fit into 32 bits")]
    SeqnoOutOfRange { value: i64 },

    /// An inner message failed to serialize; carries the transfer index
    #[error("failed to serialize inner message {index}: {source}")]
    Serialization {
        index: usize,
        #[source]
        source: CellError,
    },

    /// The assembled message violated cell limits. With ≤4 transfers the
    /// layout always fits, so this indicates oversized caller input.
    #[error("message layout error: {0}")]
    Layout(#[from] CellError),
}

impl WalletError {
    /// Whether retrying the build might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(TransportError::Rpc { .. }) => true,
            Self::Transport(TransportError::Timeout { .. }) => true,
            Self::Transport(TransportError::Cancelled) => false,
            Self::TooManyTransfers { .. } => false,
            Self::UnexpectedReply { .. } => false,
            Self::SeqnoOutOfRange { .. } => false,
            Self::Serialization { .. } => false,
            Self::Layout(_) => false,
        }
    }

    /// Error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::TooManyTransfers { .. } => "precondition",
            Self::Transport(_) => "transport",
            Self::UnexpectedReply { .. } => "protocol",
            Self::SeqnoOutOfRange { .. } => "protocol",
            Self::Serialization { .. } => "serialization",
            Self::Layout(_) => "layout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = WalletError::TooManyTransfers { count: 5, max: 4 };
        assert_eq!(
            err.to_string(),
            "at most 4 transfers can be sent in one external message, got 5"
        );

        let err = WalletError::Transport(TransportError::Rpc {
            message: "connection reset".into(),
        });
        assert_eq!(err.to_string(), "seqno lookup failed: rpc call failed: connection reset");

        let err = WalletError::Serialization {
            index: 2,
            source: CellError::RefsOverflow {
                stored: 4,
                requested: 1,
                limit: 4,
            },
        };
        assert!(err.to_string().starts_with("failed to serialize inner message 2"));
    }

    #[test]
    fn retryability() {
        assert!(WalletError::Transport(TransportError::Rpc {
            message: "x".into()
        })
        .is_retryable());
        assert!(WalletError::Transport(TransportError::Timeout { timeout_ms: 500 }).is_retryable());

        assert!(!WalletError::Transport(TransportError::Cancelled).is_retryable());
        assert!(!WalletError::TooManyTransfers { count: 5, max: 4 }.is_retryable());
        assert!(!WalletError::UnexpectedReply {
            expected: "int",
            got: "null".into()
        }
        .is_retryable());
        assert!(!WalletError::SeqnoOutOfRange { value: -1 }.is_retryable());
    }

    #[test]
    fn categories() {
        assert_eq!(
            WalletError::TooManyTransfers { count: 5, max: 4 }.category(),
            "precondition"
        );
        assert_eq!(
            WalletError::Transport(TransportError::Cancelled).category(),
            "transport"
        );
        assert_eq!(
            WalletError::SeqnoOutOfRange { value: i64::MAX }.category(),
            "protocol"
        );
    }
}
