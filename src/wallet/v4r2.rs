//! External-message assembly and signing for the v4r2 wallet contract
//!
//! The contract verifies a fixed layout, so field order here is load-bearing:
//!
//! ```text
//! unsigned payload:  subwallet_id:u32 | valid_until:u32 | seqno:u32 | op:i8
//!                    then per transfer: mode:u8 + ref(inner message)
//! envelope:          signature:512 bits | payload bits | payload refs
//! ```
//!
//! The signature is a detached Ed25519 over the finalized payload's
//! representation hash, computed only after the payload is frozen. The
//! builder-then-cell split in [`crate::cell`] is what guarantees nothing can
//! be appended to a payload that already has a signature.

use std::sync::Arc;

use ed25519_dalek::{SigningKey, VerifyingKey};
use tracing::debug;

use super::errors::WalletError;
use super::seqno::{resolve_seqno, TonTransport};
use super::transfer::Transfer;
use super::types::{Address, BlockId, Clock, SystemClock};
use crate::cell::{Cell, CellBuilder};

/// The v4 contract processes at most this many transfers per message; the
/// payload cell simply has no room for a fifth reference.
pub const MAX_TRANSFERS: usize = 4;

/// Default subwallet id used by virtually all single-wallet deployments.
pub const DEFAULT_SUBWALLET_ID: u32 = 698983191;

/// Opcode for a plain transfer request (the only one this builder emits;
/// the remaining v4 opcodes drive the plugin extension, which is out of
/// scope here).
const OP_TRANSFER: i8 = 0;

/// Builds and signs external messages for one v4r2 wallet account.
///
/// Holds no mutable state; every [`Self::build_message`] call owns its
/// payload exclusively from construction through signing, so concurrent
/// builds for different accounts need no coordination. Two un-serialized
/// builds against the *same* account can observe the same seqno; callers
/// needing strict ordering must serialize per account.
pub struct WalletV4R2 {
    key: SigningKey,
    address: Address,
    subwallet_id: u32,
    message_ttl: u32,
    clock: Arc<dyn Clock>,
}

impl WalletV4R2 {
    /// Wallet with the default subwallet id and a 60-second message TTL.
    pub fn new(key: SigningKey, address: Address) -> Self {
        Self {
            key,
            address,
            subwallet_id: DEFAULT_SUBWALLET_ID,
            message_ttl: 60,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_subwallet_id(mut self, subwallet_id: u32) -> Self {
        self.subwallet_id = subwallet_id;
        self
    }

    /// Seconds a signed message stays valid after building.
    pub fn with_message_ttl(mut self, ttl_seconds: u32) -> Self {
        self.message_ttl = ttl_seconds;
        self
    }

    /// Replace the wall clock, mainly for tests that pin `valid_until`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn subwallet_id(&self) -> u32 {
        self.subwallet_id
    }

    /// Public half of the signing key, for local signature checks.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// Build, sign, and envelope one external message carrying `transfers`.
    ///
    /// Resolves the seqno first (0 with no I/O when `initialized` is false,
    /// an on-chain read against `block` otherwise), then serializes the
    /// unsigned payload in contract order, signs its representation hash,
    /// and prepends the signature. No partial envelope is ever returned on
    /// an error path.
    pub async fn build_message(
        &self,
        transport: &dyn TonTransport,
        initialized: bool,
        block: &BlockId,
        transfers: &[Transfer],
    ) -> Result<SignedEnvelope, WalletError> {
        if transfers.len() > MAX_TRANSFERS {
            return Err(WalletError::TooManyTransfers {
                count: transfers.len(),
                max: MAX_TRANSFERS,
            });
        }

        let seqno = resolve_seqno(transport, initialized, block, &self.address).await?;

        let valid_until = self
            .clock
            .unix_now()
            .saturating_add(u64::from(self.message_ttl)) as u32;

        let mut payload = CellBuilder::new();
        payload
            .store_uint(u64::from(self.subwallet_id), 32)?
            .store_uint(u64::from(valid_until), 32)?
            .store_uint(u64::from(seqno), 32)?
            .store_int(i64::from(OP_TRANSFER), 8)?;

        for (index, transfer) in transfers.iter().enumerate() {
            let inner = transfer
                .message()
                .to_cell()
                .map_err(|source| WalletError::Serialization { index, source })?;
            payload
                .store_uint(u64::from(transfer.mode()), 8)?
                .store_ref(inner)?;
        }

        let payload = payload.build();
        let signature = payload.sign(&self.key);

        let mut envelope = CellBuilder::new();
        envelope.store_slice(&signature, 512)?;
        envelope.store_cell(&payload)?;
        let message = envelope.build();

        debug!(
            account = %self.address,
            seqno,
            valid_until,
            transfers = transfers.len(),
            "signed external message"
        );

        Ok(SignedEnvelope {
            signature,
            payload,
            message,
        })
    }
}

/// The finished artifact: the detached signature, the unsigned payload it
/// covers, and the transmittable envelope combining the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    signature: [u8; 64],
    payload: Cell,
    message: Cell,
}

impl SignedEnvelope {
    /// The 512-bit detached signature.
    pub fn signature(&self) -> &[u8; 64] {
        &self.signature
    }

    /// The finalized unsigned payload the signature covers.
    pub fn payload(&self) -> &Cell {
        &self.payload
    }

    /// The envelope handed to the network: signature first, then the whole
    /// payload.
    pub fn message(&self) -> &Cell {
        &self.message
    }

    pub fn into_message(self) -> Cell {
        self.message
    }

    /// Check the signature against the payload's representation hash.
    pub fn verify(&self, key: &VerifyingKey) -> bool {
        self.payload.verify(key, &self.signature)
    }
}
