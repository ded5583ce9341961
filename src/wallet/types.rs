//! Identifier and clock types shared across the wallet module

use std::fmt;

use chrono::Utc;

/// A TON account address: workchain plus the 256-bit account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    workchain: i32,
    hash: [u8; 32],
}

impl Address {
    pub fn new(workchain: i32, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    pub fn workchain(&self) -> i32 {
        self.workchain
    }

    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }
}

impl fmt::Display for Address {
    /// Raw form, e.g. `0:aabb...ff00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.hash))
    }
}

/// Reference block a read-only contract call is executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockId {
    pub workchain: i32,
    pub shard: u64,
    pub seqno: u32,
}

impl BlockId {
    pub fn new(workchain: i32, shard: u64, seqno: u32) -> Self {
        Self {
            workchain,
            shard,
            seqno,
        }
    }
}

/// Injected time source for message expiry.
///
/// Production code uses [`SystemClock`]; tests pin the clock to assert the
/// exact `valid_until` value that gets signed.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds.
    fn unix_now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> u64 {
        Utc::now().timestamp().max(0) as u64
    }
}
