//! End-to-end tests for v4r2 external-message building
//!
//! Everything here goes through the public API only: a stub transport that
//! counts invocations, a pinned clock, and the cell reader to decode what
//! the contract would decode on-chain.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

use ton_wallet_v4::{
    wallet::send_mode, Address, BlockId, Cell, CellBuilder, CellError, Clock, SignedEnvelope,
    StackValue, TonTransport, Transfer, TransportError, WalletError, WalletV4R2,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn unix_now(&self) -> u64 {
        self.0
    }
}

/// Transport stub replaying one fixed reply and counting invocations.
struct CountingTransport {
    calls: AtomicUsize,
    reply: Result<Vec<StackValue>, TransportError>,
}

impl CountingTransport {
    fn replying(reply: Result<Vec<StackValue>, TransportError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply,
        }
    }

    fn seqno(seqno: i64) -> Self {
        Self::replying(Ok(vec![StackValue::Int(seqno)]))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TonTransport for CountingTransport {
    async fn run_get_method(
        &self,
        _block: &BlockId,
        _account: &Address,
        method: &str,
    ) -> Result<Vec<StackValue>, TransportError> {
        assert_eq!(method, "seqno");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn test_wallet(clock_now: u64, ttl: u32) -> WalletV4R2 {
    let key = SigningKey::generate(&mut OsRng);
    WalletV4R2::new(key, Address::new(0, [0x11; 32]))
        .with_message_ttl(ttl)
        .with_clock(Arc::new(FixedClock(clock_now)))
}

fn block() -> BlockId {
    BlockId::new(-1, 0x8000000000000000, 12345)
}

fn inner_message(marker: u64) -> Cell {
    let mut b = CellBuilder::new();
    b.store_uint(marker, 64).unwrap();
    b.build()
}

/// Decode the envelope the way the contract does and return
/// (signature, subwallet_id, valid_until, seqno, op, [(mode, ref hash)]).
fn decode_envelope(envelope: &SignedEnvelope) -> (Vec<u8>, u64, u64, u64, i64, Vec<(u64, [u8; 32])>) {
    let message = envelope.message();
    let mut slice = message.parse();
    let signature = slice.load_bytes(512).unwrap();
    let subwallet_id = slice.load_uint(32).unwrap();
    let valid_until = slice.load_uint(32).unwrap();
    let seqno = slice.load_uint(32).unwrap();
    let op = slice.load_int(8).unwrap();
    let mut transfers = Vec::new();
    while slice.remaining_bits() > 0 {
        let mode = slice.load_uint(8).unwrap();
        let inner = slice.load_ref().unwrap();
        transfers.push((mode, *inner.repr_hash()));
    }
    assert_eq!(slice.remaining_refs(), 0, "stray references in envelope");
    (signature, subwallet_id, valid_until, seqno, op, transfers)
}

#[tokio::test]
async fn signed_message_matches_contract_layout() {
    init_tracing();
    let wallet = test_wallet(1_700_000_000, 60);
    let transport = CountingTransport::seqno(5);
    let m1 = inner_message(0xdead_beef);

    let envelope = wallet
        .build_message(
            &transport,
            true,
            &block(),
            &[Transfer::from_cell(m1.clone(), 3)],
        )
        .await
        .unwrap();

    let (signature, subwallet_id, valid_until, seqno, op, transfers) = decode_envelope(&envelope);
    assert_eq!(signature, envelope.signature().to_vec());
    assert_eq!(subwallet_id, 698983191);
    assert_eq!(valid_until, 1_700_000_060);
    assert_eq!(seqno, 5);
    assert_eq!(op, 0);
    assert_eq!(transfers, vec![(3, *m1.repr_hash())]);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn signature_covers_exactly_the_unsigned_payload() {
    let wallet = test_wallet(1_700_000_000, 60);
    let transport = CountingTransport::seqno(5);
    let envelope = wallet
        .build_message(
            &transport,
            true,
            &block(),
            &[Transfer::from_cell(inner_message(1), 3)],
        )
        .await
        .unwrap();

    assert!(envelope.verify(&wallet.verifying_key()));
    // Detached: the signature is over the payload hash, not the envelope hash
    assert_ne!(envelope.payload().repr_hash(), envelope.message().repr_hash());
    assert!(envelope
        .payload()
        .verify(&wallet.verifying_key(), envelope.signature()));
    assert!(!envelope
        .message()
        .verify(&wallet.verifying_key(), envelope.signature()));
    // And only this wallet's key verifies it
    let other = SigningKey::generate(&mut OsRng);
    assert!(!envelope.verify(&other.verifying_key()));
}

#[tokio::test]
async fn five_transfers_rejected_before_any_network_call() {
    let wallet = test_wallet(1_700_000_000, 60);
    let transport = CountingTransport::seqno(5);
    let transfers: Vec<Transfer> = (0..5)
        .map(|i| Transfer::from_cell(inner_message(i), 1))
        .collect();

    let err = wallet
        .build_message(&transport, true, &block(), &transfers)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WalletError::TooManyTransfers { count: 5, max: 4 }
    ));
    assert_eq!(err.category(), "precondition");
    assert!(!err.is_retryable());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn transfer_counts_up_to_four_succeed() {
    for count in 0..=4u64 {
        let wallet = test_wallet(1_700_000_000, 60);
        let transport = CountingTransport::seqno(1);
        let transfers: Vec<Transfer> = (0..count)
            .map(|i| Transfer::from_cell(inner_message(i), 1))
            .collect();
        let envelope = wallet
            .build_message(&transport, true, &block(), &transfers)
            .await
            .unwrap();
        let (_, _, _, _, _, decoded) = decode_envelope(&envelope);
        assert_eq!(decoded.len() as u64, count);
    }
}

#[tokio::test]
async fn transfer_order_and_modes_are_preserved() {
    let wallet = test_wallet(1_700_000_000, 60);
    let transport = CountingTransport::seqno(7);
    let modes = [
        send_mode::PAY_GAS_SEPARATELY,
        send_mode::IGNORE_ERRORS,
        send_mode::PAY_GAS_SEPARATELY | send_mode::IGNORE_ERRORS,
        send_mode::CARRY_ALL_REMAINING_BALANCE,
    ];
    let inners: Vec<Cell> = (0..4).map(|i| inner_message(1000 + i)).collect();
    let transfers: Vec<Transfer> = inners
        .iter()
        .zip(modes)
        .map(|(cell, mode)| Transfer::from_cell(cell.clone(), mode))
        .collect();

    let envelope = wallet
        .build_message(&transport, true, &block(), &transfers)
        .await
        .unwrap();

    let (_, _, _, _, _, decoded) = decode_envelope(&envelope);
    let expected: Vec<(u64, [u8; 32])> = inners
        .iter()
        .zip(modes)
        .map(|(cell, mode)| (u64::from(mode), *cell.repr_hash()))
        .collect();
    assert_eq!(decoded, expected);
}

#[tokio::test]
async fn uninitialized_account_encodes_seqno_zero_without_io() {
    let wallet = test_wallet(1_700_000_000, 60);
    // Would return 99 if the builder (wrongly) asked
    let transport = CountingTransport::seqno(99);

    let envelope = wallet
        .build_message(
            &transport,
            false,
            &block(),
            &[Transfer::from_cell(inner_message(1), 3)],
        )
        .await
        .unwrap();

    let (_, _, _, seqno, _, _) = decode_envelope(&envelope);
    assert_eq!(seqno, 0);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn valid_until_is_clock_plus_ttl() {
    let wallet = test_wallet(1_699_999_940, 120);
    let transport = CountingTransport::seqno(0);
    let envelope = wallet
        .build_message(&transport, true, &block(), &[])
        .await
        .unwrap();
    let (_, _, valid_until, _, _, _) = decode_envelope(&envelope);
    assert_eq!(valid_until, 1_700_000_060);
}

#[tokio::test]
async fn transport_failure_yields_no_envelope() {
    let wallet = test_wallet(1_700_000_000, 60);
    let transport = CountingTransport::replying(Err(TransportError::Rpc {
        message: "connection reset".into(),
    }));

    let err = wallet
        .build_message(
            &transport,
            true,
            &block(),
            &[Transfer::from_cell(inner_message(1), 3)],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn cancelled_transport_is_not_retryable() {
    let wallet = test_wallet(1_700_000_000, 60);
    let transport = CountingTransport::replying(Err(TransportError::Cancelled));
    let err = wallet
        .build_message(&transport, true, &block(), &[])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WalletError::Transport(TransportError::Cancelled)
    ));
    assert!(!err.is_retryable());
}

/// Inner message whose serialization always fails.
struct BrokenMessage;

impl ton_wallet_v4::wallet::SerializeCell for BrokenMessage {
    fn to_cell(&self) -> Result<Cell, CellError> {
        Err(CellError::BitsOverflow {
            stored: 1023,
            requested: 8,
            limit: 1023,
        })
    }
}

#[tokio::test]
async fn serialization_failure_reports_the_offending_index() {
    let wallet = test_wallet(1_700_000_000, 60);
    let transport = CountingTransport::seqno(5);
    let transfers = vec![
        Transfer::from_cell(inner_message(1), 1),
        Transfer::new(Arc::new(BrokenMessage), 3),
    ];

    let err = wallet
        .build_message(&transport, true, &block(), &transfers)
        .await
        .unwrap_err();

    match err {
        WalletError::Serialization { index, .. } => assert_eq!(index, 1),
        other => panic!("expected Serialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn rebuilding_after_seqno_advance_changes_the_signature() {
    let key = SigningKey::generate(&mut OsRng);
    let make = |seqno: i64| {
        let wallet = WalletV4R2::new(key.clone(), Address::new(0, [0x11; 32]))
            .with_clock(Arc::new(FixedClock(1_700_000_000)));
        async move {
            let transport = CountingTransport::seqno(seqno);
            wallet
                .build_message(
                    &transport,
                    true,
                    &block(),
                    &[Transfer::from_cell(inner_message(1), 3)],
                )
                .await
                .unwrap()
        }
    };
    let first = make(5).await;
    let second = make(6).await;
    // Replay protection: a new seqno produces a different signed payload
    assert_ne!(first.payload().repr_hash(), second.payload().repr_hash());
    assert_ne!(first.signature(), second.signature());
}
