//! Tests for the correspondence ledger and the access gate.

use std::sync::Arc;
use std::time::Duration;

use crate::relay::{
    adapters::memory::InMemoryKeyValueStore,
    domain::{BAN_SET_SENTINEL, ChatId, CorrespondenceRecord, KeyNamespace, MessageId, UserId},
    ports::{KeyValueStore, StoreError},
    services::{AccessGate, CorrespondenceLedger, LedgerError},
};
use rstest::{fixture, rstest};

const FORWARD_CHAT: ChatId = ChatId::new(-100);

#[fixture]
fn store() -> Arc<InMemoryKeyValueStore> {
    Arc::new(InMemoryKeyValueStore::new())
}

fn ledger(store: &Arc<InMemoryKeyValueStore>) -> CorrespondenceLedger<InMemoryKeyValueStore> {
    CorrespondenceLedger::new(Arc::clone(store), KeyNamespace::new(FORWARD_CHAT))
}

fn gate(store: &Arc<InMemoryKeyValueStore>) -> AccessGate<InMemoryKeyValueStore> {
    AccessGate::new(Arc::clone(store), &KeyNamespace::new(FORWARD_CHAT))
}

// ── CorrespondenceLedger ────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recorded_entries_are_returned_by_lookup(store: Arc<InMemoryKeyValueStore>) {
    let ledger = ledger(&store);
    let header = CorrespondenceRecord::without_reply(UserId::new(42));
    let content = CorrespondenceRecord::as_reply(UserId::new(42), MessageId::new(555));

    ledger
        .record(MessageId::new(101), &header)
        .await
        .expect("header record stored");
    ledger
        .record(MessageId::new(102), &content)
        .await
        .expect("content record stored");

    assert_eq!(
        ledger.lookup(MessageId::new(101)).await.expect("lookup"),
        header
    );
    assert_eq!(
        ledger.lookup(MessageId::new(102)).await.expect("lookup"),
        content
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn records_use_the_documented_encoding(store: Arc<InMemoryKeyValueStore>) {
    ledger(&store)
        .record(
            MessageId::new(102),
            &CorrespondenceRecord::as_reply(UserId::new(42), MessageId::new(555)),
        )
        .await
        .expect("record stored");

    let raw = store.get("anonmail_-100_102").await.expect("read raw value");

    assert_eq!(raw.as_deref(), Some("42 1 555"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recording_twice_overwrites(store: Arc<InMemoryKeyValueStore>) {
    let ledger = ledger(&store);
    let first = CorrespondenceRecord::without_reply(UserId::new(1));
    let second = CorrespondenceRecord::without_reply(UserId::new(2));

    ledger.record(MessageId::new(5), &first).await.expect("stored");
    ledger.record(MessageId::new(5), &second).await.expect("stored");

    assert_eq!(ledger.lookup(MessageId::new(5)).await.expect("lookup"), second);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_of_untracked_message_is_not_found(store: Arc<InMemoryKeyValueStore>) {
    let result = ledger(&store).lookup(MessageId::new(999)).await;

    assert!(matches!(result, Err(LedgerError::NotFound(id)) if id == MessageId::new(999)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_of_corrupted_value_is_malformed(store: Arc<InMemoryKeyValueStore>) {
    store
        .insert_raw("anonmail_-100_7", "not-a-record")
        .expect("raw value stored");

    let result = ledger(&store).lookup(MessageId::new(7)).await;

    assert!(matches!(
        result,
        Err(LedgerError::Malformed { forward_message, .. }) if forward_message == MessageId::new(7)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_store_surfaces_as_store_error(store: Arc<InMemoryKeyValueStore>) {
    let ledger = ledger(&store);
    store.set_unavailable(true);

    let write = ledger
        .record(
            MessageId::new(1),
            &CorrespondenceRecord::without_reply(UserId::new(1)),
        )
        .await;
    let read = ledger.lookup(MessageId::new(1)).await;

    assert!(matches!(write, Err(LedgerError::Store(StoreError::Unavailable(_)))));
    assert!(matches!(read, Err(LedgerError::Store(StoreError::Unavailable(_)))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retention_expires_records(store: Arc<InMemoryKeyValueStore>) {
    let ledger = ledger(&store).with_retention(Duration::from_millis(20));
    ledger
        .record(
            MessageId::new(1),
            &CorrespondenceRecord::without_reply(UserId::new(1)),
        )
        .await
        .expect("stored");

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(matches!(
        ledger.lookup(MessageId::new(1)).await,
        Err(LedgerError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlong_retention_keeps_records(store: Arc<InMemoryKeyValueStore>) {
    let ledger = ledger(&store).with_retention(Duration::MAX);
    let record = CorrespondenceRecord::without_reply(UserId::new(1));

    ledger.record(MessageId::new(1), &record).await.expect("stored");

    assert_eq!(ledger.lookup(MessageId::new(1)).await.expect("lookup"), record);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ledgers_of_different_deployments_are_isolated(store: Arc<InMemoryKeyValueStore>) {
    let ours = ledger(&store);
    let theirs = CorrespondenceLedger::new(Arc::clone(&store), KeyNamespace::new(ChatId::new(-200)));
    ours.record(
        MessageId::new(1),
        &CorrespondenceRecord::without_reply(UserId::new(1)),
    )
    .await
    .expect("stored");

    assert!(matches!(
        theirs.lookup(MessageId::new(1)).await,
        Err(LedgerError::NotFound(_))
    ));
}

// ── AccessGate ──────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initialize_seeds_only_the_sentinel(store: Arc<InMemoryKeyValueStore>) {
    let gate = gate(&store);

    gate.initialize().await.expect("seeded");
    gate.initialize().await.expect("seeding is idempotent");

    assert_eq!(
        store.members("anonmail_-100_banned_list").expect("members"),
        vec![BAN_SET_SENTINEL.to_owned()]
    );
    assert!(!gate.is_banned(UserId::new(42)).await.expect("checked"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ban_and_unban_are_idempotent(store: Arc<InMemoryKeyValueStore>) {
    let gate = gate(&store);
    let user = UserId::new(42);

    gate.ban(user).await.expect("banned");
    gate.ban(user).await.expect("banned again");
    assert!(gate.is_banned(user).await.expect("checked"));

    gate.unban(user).await.expect("unbanned");
    gate.unban(user).await.expect("unbanned again");
    assert!(!gate.is_banned(user).await.expect("checked"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unban_keeps_the_sentinel(store: Arc<InMemoryKeyValueStore>) {
    let gate = gate(&store);
    gate.initialize().await.expect("seeded");

    gate.ban(UserId::new(42)).await.expect("banned");
    gate.unban(UserId::new(42)).await.expect("unbanned");

    assert_eq!(
        store.members("anonmail_-100_banned_list").expect("members"),
        vec![BAN_SET_SENTINEL.to_owned()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn account_sharing_the_sentinel_value_is_not_banned(store: Arc<InMemoryKeyValueStore>) {
    let gate = gate(&store);
    let user = UserId::new(777);
    gate.initialize().await.expect("seeded");

    assert!(!gate.is_banned(user).await.expect("checked"));

    gate.unban(user).await.expect("unbanned");
    assert_eq!(
        store.members("anonmail_-100_banned_list").expect("members"),
        vec![BAN_SET_SENTINEL.to_owned()]
    );

    gate.ban(user).await.expect("banned");
    assert!(gate.is_banned(user).await.expect("checked"));
    assert_eq!(
        store.members("anonmail_-100_banned_list").expect("members"),
        vec![BAN_SET_SENTINEL.to_owned(), "anonmail_-100_777".to_owned()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn gate_never_touches_records(store: Arc<InMemoryKeyValueStore>) {
    let ledger = ledger(&store);
    let gate = gate(&store);
    let record = CorrespondenceRecord::without_reply(UserId::new(42));
    ledger.record(MessageId::new(3), &record).await.expect("stored");

    gate.ban(UserId::new(42)).await.expect("banned");
    gate.unban(UserId::new(42)).await.expect("unbanned");

    assert_eq!(store.value_count().expect("count"), 1);
    assert_eq!(ledger.lookup(MessageId::new(3)).await.expect("lookup"), record);
}
