//! Tests for the in-memory store

use super::{test_duty_config, test_expense, test_room, test_user};
use crate::services::InMemoryStore;
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

#[tokio::test]
async fn test_user_lookup_by_email_is_case_insensitive() {
    let store = InMemoryStore::new();
    let user = test_user("Alice");
    store.save_user(user.clone()).await.unwrap();

    let found = store.find_user_by_email("ALICE@example.com").await.unwrap();
    assert_eq!(found, Some(user.clone()));
    assert_eq!(store.find_user(&user.id).await.unwrap(), Some(user));
    assert!(store.find_user_by_email("bob@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_email_lookup_folds_non_ascii_case() {
    let store = InMemoryStore::new();
    let user = shared::User::new("Émile", "émile@example.com");
    store.save_user(user.clone()).await.unwrap();

    let found = store.find_user_by_email(" ÉMILE@Example.com ").await.unwrap();
    assert_eq!(found, Some(user));
}

#[tokio::test]
async fn test_restore_replaces_contents() {
    let store = InMemoryStore::new();
    let user = test_user("Alice");
    store.save_user(user.clone()).await.unwrap();
    let before = store.snapshot().await;

    let room = test_room(user.id);
    store.save_room(room.clone()).await.unwrap();
    store.restore(before.clone()).await;

    assert!(store.find_room_by_id(&room.id).await.unwrap().is_none());
    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_room_lookup_and_membership_listing() {
    let store = InMemoryStore::new();
    let admin = test_user("Alice");
    let room = test_room(admin.id);
    store.save_room(room.clone()).await.unwrap();

    assert_eq!(store.find_room_by_id(&room.id).await.unwrap(), Some(room.clone()));
    assert_eq!(store.find_room_by_code("test01").await.unwrap(), Some(room.clone()));
    assert_eq!(store.rooms_for_user(&admin.id).await.unwrap().len(), 1);
    assert!(store.rooms_for_user(&test_user("Bob").id).await.unwrap().is_empty());

    store.delete_room(&room.id).await.unwrap();
    assert!(store.find_room_by_id(&room.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ledger_keeps_insertion_order_per_room() {
    let store = InMemoryStore::new();
    let payer = test_user("Alice").id;
    let room = test_room(payer);
    let other_room = test_room(payer);

    let first = test_expense(room.id, payer, 10.0);
    let second = test_expense(room.id, payer, 20.0);
    store.create_expense(first.clone()).await.unwrap();
    store.create_expense(test_expense(other_room.id, payer, 99.0)).await.unwrap();
    store.create_expense(second.clone()).await.unwrap();

    let ledger = store.find_expenses_by_room(&room.id).await.unwrap();
    assert_eq!(ledger, vec![first.clone(), second.clone()]);

    store.delete_expense(&first.id).await.unwrap();
    assert_eq!(store.find_expenses_by_room(&room.id).await.unwrap(), vec![second]);
    assert!(store.find_expense(&first.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duty_config_replace_and_delete() {
    let store = InMemoryStore::new();
    let member = test_user("Alice").id;
    let room = test_room(member);

    let config = test_duty_config(room.id, member);
    store.save_duty_config(config.clone()).await.unwrap();

    let mut replaced = config.clone();
    replaced.current_starting_member_index = 3;
    store.save_duty_config(replaced.clone()).await.unwrap();

    assert_eq!(store.list_duty_configs().await.unwrap(), vec![replaced.clone()]);
    assert_eq!(store.find_duty_config(&room.id).await.unwrap(), Some(replaced));

    store.delete_duty_config(&room.id).await.unwrap();
    assert!(store.list_duty_configs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_snapshot_round_trip() {
    let store = InMemoryStore::new();
    let user = test_user("Alice");
    let room = test_room(user.id);
    store.save_user(user.clone()).await.unwrap();
    store.save_room(room.clone()).await.unwrap();
    store.create_expense(test_expense(room.id, user.id, 12.5)).await.unwrap();
    store.save_duty_config(test_duty_config(room.id, user.id)).await.unwrap();

    let snapshot = store.snapshot().await;
    let restored = InMemoryStore::from_snapshot(snapshot.clone());

    assert_eq!(restored.snapshot().await, snapshot);
}
