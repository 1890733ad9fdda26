//! Tests for the file-backed store
//!
//! These verify that every mutation reaches disk and that a reopened store
//! sees the same documents.

use tempfile::TempDir;

use super::{test_duty_config, test_expense, test_room, test_user};
use crate::services::FileStore;
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

#[tokio::test]
async fn test_open_creates_directory_without_snapshot() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("nested").join("data");

    let store = FileStore::open(&data_dir).await.unwrap();

    assert!(data_dir.is_dir());
    assert!(!store.path().exists(), "snapshot is only written on first mutation");
    assert!(store.list_duty_configs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mutations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let user = test_user("Alice");
    let room = test_room(user.id);
    let expense = test_expense(room.id, user.id, 42.0);
    let config = test_duty_config(room.id, user.id);

    {
        let store = FileStore::open(dir.path()).await.unwrap();
        store.save_user(user.clone()).await.unwrap();
        store.save_room(room.clone()).await.unwrap();
        store.create_expense(expense.clone()).await.unwrap();
        store.save_duty_config(config.clone()).await.unwrap();
        assert!(store.path().exists());
    }

    let reopened = FileStore::open(dir.path()).await.unwrap();
    assert_eq!(reopened.find_user(&user.id).await.unwrap(), Some(user));
    assert_eq!(reopened.find_room_by_id(&room.id).await.unwrap(), Some(room.clone()));
    assert_eq!(reopened.find_expenses_by_room(&room.id).await.unwrap(), vec![expense]);
    assert_eq!(reopened.find_duty_config(&room.id).await.unwrap(), Some(config));
}

#[tokio::test]
async fn test_deletions_are_persisted() {
    let dir = TempDir::new().unwrap();
    let user = test_user("Alice");
    let room = test_room(user.id);
    let expense = test_expense(room.id, user.id, 5.0);

    {
        let store = FileStore::open(dir.path()).await.unwrap();
        store.save_room(room.clone()).await.unwrap();
        store.create_expense(expense.clone()).await.unwrap();
        store.save_duty_config(test_duty_config(room.id, user.id)).await.unwrap();

        store.delete_expense(&expense.id).await.unwrap();
        store.delete_duty_config(&room.id).await.unwrap();
        store.delete_room(&room.id).await.unwrap();
    }

    let reopened = FileStore::open(dir.path()).await.unwrap();
    assert!(reopened.find_room_by_id(&room.id).await.unwrap().is_none());
    assert!(reopened.find_expense(&expense.id).await.unwrap().is_none());
    assert!(reopened.find_duty_config(&room.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_snapshot_is_reported() {
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("housekeeper.json"), "{ not json").await.unwrap();

    let err = FileStore::open(dir.path()).await.err().expect("open should fail");
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_failed_write_rolls_back_mutation() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    let user = test_user("Alice");
    let room = test_room(user.id);
    let config = test_duty_config(room.id, user.id);

    let store = FileStore::open(&data_dir).await.unwrap();
    store.save_user(user.clone()).await.unwrap();
    store.save_room(room.clone()).await.unwrap();
    store.save_duty_config(config.clone()).await.unwrap();

    // Snapshot writes now fail
    tokio::fs::remove_dir_all(&data_dir).await.unwrap();

    let expense = test_expense(room.id, user.id, 18.0);
    assert!(store.create_expense(expense.clone()).await.is_err());
    assert!(store.find_expenses_by_room(&room.id).await.unwrap().is_empty());
    assert!(store.find_expense(&expense.id).await.unwrap().is_none());

    let mut advanced = config.clone();
    advanced.current_starting_member_index = 1;
    assert!(store.save_duty_config(advanced).await.is_err());
    assert_eq!(store.find_duty_config(&room.id).await.unwrap(), Some(config));

    assert!(store.delete_room(&room.id).await.is_err());
    assert_eq!(store.find_room_by_id(&room.id).await.unwrap(), Some(room));
}
