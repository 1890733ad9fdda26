//! File-backed document store
//!
//! Keeps the working set in an [`InMemoryStore`] and rewrites a JSON
//! snapshot after every mutation. Writes go to a temporary file that is
//! renamed over the snapshot, so a crash mid-write leaves the previous
//! snapshot intact. A mutation whose snapshot cannot be written is rolled
//! back in memory as well.

use std::future::Future;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use shared::{
    Component, DutyConfig, Expense, ExpenseId, Room, RoomId, User, UserId, component_debug, component_warn,
};

use super::memory_store::{InMemoryStore, StoreSnapshot};
use crate::error::{HouseError, HouseResult};
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

const SNAPSHOT_FILE: &str = "housekeeper.json";

/// Store persisting every document to a JSON file
pub struct FileStore {
    inner: InMemoryStore,
    path: PathBuf,
    /// Serializes mutations together with their snapshot writes
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or initialize) the store inside `data_dir`
    pub async fn open(data_dir: impl AsRef<Path>) -> HouseResult<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .await
            .map_err(|e| HouseError::storage(format!("create {}", data_dir.display()), e.to_string()))?;

        let path = data_dir.join(SNAPSHOT_FILE);
        let snapshot = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| HouseError::storage(format!("read {}", path.display()), e.to_string()))?;
            serde_json::from_str::<StoreSnapshot>(&content)?
        } else {
            StoreSnapshot::default()
        };

        component_debug!(
            Component::Store,
            "📁 Opened store at {} ({} rooms, {} expenses, {} duty configs)",
            path.display(),
            snapshot.rooms.len(),
            snapshot.expenses.len(),
            snapshot.duty_configs.len()
        );

        Ok(Self {
            inner: InMemoryStore::from_snapshot(snapshot),
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a mutation to the working set and write the snapshot
    ///
    /// When the write fails the working set is restored to its state before
    /// the mutation.
    async fn commit(&self, mutation: impl Future<Output = HouseResult<()>> + Send) -> HouseResult<()> {
        let _guard = self.write_lock.lock().await;

        let before = self.inner.snapshot().await;
        mutation.await?;

        let snapshot = self.inner.snapshot().await;
        if let Err(e) = self.write_snapshot(&snapshot).await {
            component_warn!(Component::Store, error = %e, "Snapshot write failed, rolling back mutation");
            self.inner.restore(before).await;
            return Err(e);
        }
        Ok(())
    }

    async fn write_snapshot(&self, snapshot: &StoreSnapshot) -> HouseResult<()> {
        let content = serde_json::to_string_pretty(snapshot)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| HouseError::storage(format!("write {}", tmp_path.display()), e.to_string()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| HouseError::storage(format!("replace {}", self.path.display()), e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl MembershipStore for FileStore {
    async fn find_user(&self, id: &UserId) -> HouseResult<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> HouseResult<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn save_user(&self, user: User) -> HouseResult<()> {
        self.commit(self.inner.save_user(user)).await
    }

    async fn find_room_by_id(&self, id: &RoomId) -> HouseResult<Option<Room>> {
        self.inner.find_room_by_id(id).await
    }

    async fn find_room_by_code(&self, code: &str) -> HouseResult<Option<Room>> {
        self.inner.find_room_by_code(code).await
    }

    async fn rooms_for_user(&self, user: &UserId) -> HouseResult<Vec<Room>> {
        self.inner.rooms_for_user(user).await
    }

    async fn save_room(&self, room: Room) -> HouseResult<()> {
        self.commit(self.inner.save_room(room)).await
    }

    async fn delete_room(&self, id: &RoomId) -> HouseResult<()> {
        self.commit(self.inner.delete_room(id)).await
    }
}

#[async_trait]
impl LedgerStore for FileStore {
    async fn find_expenses_by_room(&self, room: &RoomId) -> HouseResult<Vec<Expense>> {
        self.inner.find_expenses_by_room(room).await
    }

    async fn find_expense(&self, id: &ExpenseId) -> HouseResult<Option<Expense>> {
        self.inner.find_expense(id).await
    }

    async fn create_expense(&self, expense: Expense) -> HouseResult<()> {
        self.commit(self.inner.create_expense(expense)).await
    }

    async fn delete_expense(&self, id: &ExpenseId) -> HouseResult<()> {
        self.commit(self.inner.delete_expense(id)).await
    }
}

#[async_trait]
impl DutyStore for FileStore {
    async fn find_duty_config(&self, room: &RoomId) -> HouseResult<Option<DutyConfig>> {
        self.inner.find_duty_config(room).await
    }

    async fn list_duty_configs(&self) -> HouseResult<Vec<DutyConfig>> {
        self.inner.list_duty_configs().await
    }

    async fn save_duty_config(&self, config: DutyConfig) -> HouseResult<()> {
        self.commit(self.inner.save_duty_config(config)).await
    }

    async fn delete_duty_config(&self, room: &RoomId) -> HouseResult<()> {
        self.commit(self.inner.delete_duty_config(room)).await
    }
}
