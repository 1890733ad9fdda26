//! In-memory document store
//!
//! Implements every store trait over maps guarded by a single `RwLock`.
//! Used directly for ephemeral runs and tests, and as the working set of
//! the file-backed store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use shared::{DutyConfig, Expense, ExpenseId, Room, RoomId, User, UserId};

use crate::error::HouseResult;
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

/// Serializable image of the whole store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub rooms: Vec<Room>,
    pub expenses: Vec<Expense>,
    pub duty_configs: Vec<DutyConfig>,
}

#[derive(Default)]
struct Collections {
    users: HashMap<UserId, User>,
    rooms: HashMap<RoomId, Room>,
    /// Insertion order is the ledger order
    expenses: Vec<Expense>,
    duty_configs: HashMap<RoomId, DutyConfig>,
}

impl From<StoreSnapshot> for Collections {
    fn from(snapshot: StoreSnapshot) -> Self {
        Self {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            rooms: snapshot.rooms.into_iter().map(|r| (r.id, r)).collect(),
            expenses: snapshot.expenses,
            duty_configs: snapshot.duty_configs.into_iter().map(|d| (d.room_id, d)).collect(),
        }
    }
}

/// Emails compare equal after trimming and Unicode lowercasing
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Store keeping every document in process memory
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a previously captured snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self { state: RwLock::new(Collections::from(snapshot)) }
    }

    /// Replace the whole contents with a previously captured snapshot
    pub async fn restore(&self, snapshot: StoreSnapshot) {
        *self.state.write().await = Collections::from(snapshot);
    }

    /// Capture the current contents in a stable order
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;

        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));

        let mut rooms: Vec<Room> = state.rooms.values().cloned().collect();
        rooms.sort_by_key(|r| (r.created_at, r.id));

        let mut duty_configs: Vec<DutyConfig> = state.duty_configs.values().cloned().collect();
        duty_configs.sort_by_key(|d| d.room_id);

        StoreSnapshot {
            users,
            rooms,
            expenses: state.expenses.clone(),
            duty_configs,
        }
    }
}

#[async_trait]
impl MembershipStore for InMemoryStore {
    async fn find_user(&self, id: &UserId) -> HouseResult<Option<User>> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> HouseResult<Option<User>> {
        let wanted = normalize_email(email);
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| normalize_email(&u.email) == wanted)
            .cloned())
    }

    async fn save_user(&self, user: User) -> HouseResult<()> {
        self.state.write().await.users.insert(user.id, user);
        Ok(())
    }

    async fn find_room_by_id(&self, id: &RoomId) -> HouseResult<Option<Room>> {
        Ok(self.state.read().await.rooms.get(id).cloned())
    }

    async fn find_room_by_code(&self, code: &str) -> HouseResult<Option<Room>> {
        let state = self.state.read().await;
        Ok(state
            .rooms
            .values()
            .find(|r| r.code.eq_ignore_ascii_case(code.trim()))
            .cloned())
    }

    async fn rooms_for_user(&self, user: &UserId) -> HouseResult<Vec<Room>> {
        let state = self.state.read().await;
        let mut rooms: Vec<Room> = state.rooms.values().filter(|r| r.is_member(user)).cloned().collect();
        rooms.sort_by_key(|r| (r.created_at, r.id));
        Ok(rooms)
    }

    async fn save_room(&self, room: Room) -> HouseResult<()> {
        self.state.write().await.rooms.insert(room.id, room);
        Ok(())
    }

    async fn delete_room(&self, id: &RoomId) -> HouseResult<()> {
        self.state.write().await.rooms.remove(id);
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn find_expenses_by_room(&self, room: &RoomId) -> HouseResult<Vec<Expense>> {
        let state = self.state.read().await;
        Ok(state.expenses.iter().filter(|e| &e.room_id == room).cloned().collect())
    }

    async fn find_expense(&self, id: &ExpenseId) -> HouseResult<Option<Expense>> {
        let state = self.state.read().await;
        Ok(state.expenses.iter().find(|e| &e.id == id).cloned())
    }

    async fn create_expense(&self, expense: Expense) -> HouseResult<()> {
        self.state.write().await.expenses.push(expense);
        Ok(())
    }

    async fn delete_expense(&self, id: &ExpenseId) -> HouseResult<()> {
        self.state.write().await.expenses.retain(|e| &e.id != id);
        Ok(())
    }
}

#[async_trait]
impl DutyStore for InMemoryStore {
    async fn find_duty_config(&self, room: &RoomId) -> HouseResult<Option<DutyConfig>> {
        Ok(self.state.read().await.duty_configs.get(room).cloned())
    }

    async fn list_duty_configs(&self) -> HouseResult<Vec<DutyConfig>> {
        let state = self.state.read().await;
        let mut configs: Vec<DutyConfig> = state.duty_configs.values().cloned().collect();
        configs.sort_by_key(|d| d.room_id);
        Ok(configs)
    }

    async fn save_duty_config(&self, config: DutyConfig) -> HouseResult<()> {
        self.state.write().await.duty_configs.insert(config.room_id, config);
        Ok(())
    }

    async fn delete_duty_config(&self, room: &RoomId) -> HouseResult<()> {
        self.state.write().await.duty_configs.remove(room);
        Ok(())
    }
}
