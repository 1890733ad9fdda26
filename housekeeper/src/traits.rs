//! Store trait definitions with mockall annotations for testing
//!
//! The engines never touch storage directly. The service layer and the
//! scheduler reach documents through these traits, which keeps them
//! injectable and lets tests substitute failing stores.

use shared::{DutyConfig, Expense, ExpenseId, Room, RoomId, User, UserId};

use crate::error::HouseResult;

/// Users, rooms and room membership
///
/// Documents are replaced wholesale on save; there are no partial updates.
#[mockall::automock]
#[async_trait::async_trait]
pub trait MembershipStore: Send + Sync {
    /// Look up a registered user
    async fn find_user(&self, id: &UserId) -> HouseResult<Option<User>>;

    /// Look up a registered user by email (case-insensitive)
    async fn find_user_by_email(&self, email: &str) -> HouseResult<Option<User>>;

    /// Insert or replace a user
    async fn save_user(&self, user: User) -> HouseResult<()>;

    async fn find_room_by_id(&self, id: &RoomId) -> HouseResult<Option<Room>>;

    /// Look up a room by its short join code
    async fn find_room_by_code(&self, code: &str) -> HouseResult<Option<Room>>;

    /// All rooms the user is a member of
    async fn rooms_for_user(&self, user: &UserId) -> HouseResult<Vec<Room>>;

    /// Insert or replace a room
    async fn save_room(&self, room: Room) -> HouseResult<()>;

    async fn delete_room(&self, id: &RoomId) -> HouseResult<()>;
}

/// Expense ledger
#[mockall::automock]
#[async_trait::async_trait]
pub trait LedgerStore: Send + Sync {
    /// Every expense recorded for the room, in insertion order
    async fn find_expenses_by_room(&self, room: &RoomId) -> HouseResult<Vec<Expense>>;

    async fn find_expense(&self, id: &ExpenseId) -> HouseResult<Option<Expense>>;

    async fn create_expense(&self, expense: Expense) -> HouseResult<()>;

    async fn delete_expense(&self, id: &ExpenseId) -> HouseResult<()>;
}

/// Duty configurations, one per room
#[mockall::automock]
#[async_trait::async_trait]
pub trait DutyStore: Send + Sync {
    async fn find_duty_config(&self, room: &RoomId) -> HouseResult<Option<DutyConfig>>;

    /// Every stored configuration, for the rotation tick
    async fn list_duty_configs(&self) -> HouseResult<Vec<DutyConfig>>;

    /// Insert or replace the configuration of `config.room_id`
    async fn save_duty_config(&self, config: DutyConfig) -> HouseResult<()>;

    async fn delete_duty_config(&self, room: &RoomId) -> HouseResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that mock traits can be instantiated and programmed
    #[tokio::test]
    async fn test_mock_trait_instantiation() {
        let _membership = MockMembershipStore::new();
        let _ledger = MockLedgerStore::new();

        let mut duties = MockDutyStore::new();
        duties.expect_list_duty_configs().returning(|| Ok(vec![]));

        assert!(duties.list_duty_configs().await.unwrap().is_empty());
    }
}
