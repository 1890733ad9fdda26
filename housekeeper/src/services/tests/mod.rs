//! Store-specific tests
//!
//! Each store has its own test file; shared document builders live here.

mod file_store;
mod memory_store;

use chrono::Utc;
use shared::{
    DutyConfig, DutySlot, DutySlotId, Expense, ExpenseId, Room, RoomId, Split, SplitType, User,
    UserId,
};

/// Room with a single admin
pub fn test_room(admin: UserId) -> Room {
    Room::new("Test Flat", "TEST01", admin)
}

pub fn test_expense(room: RoomId, paid_by: UserId, amount: f64) -> Expense {
    Expense {
        id: ExpenseId::new(),
        room_id: room,
        description: "pizza".to_string(),
        total_amount: amount,
        paid_by,
        split_type: SplitType::Equal,
        splits: vec![Split { user: paid_by, amount, percentage: None, shares: None }],
        date: Utc::now(),
    }
}

pub fn test_duty_config(room: RoomId, member: UserId) -> DutyConfig {
    DutyConfig {
        room_id: room,
        duties: vec![DutySlot {
            id: DutySlotId::new(),
            description: "dishes".to_string(),
            assigned_to: Some(member),
        }],
        member_order: vec![member],
        current_starting_member_index: 0,
        skipped_members_for_current_cycle: Vec::new(),
        updated_at: Utc::now(),
    }
}

pub fn test_user(name: &str) -> User {
    User::new(name, format!("{}@example.com", name.to_lowercase()))
}
