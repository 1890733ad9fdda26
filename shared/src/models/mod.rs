//! Document types shared between the engines and the stores
//!
//! Rooms, users, ledger entries and duty configurations as they are
//! persisted, plus the derived views computed from them.

pub mod duty;
pub mod expense;
pub mod room;

pub use duty::{DutyConfig, DutySlot, DutyTable};
pub use expense::{
    Balance, BalanceReport, Expense, MemberProfile, NewExpense, Settlement, Split, SplitInput,
};
pub use room::{Room, RoomMember, RoomSummary, TreasureTransaction, User};
