//! Shared types for the room housekeeping system
//!
//! Identifiers, persisted documents and derived views used by both the
//! engines and the stores, plus the common error type and logging setup.

pub mod errors;
pub mod logging;
pub mod models;
pub mod types;

pub use errors::*;
pub use types::*;

pub use models::{
    // Rooms and membership
    Room, RoomMember, RoomSummary, TreasureTransaction, User,

    // Ledger
    Expense, NewExpense, Split, SplitInput,

    // Derived balance views
    Balance, BalanceReport, MemberProfile, Settlement,

    // Duty rotation
    DutyConfig, DutySlot, DutyTable,
};
