//! Core business logic modules
//!
//! This module contains pure business logic with no I/O dependencies.
//! All functions are deterministic over their inputs and easily testable.

pub mod balance;
pub mod rotation;
pub mod splits;
pub mod treasure;

pub use balance::{compute_balances, simplify_debts};
pub use rotation::{configure_duties, next_cursor, rotate_duty_cycle, skip_members};
pub use splits::derive_splits;
