//! Shared-household backend: rooms, an expense ledger with debt
//! simplification, a common treasure and rotating duties
//!
//! Pure engines live in [`core`], storage sits behind the traits in
//! [`traits`], and [`HouseService`] ties them together with membership and
//! role checks. [`DutyScheduler`] drives the daily duty rotation.

pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod service;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::{ServiceConfig, TickSchedule};
pub use error::{ErrorKind, HouseError, HouseResult};
pub use scheduler::{DutyScheduler, TickReport};
pub use service::{HouseService, MemberView, RoomDetails, TreasureStatus};
pub use services::{FileStore, InMemoryStore, StoreSnapshot};
pub use traits::{DutyStore, LedgerStore, MembershipStore};
