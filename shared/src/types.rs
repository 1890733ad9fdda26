//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::SharedError;

/// Absolute tolerance used for every money comparison
pub const MONEY_TOLERANCE: f64 = 0.01;

/// Round a money amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// True when the amount is within tolerance of zero
pub fn is_effectively_zero(amount: f64) -> bool {
    amount.abs() < MONEY_TOLERANCE
}

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_string(s: &str) -> Result<Self, SharedError> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| SharedError::InvalidUuid { input: s.to_string() })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = SharedError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_string(s)
            }
        }
    };
}

document_id!(
    /// Unique identifier for registered users
    UserId
);
document_id!(
    /// Unique identifier for rooms
    RoomId
);
document_id!(
    /// Unique identifier for ledger entries
    ExpenseId
);
document_id!(
    /// Unique identifier for a duty slot inside a configuration
    DutySlotId
);

/// Room-scoped role of a member
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(SharedError::UnknownVariant {
                kind: "role".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// How an expense total is divided among participants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Equal,
    Unequal,
    Percentage,
    Shares,
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "equal",
            SplitType::Unequal => "unequal",
            SplitType::Percentage => "percentage",
            SplitType::Shares => "shares",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal" => Ok(SplitType::Equal),
            "unequal" => Ok(SplitType::Unequal),
            "percentage" => Ok(SplitType::Percentage),
            "shares" => Ok(SplitType::Shares),
            other => Err(SharedError::UnknownVariant {
                kind: "split type".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Direction of a treasure movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreasureEntryKind {
    /// Money added to the pool
    Credit,
    /// Money spent from the pool
    Debit,
}

impl fmt::Display for TreasureEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreasureEntryKind::Credit => write!(f, "credit"),
            TreasureEntryKind::Debit => write!(f, "debit"),
        }
    }
}

/// Subsystem tag attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Service,
    Rooms,
    Ledger,
    Treasure,
    Duties,
    Scheduler,
    Store,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Service => "service",
            Component::Rooms => "rooms",
            Component::Ledger => "ledger",
            Component::Treasure => "treasure",
            Component::Duties => "duties",
            Component::Scheduler => "scheduler",
            Component::Store => "store",
        };
        f.write_str(name)
    }
}
