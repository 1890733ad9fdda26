//! Ledger entries and the balance views derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ExpenseId, RoomId, SplitType, UserId};

/// Per-member share of an expense
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Split {
    pub user: UserId,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<f64>,
}

/// Caller-supplied split entry before amounts are derived
///
/// Which optional field is read depends on the split type of the expense.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SplitInput {
    pub user: UserId,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub shares: Option<f64>,
}

impl SplitInput {
    pub fn participant(user: UserId) -> Self {
        Self { user, ..Default::default() }
    }

    pub fn with_amount(user: UserId, amount: f64) -> Self {
        Self { user, amount: Some(amount), ..Default::default() }
    }

    pub fn with_percentage(user: UserId, percentage: f64) -> Self {
        Self { user, percentage: Some(percentage), ..Default::default() }
    }

    pub fn with_shares(user: UserId, shares: f64) -> Self {
        Self { user, shares: Some(shares), ..Default::default() }
    }
}

/// Expense creation request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub room_id: RoomId,
    pub description: String,
    pub total_amount: f64,
    pub paid_by: UserId,
    pub split_type: SplitType,
    pub splits: Vec<SplitInput>,
}

/// Stored ledger entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub room_id: RoomId,
    pub description: String,
    pub total_amount: f64,
    pub paid_by: UserId,
    pub split_type: SplitType,
    pub splits: Vec<Split>,
    pub date: DateTime<Utc>,
}

/// Member identity with a display name, as fed into balance computation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MemberProfile {
    pub id: UserId,
    pub name: String,
}

/// Net position of one member; positive means the member is owed money
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Balance {
    pub id: UserId,
    pub name: String,
    pub amount: f64,
}

/// One payment of the simplified plan
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settlement {
    pub from: UserId,
    pub from_name: String,
    pub to: UserId,
    pub to_name: String,
    pub amount: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BalanceReport {
    pub raw_balances: Vec<Balance>,
    pub simplified_debts: Vec<Settlement>,
}

impl BalanceReport {
    /// Rounded balance of a single member, if present
    pub fn balance_of(&self, user: &UserId) -> Option<f64> {
        self.raw_balances.iter().find(|b| &b.id == user).map(|b| b.amount)
    }
}
