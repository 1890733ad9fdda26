//! Room treasure movements

use chrono::{DateTime, Utc};
use shared::{Room, TreasureEntryKind, TreasureTransaction, round_cents};

use crate::error::{HouseError, HouseResult};

fn validate_movement(amount: f64, description: &str) -> HouseResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(HouseError::validation("Please provide a valid positive amount."));
    }
    if description.trim().is_empty() {
        return Err(HouseError::validation("Please provide a description for the treasure entry."));
    }
    Ok(())
}

fn apply(room: &Room, kind: TreasureEntryKind, amount: f64, description: &str, at: DateTime<Utc>) -> Room {
    let treasure = match kind {
        TreasureEntryKind::Credit => room.treasure + amount,
        TreasureEntryKind::Debit => room.treasure - amount,
    };

    let mut transactions = room.treasure_transactions.clone();
    transactions.push(TreasureTransaction {
        description: description.trim().to_string(),
        amount,
        kind,
        date: at,
    });

    Room {
        treasure: round_cents(treasure),
        treasure_transactions: transactions,
        ..room.clone()
    }
}

/// Add money to the pool
pub fn credit(room: &Room, amount: f64, description: &str, at: DateTime<Utc>) -> HouseResult<Room> {
    validate_movement(amount, description)?;
    Ok(apply(room, TreasureEntryKind::Credit, amount, description, at))
}

/// Spend money from the pool; the pool never goes negative
pub fn debit(room: &Room, amount: f64, description: &str, at: DateTime<Utc>) -> HouseResult<Room> {
    validate_movement(amount, description)?;
    if room.treasure < amount {
        return Err(HouseError::validation(format!(
            "Insufficient funds in treasure for this transaction ({:.2} available).",
            room.treasure
        )));
    }
    Ok(apply(room, TreasureEntryKind::Debit, amount, description, at))
}

/// Transaction history, most recent first
pub fn history_newest_first(room: &Room) -> Vec<TreasureTransaction> {
    let mut history = room.treasure_transactions.clone();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}
