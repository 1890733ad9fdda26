//! Split derivation for new expenses
//!
//! Turns caller-supplied split entries into stored per-member amounts
//! according to the split type. Runs once, when the expense is created;
//! balances only ever read the derived amounts.

use shared::{MONEY_TOLERANCE, Split, SplitInput, SplitType, UserId, round_cents};

use crate::error::{HouseError, HouseResult};

/// Derive the stored splits of an expense
///
/// Every entry must reference a room member and the total must be positive.
/// Any violation rejects the whole expense.
pub fn derive_splits(
    split_type: SplitType,
    total_amount: f64,
    inputs: &[SplitInput],
    room_members: &[UserId],
) -> HouseResult<Vec<Split>> {
    if !total_amount.is_finite() || total_amount <= 0.0 {
        return Err(HouseError::validation("Total amount must be a positive number."));
    }
    if inputs.is_empty() {
        return Err(HouseError::validation(
            "At least one member must be specified in splits.",
        ));
    }
    if let Some(outsider) = inputs.iter().find(|s| !room_members.contains(&s.user)) {
        return Err(HouseError::validation(format!(
            "User {} in splits is not a member of this room.",
            outsider.user
        )));
    }

    match split_type {
        SplitType::Equal => Ok(equal_splits(total_amount, inputs)),
        SplitType::Unequal => unequal_splits(total_amount, inputs),
        SplitType::Percentage => percentage_splits(total_amount, inputs),
        SplitType::Shares => share_splits(total_amount, inputs),
    }
}

fn equal_splits(total_amount: f64, inputs: &[SplitInput]) -> Vec<Split> {
    // Rounding drift of a few cents across participants is accepted
    let per_person = round_cents(total_amount / inputs.len() as f64);
    inputs
        .iter()
        .map(|s| Split { user: s.user, amount: per_person, percentage: None, shares: None })
        .collect()
}

fn unequal_splits(total_amount: f64, inputs: &[SplitInput]) -> HouseResult<Vec<Split>> {
    let mut sum = 0.0;
    let mut splits = Vec::with_capacity(inputs.len());

    for input in inputs {
        let amount = match input.amount {
            Some(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => {
                return Err(HouseError::validation(
                    "For unequal split, each member must have a valid positive amount.",
                ));
            }
        };
        sum += amount;
        splits.push(Split {
            user: input.user,
            amount: round_cents(amount),
            percentage: None,
            shares: None,
        });
    }

    if (sum - total_amount).abs() > MONEY_TOLERANCE {
        return Err(HouseError::validation(format!(
            "Sum of unequal amounts ({sum:.2}) does not match the total amount ({total_amount:.2})."
        )));
    }
    Ok(splits)
}

fn percentage_splits(total_amount: f64, inputs: &[SplitInput]) -> HouseResult<Vec<Split>> {
    let mut total_percentage = 0.0;
    let mut splits = Vec::with_capacity(inputs.len());

    for input in inputs {
        let percentage = match input.percentage {
            Some(p) if p.is_finite() && (0.0..=100.0).contains(&p) => p,
            _ => {
                return Err(HouseError::validation(
                    "For percentage split, each member must have a valid percentage (0-100).",
                ));
            }
        };
        total_percentage += percentage;
        splits.push(Split {
            user: input.user,
            amount: round_cents(total_amount * percentage / 100.0),
            percentage: Some(percentage),
            shares: None,
        });
    }

    if (total_percentage - 100.0).abs() > MONEY_TOLERANCE {
        return Err(HouseError::validation(format!(
            "Sum of percentages must be 100% (got {total_percentage}%)."
        )));
    }
    Ok(splits)
}

fn share_splits(total_amount: f64, inputs: &[SplitInput]) -> HouseResult<Vec<Split>> {
    let mut shares = Vec::with_capacity(inputs.len());
    for input in inputs {
        match input.shares {
            Some(s) if s.is_finite() && s > 0.0 => shares.push(s),
            _ => {
                return Err(HouseError::validation(
                    "For shares split, each member must have a valid positive number of shares.",
                ));
            }
        }
    }

    let total_shares: f64 = shares.iter().sum();
    if total_shares == 0.0 {
        return Err(HouseError::validation("Total shares cannot be zero."));
    }

    let per_share = total_amount / total_shares;
    Ok(inputs
        .iter()
        .zip(shares)
        .map(|(input, s)| Split {
            user: input.user,
            amount: round_cents(s * per_share),
            percentage: None,
            shares: Some(s),
        })
        .collect())
}
