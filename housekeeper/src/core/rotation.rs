//! Duty rotation
//!
//! Configuration builds a fresh duty document; each daily tick derives the
//! next document from the previous one. Neither mutates its input.

use chrono::Utc;
use shared::{DutyConfig, DutySlot, DutySlotId, RoomId, UserId};

use crate::error::{HouseError, HouseResult};

/// Advance the ring cursor by one, wrapping after the last position
pub fn next_cursor(current: usize, ring_len: usize) -> usize {
    if current >= ring_len.saturating_sub(1) {
        0
    } else {
        current + 1
    }
}

/// Compute the configuration for the next cycle
///
/// Slot `i` goes to ring position `next + i` modulo the ring length. A
/// configuration with no duties or no members comes back unchanged.
pub fn rotate_duty_cycle(config: &DutyConfig) -> DutyConfig {
    if !config.is_active() {
        return config.clone();
    }

    let ring = &config.member_order;
    let next = next_cursor(config.current_starting_member_index, ring.len());

    let duties = config
        .duties
        .iter()
        .enumerate()
        .map(|(i, slot)| DutySlot {
            assigned_to: Some(ring[(next + i) % ring.len()]),
            ..slot.clone()
        })
        .collect();

    DutyConfig {
        duties,
        current_starting_member_index: next,
        updated_at: Utc::now(),
        ..config.clone()
    }
}

/// Build a new duty configuration for a room
///
/// Replaces any previous configuration wholesale: the cursor starts at zero,
/// the skip set is empty and slot `i` is held by `member_order[i]`.
pub fn configure_duties(
    room_id: RoomId,
    descriptions: &[String],
    member_order: &[UserId],
    room_members: &[UserId],
) -> HouseResult<DutyConfig> {
    if descriptions.is_empty() {
        return Err(HouseError::validation("Please provide at least one duty."));
    }
    if member_order.is_empty() {
        return Err(HouseError::validation(
            "Please provide an order of members for duties.",
        ));
    }
    if descriptions.len() > member_order.len() {
        return Err(HouseError::validation(
            "Number of duties cannot be greater than the number of members in the order.",
        ));
    }
    if descriptions.iter().any(|d| d.trim().is_empty()) {
        return Err(HouseError::validation("Duty descriptions cannot be blank."));
    }
    if member_order.iter().any(|id| !room_members.contains(id)) {
        return Err(HouseError::validation(
            "One or more member IDs in the order are not valid room members.",
        ));
    }

    let duties = descriptions
        .iter()
        .zip(member_order)
        .map(|(description, member)| DutySlot {
            id: DutySlotId::new(),
            description: description.trim().to_string(),
            assigned_to: Some(*member),
        })
        .collect();

    Ok(DutyConfig {
        room_id,
        duties,
        member_order: member_order.to_vec(),
        current_starting_member_index: 0,
        skipped_members_for_current_cycle: Vec::new(),
        updated_at: Utc::now(),
    })
}

/// Record members as skipped for the current cycle
///
/// The skip set is stored and reported but rotation does not read it.
pub fn skip_members(config: &DutyConfig, members: &[UserId]) -> HouseResult<DutyConfig> {
    if members.is_empty() {
        return Err(HouseError::validation("Please provide at least one user to skip."));
    }

    let mut skipped = config.skipped_members_for_current_cycle.clone();
    for member in members {
        if !config.member_order.contains(member) {
            return Err(HouseError::validation(format!(
                "User {member} is not part of the duty member order."
            )));
        }
        if skipped.contains(member) {
            return Err(HouseError::validation(format!(
                "User {member} is already skipped for the current cycle."
            )));
        }
        skipped.push(*member);
    }

    Ok(DutyConfig {
        skipped_members_for_current_cycle: skipped,
        updated_at: Utc::now(),
        ..config.clone()
    })
}
