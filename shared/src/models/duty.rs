//! Duty rotation documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DutySlotId, RoomId, UserId};

/// A recurring chore slot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DutySlot {
    pub id: DutySlotId,
    pub description: String,
    pub assigned_to: Option<UserId>,
}

/// Per-room duty configuration and rotation cursor
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DutyConfig {
    pub room_id: RoomId,
    /// Slot order is significant: slot `i` goes to ring position `cursor + i`
    pub duties: Vec<DutySlot>,
    /// Rotation ring
    pub member_order: Vec<UserId>,
    /// Ring position holding `duties[0]` for the current cycle
    pub current_starting_member_index: usize,
    pub skipped_members_for_current_cycle: Vec<UserId>,
    pub updated_at: DateTime<Utc>,
}

impl DutyConfig {
    /// Whether the rotation has anything to rotate
    pub fn is_active(&self) -> bool {
        !self.duties.is_empty() && !self.member_order.is_empty()
    }

    pub fn duty_of(&self, user: &UserId) -> Option<&DutySlot> {
        self.duties.iter().find(|d| d.assigned_to.as_ref() == Some(user))
    }
}

/// Duty overview for one viewer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DutyTable {
    pub is_configured: bool,
    pub current_user_duty: Option<DutySlot>,
    pub all_duties: Vec<DutySlot>,
    pub skipped_members: Vec<UserId>,
}

impl DutyTable {
    pub fn unconfigured() -> Self {
        Self {
            is_configured: false,
            current_user_duty: None,
            all_duties: Vec::new(),
            skipped_members: Vec::new(),
        }
    }
}
