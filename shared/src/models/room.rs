//! Users, rooms and the room treasure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Role, RoomId, TreasureEntryKind, UserId};

/// Registered user
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Membership entry of a room
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomMember {
    pub user: UserId,
    pub role: Role,
}

/// Single movement of the treasure pool
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TreasureTransaction {
    pub description: String,
    pub amount: f64,
    pub kind: TreasureEntryKind,
    pub date: DateTime<Utc>,
}

/// Room document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Short join code shared with new members
    pub code: String,
    pub members: Vec<RoomMember>,
    /// Current amount held in the shared pool
    pub treasure: f64,
    pub treasure_transactions: Vec<TreasureTransaction>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create a room whose creator is its only admin
    pub fn new(name: impl Into<String>, code: impl Into<String>, creator: UserId) -> Self {
        Self {
            id: RoomId::new(),
            name: name.into(),
            code: code.into(),
            members: vec![RoomMember {
                user: creator,
                role: Role::Admin,
            }],
            treasure: 0.0,
            treasure_transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn member(&self, user: &UserId) -> Option<&RoomMember> {
        self.members.iter().find(|m| &m.user == user)
    }

    pub fn is_member(&self, user: &UserId) -> bool {
        self.member(user).is_some()
    }

    pub fn is_admin(&self, user: &UserId) -> bool {
        self.member(user).is_some_and(|m| m.role == Role::Admin)
    }

    pub fn admin_count(&self) -> usize {
        self.members.iter().filter(|m| m.role == Role::Admin).count()
    }

    /// Member ids in membership order, without duplicates
    pub fn member_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = Vec::with_capacity(self.members.len());
        for member in &self.members {
            if !ids.contains(&member.user) {
                ids.push(member.user);
            }
        }
        ids
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            name: self.name.clone(),
            code: self.code.clone(),
        }
    }
}

/// Lightweight listing entry for a user's rooms
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_is_admin() {
        let creator = UserId::new();
        let room = Room::new("Flat 4B", "AB12CD", creator);

        assert!(room.is_member(&creator));
        assert!(room.is_admin(&creator));
        assert_eq!(room.admin_count(), 1);
        assert_eq!(room.treasure, 0.0);
    }

    #[test]
    fn test_member_ids_are_deduplicated() {
        let creator = UserId::new();
        let other = UserId::new();
        let mut room = Room::new("Flat", "XYZ123", creator);
        room.members.push(RoomMember { user: other, role: Role::User });
        room.members.push(RoomMember { user: other, role: Role::User });

        assert_eq!(room.member_ids(), vec![creator, other]);
        assert!(!room.is_admin(&other));
    }
}
