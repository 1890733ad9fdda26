//! Test fixtures with stable identifiers

use shared::{User, UserId};

/// Standard test data
pub struct TestFixtures;

impl TestFixtures {
    /// Standard test user IDs using proper UUID format
    pub const ALICE: &'static str = "550e8400-e29b-41d4-a716-446655440001";
    pub const BOB: &'static str = "550e8400-e29b-41d4-a716-446655440002";
    pub const CAROL: &'static str = "550e8400-e29b-41d4-a716-446655440003";
    pub const DAVE: &'static str = "550e8400-e29b-41d4-a716-446655440004";

    pub const ROOM_NAME: &'static str = "Flat 4B";

    pub fn alice_id() -> UserId {
        UserId::from_string(Self::ALICE).unwrap()
    }

    pub fn bob_id() -> UserId {
        UserId::from_string(Self::BOB).unwrap()
    }

    pub fn carol_id() -> UserId {
        UserId::from_string(Self::CAROL).unwrap()
    }

    /// Registered but not in the standard room
    pub fn dave_id() -> UserId {
        UserId::from_string(Self::DAVE).unwrap()
    }

    pub fn alice() -> User {
        Self::user(Self::alice_id(), "Alice")
    }

    pub fn bob() -> User {
        Self::user(Self::bob_id(), "Bob")
    }

    pub fn carol() -> User {
        Self::user(Self::carol_id(), "Carol")
    }

    pub fn dave() -> User {
        Self::user(Self::dave_id(), "Dave")
    }

    fn user(id: UserId, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    pub fn duty_names() -> Vec<String> {
        vec!["Dishes".to_string(), "Trash".to_string()]
    }
}
