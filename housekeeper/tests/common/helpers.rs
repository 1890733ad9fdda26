//! Test helpers and builder patterns for service tests

use std::sync::Arc;

use housekeeper::{DutyScheduler, HouseResult, HouseService, InMemoryStore, MembershipStore, TickSchedule};
use shared::{NewExpense, RoomId, SplitInput, SplitType, User, UserId};

use super::fixtures::TestFixtures;

pub type TestService = HouseService<InMemoryStore, InMemoryStore, InMemoryStore>;

/// A service over an in-memory store plus one room set up for the test
pub struct Household {
    pub service: TestService,
    pub store: Arc<InMemoryStore>,
    pub room_id: RoomId,
}

impl Household {
    /// Scheduler sharing this household's store
    pub fn scheduler(&self) -> DutyScheduler<InMemoryStore> {
        DutyScheduler::new(Arc::clone(&self.store), TickSchedule::default())
    }
}

/// Builder for households with sensible defaults
pub struct HouseholdBuilder {
    users: Vec<User>,
    admin: User,
    joiners: Vec<UserId>,
}

impl HouseholdBuilder {
    /// Alice administers a room that Bob and Carol have joined; Dave is registered only
    pub fn new() -> Self {
        Self {
            users: vec![
                TestFixtures::alice(),
                TestFixtures::bob(),
                TestFixtures::carol(),
                TestFixtures::dave(),
            ],
            admin: TestFixtures::alice(),
            joiners: vec![TestFixtures::bob_id(), TestFixtures::carol_id()],
        }
    }

    pub fn with_joiners(mut self, joiners: Vec<UserId>) -> Self {
        self.joiners = joiners;
        self
    }

    pub async fn build(self) -> Household {
        let store = Arc::new(InMemoryStore::new());
        for user in self.users {
            store.save_user(user).await.unwrap();
        }

        let service = HouseService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store));
        let room = service.create_room(&self.admin.id, TestFixtures::ROOM_NAME).await.unwrap();
        for joiner in &self.joiners {
            service.join_room(joiner, &room.code).await.unwrap();
        }

        Household { service, store, room_id: room.id }
    }
}

/// Test helper functions for common operations
pub struct TestHelpers;

impl TestHelpers {
    /// Standard three-member household
    pub async fn household() -> Household {
        HouseholdBuilder::new().build().await
    }

    /// Expense paid by `paid_by`, split equally between `participants`
    pub fn equal_expense(room: RoomId, paid_by: UserId, total: f64, participants: &[UserId]) -> NewExpense {
        NewExpense {
            room_id: room,
            description: "Groceries".to_string(),
            total_amount: total,
            paid_by,
            split_type: SplitType::Equal,
            splits: participants.iter().copied().map(SplitInput::participant).collect(),
        }
    }

    /// Assert a member's rounded balance
    pub fn assert_balance(report: &shared::BalanceReport, user: &UserId, expected: f64) {
        let actual = report.balance_of(user).expect("member has a balance");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected balance {expected} for {user}, got {actual}"
        );
    }

    /// Assert the error maps onto the given status
    pub fn assert_status<T: std::fmt::Debug>(result: HouseResult<T>, status: u16) {
        match result {
            Ok(value) => panic!("expected error with status {status}, got Ok({value:?})"),
            Err(e) => assert_eq!(e.status_code(), status, "unexpected error: {e}"),
        }
    }
}
