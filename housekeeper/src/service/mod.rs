//! Room service facade
//!
//! Every user-facing operation lives here: load documents through the store
//! traits, check membership or admin role before any mutation, hand the
//! snapshot to the pure engines in [`crate::core`] and write back whole
//! documents. Operations are split by concern across the submodules.

mod duties;
mod expenses;
mod rooms;
mod treasure;
mod users;

use std::sync::Arc;

use shared::{MemberProfile, Room, RoomId, UserId};

use crate::error::{HouseError, HouseResult};
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

pub use rooms::{MemberView, RoomDetails};
pub use treasure::TreasureStatus;

/// Display name used when a member's user document cannot be found
const UNKNOWN_MEMBER_NAME: &str = "Unknown member";

/// Service coordinating rooms, the ledger, the treasure and duties
pub struct HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    membership: Arc<M>,
    ledger: Arc<L>,
    duties: Arc<D>,
}

impl<M, L, D> Clone for HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            membership: Arc::clone(&self.membership),
            ledger: Arc::clone(&self.ledger),
            duties: Arc::clone(&self.duties),
        }
    }
}

impl<M, L, D> HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    /// Create new service with injected stores
    pub fn new(membership: Arc<M>, ledger: Arc<L>, duties: Arc<D>) -> Self {
        Self { membership, ledger, duties }
    }

    /// Load a room or fail with not-found
    async fn load_room(&self, id: &RoomId) -> HouseResult<Room> {
        self.membership
            .find_room_by_id(id)
            .await?
            .ok_or_else(|| HouseError::not_found("Room", id))
    }

    /// Load a room the actor belongs to
    async fn room_for_member(&self, id: &RoomId, actor: &UserId, action: &str) -> HouseResult<Room> {
        let room = self.load_room(id).await?;
        if !room.is_member(actor) {
            return Err(HouseError::unauthorized(format!(
                "You are not a member of this room and cannot {action}."
            )));
        }
        Ok(room)
    }

    /// Load a room the actor administers
    async fn room_for_admin(&self, id: &RoomId, actor: &UserId, action: &str) -> HouseResult<Room> {
        let room = self.load_room(id).await?;
        if !room.is_admin(actor) {
            return Err(HouseError::unauthorized(format!(
                "Only room admins can {action}."
            )));
        }
        Ok(room)
    }

    /// Membership snapshot with display names populated from the user directory
    async fn member_profiles(&self, room: &Room) -> HouseResult<Vec<MemberProfile>> {
        let mut profiles = Vec::with_capacity(room.members.len());
        for id in room.member_ids() {
            let name = self
                .membership
                .find_user(&id)
                .await?
                .map(|u| u.name)
                .unwrap_or_else(|| UNKNOWN_MEMBER_NAME.to_string());
            profiles.push(MemberProfile { id, name });
        }
        Ok(profiles)
    }
}
