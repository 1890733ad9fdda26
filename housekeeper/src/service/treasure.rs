//! Room treasure operations

use chrono::Utc;
use serde::{Deserialize, Serialize};

use shared::{Component, RoomId, TreasureTransaction, UserId, component_info};

use super::HouseService;
use crate::core::treasure;
use crate::error::HouseResult;
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

/// Pool balance after a movement, with the recorded entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TreasureStatus {
    pub room_id: RoomId,
    pub current_treasure: f64,
    pub transaction: Option<TreasureTransaction>,
}

impl<M, L, D> HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    /// Admin: add money to the room treasure
    pub async fn add_treasure(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        amount: f64,
        description: &str,
    ) -> HouseResult<TreasureStatus> {
        let room = self.room_for_admin(room_id, actor, "add to the treasure").await?;
        let updated = treasure::credit(&room, amount, description, Utc::now())?;
        self.membership.save_room(updated.clone()).await?;

        component_info!(Component::Treasure, room = %room.id, "💰 Added {:.2}, treasure now {:.2}", amount, updated.treasure);
        Ok(TreasureStatus {
            room_id: updated.id,
            current_treasure: updated.treasure,
            transaction: updated.treasure_transactions.last().cloned(),
        })
    }

    /// Admin: spend money from the room treasure
    pub async fn spend_treasure(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        amount: f64,
        description: &str,
    ) -> HouseResult<TreasureStatus> {
        let room = self.room_for_admin(room_id, actor, "record treasure transactions").await?;
        let updated = treasure::debit(&room, amount, description, Utc::now())?;
        self.membership.save_room(updated.clone()).await?;

        component_info!(Component::Treasure, room = %room.id, "Spent {:.2}, treasure now {:.2}", amount, updated.treasure);
        Ok(TreasureStatus {
            room_id: updated.id,
            current_treasure: updated.treasure,
            transaction: updated.treasure_transactions.last().cloned(),
        })
    }

    pub async fn current_treasure(&self, actor: &UserId, room_id: &RoomId) -> HouseResult<TreasureStatus> {
        let room = self.room_for_member(room_id, actor, "view its treasure").await?;
        Ok(TreasureStatus {
            room_id: room.id,
            current_treasure: room.treasure,
            transaction: None,
        })
    }

    /// Treasure history, most recent first
    pub async fn treasure_transactions(
        &self,
        actor: &UserId,
        room_id: &RoomId,
    ) -> HouseResult<Vec<TreasureTransaction>> {
        let room = self.room_for_member(room_id, actor, "view its treasure transactions").await?;
        Ok(treasure::history_newest_first(&room))
    }
}
