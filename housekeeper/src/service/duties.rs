//! Duty configuration and lookup

use shared::{Component, DutyConfig, DutyTable, RoomId, UserId, component_info};

use super::HouseService;
use crate::core::{configure_duties, skip_members};
use crate::error::{HouseError, HouseResult};
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

impl<M, L, D> HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    /// Admin: replace the room's duty configuration
    pub async fn configure_duties(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        descriptions: &[String],
        member_order: &[UserId],
    ) -> HouseResult<DutyConfig> {
        let room = self.room_for_admin(room_id, actor, "configure duties").await?;
        let config = configure_duties(room.id, descriptions, member_order, &room.member_ids())?;
        self.duties.save_duty_config(config.clone()).await?;

        component_info!(
            Component::Duties,
            room = %room.id,
            "🧹 Configured {} duties over {} members",
            config.duties.len(),
            config.member_order.len()
        );
        Ok(config)
    }

    /// Current assignments as seen by the actor
    pub async fn duty_table(&self, actor: &UserId, room_id: &RoomId) -> HouseResult<DutyTable> {
        self.room_for_member(room_id, actor, "view its duties").await?;

        let config = match self.duties.find_duty_config(room_id).await? {
            Some(config) if config.is_active() => config,
            _ => return Ok(DutyTable::unconfigured()),
        };

        Ok(DutyTable {
            is_configured: true,
            current_user_duty: config.duty_of(actor).cloned(),
            all_duties: config.duties.clone(),
            skipped_members: config.skipped_members_for_current_cycle.clone(),
        })
    }

    /// Admin: mark members as skipped for the current cycle
    pub async fn skip_members(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        members: &[UserId],
    ) -> HouseResult<DutyConfig> {
        let room = self.room_for_admin(room_id, actor, "skip members").await?;
        let config = self
            .duties
            .find_duty_config(room_id)
            .await?
            .ok_or_else(|| HouseError::not_found("Duty configuration", room_id))?;

        let updated = skip_members(&config, members)?;
        self.duties.save_duty_config(updated.clone()).await?;

        component_info!(
            Component::Duties,
            room = %room.id,
            "Skipped {} member(s) for the current cycle",
            members.len()
        );
        Ok(updated)
    }
}
