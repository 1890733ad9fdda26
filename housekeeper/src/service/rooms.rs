//! Room lifecycle and membership management

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

use shared::{
    Component, Role, Room, RoomId, RoomMember, RoomSummary, UserId, component_info, component_warn,
    is_effectively_zero,
};

use super::HouseService;
use crate::error::{HouseError, HouseResult};
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

const JOIN_CODE_LEN: usize = 6;
const MAX_JOIN_CODE_ATTEMPTS: usize = 32;

/// Member entry with populated user details
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MemberView {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
}

/// Room as shown to its members
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoomDetails {
    pub id: RoomId,
    pub name: String,
    pub code: String,
    pub treasure: f64,
    pub members: Vec<MemberView>,
}

fn generate_join_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(JOIN_CODE_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

impl<M, L, D> HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    /// Create a room; the creator becomes its only admin
    pub async fn create_room(&self, actor: &UserId, name: &str) -> HouseResult<Room> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HouseError::validation("Please add a room name."));
        }
        self.user(actor).await?;

        let code = self.unused_join_code().await?;
        let room = Room::new(name, code, *actor);
        self.membership.save_room(room.clone()).await?;

        component_info!(Component::Rooms, room = %room.id, "🏠 Created room '{}' ({})", room.name, room.code);
        Ok(room)
    }

    async fn unused_join_code(&self) -> HouseResult<String> {
        for _ in 0..MAX_JOIN_CODE_ATTEMPTS {
            let code = generate_join_code();
            if self.membership.find_room_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }
        Err(HouseError::storage("generate join code", "no unused code found"))
    }

    /// Join a room by its short code as a regular member
    pub async fn join_room(&self, actor: &UserId, code: &str) -> HouseResult<RoomSummary> {
        let code = code.trim();
        if code.is_empty() {
            return Err(HouseError::validation("Please provide a Room ID."));
        }
        self.user(actor).await?;

        let mut room = self
            .membership
            .find_room_by_code(code)
            .await?
            .ok_or_else(|| HouseError::not_found("Room", code))?;
        if room.is_member(actor) {
            return Err(HouseError::validation("You are already a member of this room."));
        }

        room.members.push(RoomMember { user: *actor, role: Role::User });
        self.membership.save_room(room.clone()).await?;

        component_info!(Component::Rooms, room = %room.id, "User {} joined room '{}'", actor, room.name);
        Ok(room.summary())
    }

    /// Rooms the actor belongs to
    pub async fn my_rooms(&self, actor: &UserId) -> HouseResult<Vec<RoomSummary>> {
        let rooms = self.membership.rooms_for_user(actor).await?;
        Ok(rooms.iter().map(Room::summary).collect())
    }

    pub async fn room_details(&self, actor: &UserId, room_id: &RoomId) -> HouseResult<RoomDetails> {
        let room = self.room_for_member(room_id, actor, "view it").await?;
        self.details_of(&room).await
    }

    async fn details_of(&self, room: &Room) -> HouseResult<RoomDetails> {
        let mut members = Vec::with_capacity(room.members.len());
        for member in &room.members {
            let user = self.membership.find_user(&member.user).await?;
            members.push(MemberView {
                id: member.user,
                name: user
                    .as_ref()
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| super::UNKNOWN_MEMBER_NAME.to_string()),
                email: user.map(|u| u.email),
                role: member.role,
            });
        }

        Ok(RoomDetails {
            id: room.id,
            name: room.name.clone(),
            code: room.code.clone(),
            treasure: room.treasure,
            members,
        })
    }

    /// Admin: add a registered user to the room by email
    pub async fn add_member(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        email: &str,
        role: Option<Role>,
    ) -> HouseResult<RoomDetails> {
        let mut room = self.room_for_admin(room_id, actor, "add members").await?;

        let user = self
            .membership
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| HouseError::not_found("User", email.trim()))?;
        if room.is_member(&user.id) {
            return Err(HouseError::validation("User is already a member of this room."));
        }

        room.members.push(RoomMember { user: user.id, role: role.unwrap_or_default() });
        self.membership.save_room(room.clone()).await?;

        component_info!(Component::Rooms, room = %room.id, "Added {} to room '{}'", user.name, room.name);
        self.details_of(&room).await
    }

    /// Admin: remove a member whose balance is settled
    pub async fn remove_member(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        target: &UserId,
    ) -> HouseResult<RoomDetails> {
        let mut room = self.room_for_admin(room_id, actor, "remove members").await?;

        if !room.is_member(target) {
            return Err(HouseError::not_found("Member", target));
        }
        if target == actor && room.admin_count() == 1 {
            return Err(HouseError::validation(
                "You cannot remove yourself as you are the last admin. Appoint another admin first or delete the room.",
            ));
        }
        self.ensure_settled(&room, target).await?;

        room.members.retain(|m| &m.user != target);
        self.membership.save_room(room.clone()).await?;

        component_info!(Component::Rooms, room = %room.id, "Removed {} from room '{}'", target, room.name);
        self.details_of(&room).await
    }

    /// Admin: change a member's role
    pub async fn change_role(
        &self,
        actor: &UserId,
        room_id: &RoomId,
        target: &UserId,
        new_role: Role,
    ) -> HouseResult<RoomDetails> {
        let mut room = self.room_for_admin(room_id, actor, "change member roles").await?;

        if !room.is_member(target) {
            return Err(HouseError::not_found("Member", target));
        }
        if target == actor && new_role == Role::User && room.admin_count() == 1 {
            return Err(HouseError::validation(
                "You cannot demote yourself as you are the last admin. Appoint another admin first.",
            ));
        }

        for member in room.members.iter_mut().filter(|m| &m.user == target) {
            member.role = new_role;
        }
        self.membership.save_room(room.clone()).await?;

        component_info!(Component::Rooms, room = %room.id, "Role of {} is now {}", target, new_role);
        self.details_of(&room).await
    }

    /// Leave a room; the last admin and members with open balances cannot
    pub async fn leave_room(&self, actor: &UserId, room_id: &RoomId) -> HouseResult<()> {
        let mut room = self.load_room(room_id).await?;

        if !room.is_member(actor) {
            return Err(HouseError::validation("You are not a member of this room."));
        }
        if room.is_admin(actor) && room.admin_count() == 1 {
            return Err(HouseError::validation(
                "You cannot leave as you are the last admin. Appoint another admin first or delete the room.",
            ));
        }
        self.ensure_settled(&room, actor).await?;

        room.members.retain(|m| &m.user != actor);
        self.membership.save_room(room.clone()).await?;

        component_info!(Component::Rooms, room = %room.id, "User {} left room '{}'", actor, room.name);
        Ok(())
    }

    /// Admin: delete an empty room with no expenses, along with its duties
    pub async fn delete_room(&self, actor: &UserId, room_id: &RoomId) -> HouseResult<()> {
        let room = self.room_for_admin(room_id, actor, "delete a room").await?;

        if room.members.len() > 1 {
            return Err(HouseError::validation(
                "Room cannot be deleted. All other members must leave the room first.",
            ));
        }
        let expenses = self.ledger.find_expenses_by_room(room_id).await?;
        if !expenses.is_empty() {
            component_warn!(
                Component::Rooms,
                room = %room.id,
                "Refusing to delete room with {} expenses",
                expenses.len()
            );
            return Err(HouseError::validation(
                "Room cannot be deleted. All expenses must be deleted or settled first.",
            ));
        }

        self.membership.delete_room(room_id).await?;
        self.duties.delete_duty_config(room_id).await?;

        component_info!(Component::Rooms, room = %room.id, "🗑️ Deleted room '{}'", room.name);
        Ok(())
    }

    /// Fail unless the member's balance is effectively zero
    async fn ensure_settled(&self, room: &Room, member: &UserId) -> HouseResult<()> {
        let report = self.balance_report(room).await?;
        let Some(amount) = report.balance_of(member) else {
            return Ok(());
        };
        if !is_effectively_zero(amount) {
            let name = report
                .raw_balances
                .iter()
                .find(|b| &b.id == member)
                .map(|b| b.name.clone())
                .unwrap_or_else(|| member.to_string());
            return Err(HouseError::validation(format!(
                "{name} has outstanding debts or credits ({amount:.2}). Please settle all expenses first."
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::traits::{MockDutyStore, MockLedgerStore, MockMembershipStore};

    #[test]
    fn test_join_codes_are_six_uppercase_alphanumerics() {
        for _ in 0..50 {
            let code = generate_join_code();
            assert_eq!(code.len(), JOIN_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[tokio::test]
    async fn test_failed_room_delete_keeps_duties() {
        let admin = UserId::new();
        let room = Room::new("Studio", "ABC123", admin);
        let room_id = room.id;

        let mut membership = MockMembershipStore::new();
        membership
            .expect_find_room_by_id()
            .returning(move |_| Ok(Some(room.clone())));
        membership
            .expect_delete_room()
            .times(1)
            .returning(|_| Err(HouseError::storage("delete room", "disk full")));

        let mut ledger = MockLedgerStore::new();
        ledger.expect_find_expenses_by_room().returning(|_| Ok(vec![]));

        let mut duties = MockDutyStore::new();
        duties.expect_delete_duty_config().never();

        let service = HouseService::new(Arc::new(membership), Arc::new(ledger), Arc::new(duties));
        let err = service.delete_room(&admin, &room_id).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
