//! Expense ledger operations and balances

use chrono::Utc;

use shared::{
    BalanceReport, Component, Expense, ExpenseId, NewExpense, Room, RoomId, UserId, component_debug,
    component_info,
};

use super::HouseService;
use crate::core::{compute_balances, derive_splits};
use crate::error::{HouseError, HouseResult};
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

impl<M, L, D> HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    /// Record a new expense after deriving its splits
    pub async fn add_expense(&self, actor: &UserId, request: NewExpense) -> HouseResult<Expense> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(HouseError::validation("Please provide all required expense details."));
        }

        let room = self.room_for_member(&request.room_id, actor, "add expenses").await?;
        if !room.is_member(&request.paid_by) {
            return Err(HouseError::validation(
                "The \"Paid By\" user is not a member of this room.",
            ));
        }

        let splits = derive_splits(
            request.split_type,
            request.total_amount,
            &request.splits,
            &room.member_ids(),
        )?;

        let expense = Expense {
            id: ExpenseId::new(),
            room_id: room.id,
            description: description.to_string(),
            total_amount: request.total_amount,
            paid_by: request.paid_by,
            split_type: request.split_type,
            splits,
            date: Utc::now(),
        };
        self.ledger.create_expense(expense.clone()).await?;

        component_info!(
            Component::Ledger,
            room = %room.id,
            expense = %expense.id,
            "💸 Added {} expense '{}' of {:.2}",
            expense.split_type,
            expense.description,
            expense.total_amount
        );
        Ok(expense)
    }

    /// Delete an expense; only its payer or a room admin may do so
    pub async fn delete_expense(&self, actor: &UserId, expense_id: &ExpenseId) -> HouseResult<()> {
        let expense = self
            .ledger
            .find_expense(expense_id)
            .await?
            .ok_or_else(|| HouseError::not_found("Expense", expense_id))?;
        let room = self.load_room(&expense.room_id).await?;

        if !room.is_admin(actor) && &expense.paid_by != actor {
            return Err(HouseError::unauthorized(
                "Only the creator or a room admin can delete this expense.",
            ));
        }

        self.ledger.delete_expense(expense_id).await?;
        component_info!(Component::Ledger, room = %room.id, expense = %expense.id, "Deleted expense '{}'", expense.description);
        Ok(())
    }

    /// Room ledger, most recent first
    pub async fn room_expenses(&self, actor: &UserId, room_id: &RoomId) -> HouseResult<Vec<Expense>> {
        self.room_for_member(room_id, actor, "view its expenses").await?;

        let mut expenses = self.ledger.find_expenses_by_room(room_id).await?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// Net balances and the simplified settlement plan of a room
    pub async fn room_balances(&self, actor: &UserId, room_id: &RoomId) -> HouseResult<BalanceReport> {
        let room = self.room_for_member(room_id, actor, "view its balances").await?;
        self.balance_report(&room).await
    }

    pub(super) async fn balance_report(&self, room: &Room) -> HouseResult<BalanceReport> {
        let profiles = self.member_profiles(room).await?;
        let expenses = self.ledger.find_expenses_by_room(&room.id).await?;
        component_debug!(
            Component::Ledger,
            room = %room.id,
            "Computing balances for {} members over {} expenses",
            profiles.len(),
            expenses.len()
        );
        Ok(compute_balances(&profiles, &expenses))
    }
}
