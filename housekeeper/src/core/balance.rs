//! Balance computation and debt simplification
//!
//! Pure functions over a membership snapshot and the room ledger. Balances
//! are accumulated unrounded; rounding only happens on the way out.

use std::collections::HashMap;

use shared::{
    Balance, BalanceReport, Component, Expense, MONEY_TOLERANCE, MemberProfile, Settlement,
    UserId, component_debug, component_warn, round_cents,
};

/// Compute every member's net balance and the settlement plan
///
/// Ledger entries that reference users outside `members` (for instance
/// someone who has since left the room) are skipped, not treated as errors.
pub fn compute_balances(members: &[MemberProfile], expenses: &[Expense]) -> BalanceReport {
    let mut positions: Vec<Balance> = Vec::with_capacity(members.len());
    let mut index: HashMap<UserId, usize> = HashMap::with_capacity(members.len());

    for member in members {
        if index.contains_key(&member.id) {
            continue;
        }
        index.insert(member.id, positions.len());
        positions.push(Balance { id: member.id, name: member.name.clone(), amount: 0.0 });
    }

    for expense in expenses {
        match index.get(&expense.paid_by) {
            Some(&i) => positions[i].amount += expense.total_amount,
            None => component_warn!(
                Component::Ledger,
                expense = %expense.id,
                "Payer {} is not a current room member, skipping credit",
                expense.paid_by
            ),
        }

        for split in &expense.splits {
            match index.get(&split.user) {
                Some(&i) => positions[i].amount -= split.amount,
                None => component_warn!(
                    Component::Ledger,
                    expense = %expense.id,
                    "Split user {} is not a current room member, skipping debit",
                    split.user
                ),
            }
        }
    }

    let simplified_debts = simplify_debts(&positions);
    component_debug!(
        Component::Ledger,
        "Computed {} balances from {} expenses, {} settlements",
        positions.len(),
        expenses.len(),
        simplified_debts.len()
    );

    let raw_balances = positions
        .into_iter()
        .map(|b| Balance { amount: round_cents(b.amount), ..b })
        .collect();

    BalanceReport { raw_balances, simplified_debts }
}

/// Greedy largest-first matching of debtors against creditors
///
/// Creditors are taken in descending order and debtors most-negative first.
/// Both sorts are stable so equal amounts keep the input order, which makes
/// the plan deterministic.
pub fn simplify_debts(balances: &[Balance]) -> Vec<Settlement> {
    let mut creditors: Vec<Balance> = balances.iter().filter(|b| b.amount > 0.0).cloned().collect();
    creditors.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let mut debtors: Vec<Balance> = balances.iter().filter(|b| b.amount < 0.0).cloned().collect();
    debtors.sort_by(|a, b| a.amount.total_cmp(&b.amount));

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let amount = debtor.amount.abs().min(creditor.amount);
        if amount > MONEY_TOLERANCE {
            settlements.push(Settlement {
                from: debtor.id,
                from_name: debtor.name.clone(),
                to: creditor.id,
                to_name: creditor.name.clone(),
                amount: round_cents(amount),
            });
        }

        debtor.amount += amount;
        creditor.amount -= amount;

        if debtor.amount.abs() < MONEY_TOLERANCE {
            i += 1;
        }
        if creditor.amount < MONEY_TOLERANCE {
            j += 1;
        }
    }

    settlements
}
