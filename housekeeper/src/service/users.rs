//! User registration

use shared::{Component, User, UserId, component_info};

use super::HouseService;
use crate::error::{HouseError, HouseResult};
use crate::services::normalize_email;
use crate::traits::{DutyStore, LedgerStore, MembershipStore};

impl<M, L, D> HouseService<M, L, D>
where
    M: MembershipStore + 'static,
    L: LedgerStore + 'static,
    D: DutyStore + 'static,
{
    /// Register a new user; emails are unique regardless of case
    pub async fn register_user(&self, name: &str, email: &str) -> HouseResult<User> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() {
            return Err(HouseError::validation("Please fill in all fields."));
        }
        if !email.contains('@') {
            return Err(HouseError::validation(format!("Invalid email address: {email}")));
        }
        if self.membership.find_user_by_email(email).await?.is_some() {
            return Err(HouseError::validation("User already exists."));
        }

        let user = User::new(name, normalize_email(email));
        self.membership.save_user(user.clone()).await?;

        component_info!(Component::Rooms, user = %user.id, "👤 Registered user {}", user.name);
        Ok(user)
    }

    pub async fn user(&self, id: &UserId) -> HouseResult<User> {
        self.membership
            .find_user(id)
            .await?
            .ok_or_else(|| HouseError::not_found("User", id))
    }
}
