//! # User Repository
//!
//! Register accounts. There are no passwords here: signing in only picks
//! an active account and its role.

use std::sync::Arc;

use ranil_core::validation::{validate_product_id, validate_username};
use ranil_core::User;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::Tables;

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    tables: Arc<Tables>,
}

impl UserRepository {
    pub(crate) fn new(tables: Arc<Tables>) -> Self {
        UserRepository { tables }
    }

    pub fn get_by_id(&self, id: &str) -> Option<User> {
        self.tables
            .users
            .read()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Finds an active account by username (case-insensitive).
    ///
    /// Inactive accounts are treated as absent.
    pub fn find_active(&self, username: &str) -> Option<User> {
        let username = username.trim();
        self.tables
            .users
            .read()
            .iter()
            .find(|u| u.active && u.username.eq_ignore_ascii_case(username))
            .cloned()
    }

    pub fn list(&self) -> Vec<User> {
        self.tables.users.read().clone()
    }

    /// Inserts an account.
    ///
    /// ## Errors
    /// - `Validation` for a malformed id or username
    /// - `Duplicate` if the id or the username (any case) is taken
    pub fn insert(&self, user: User) -> StoreResult<User> {
        validate_product_id(&user.id)?;
        validate_username(&user.username)?;

        let mut users = self.tables.users.write();
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::duplicate("user id", &user.id));
        }
        if users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(StoreError::duplicate("username", &user.username));
        }

        debug!(id = %user.id, username = %user.username, role = ?user.role, "Inserting user");
        users.push(user.clone());
        Ok(user)
    }

    /// Activates or deactivates an account.
    pub fn set_active(&self, id: &str, active: bool) -> StoreResult<()> {
        let mut users = self.tables.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("User", id))?;

        info!(id = %id, username = %user.username, active, "Account status changed");
        user.active = active;
        Ok(())
    }
}
