//! # Session Commands
//!
//! Sign in and sign out.
//!
//! There are no passwords: the register trusts whoever is at the counter
//! and only checks that the account exists and is active.

use tracing::{debug, warn};

use ranil_core::User;
use ranil_store::UserRepository;

use crate::error::{ShellError, ShellResult};
use crate::state::SessionState;

/// Signs in an active user by username (case-insensitive).
///
/// Any cart from a previous session is discarded.
pub fn login(users: &UserRepository, session: &mut SessionState, username: &str) -> ShellResult<User> {
    debug!(username, "login command");

    let user = users.find_active(username.trim()).ok_or_else(|| {
        warn!(username, "Login rejected");
        ShellError::not_found("Active user", username.trim())
    })?;

    session.login(user.clone());
    Ok(user)
}

/// Signs out the current user.
pub fn logout(session: &mut SessionState) -> ShellResult<User> {
    debug!("logout command");
    session.logout().ok_or_else(ShellError::not_signed_in)
}
