//! # Session State
//!
//! Who is signed in and the sale they are building.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session                                              │
//! │                                                                         │
//! │  ┌──────────┐  login   ┌──────────────┐  checkout  ┌──────────────┐    │
//! │  │ Signed   │────────►│ Signed in    │──────────►│ Signed in    │    │
//! │  │ out      │         │ empty cart   │◄──────────│ cart in use  │    │
//! │  └──────────┘         └──────────────┘  add/set   └──────────────┘    │
//! │       ▲                      │                          │              │
//! │       └──────── logout ──────┴──────────────────────────┘              │
//! │                  (cart discarded)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One session per register process. Only one operator at a time, so no
//! locking.

use ranil_core::{Cart, User};
use tracing::info;

use crate::error::{ShellError, ShellResult};

/// The signed-in user and their cart.
#[derive(Debug, Default)]
pub struct SessionState {
    active: Option<Active>,
}

#[derive(Debug)]
struct Active {
    user: User,
    cart: Cart,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Signs a user in with a fresh cart, replacing any previous session.
    pub fn login(&mut self, user: User) {
        info!(user_id = %user.id, username = %user.username, role = ?user.role, "Signed in");
        let cart = Cart::new(user.id.clone());
        self.active = Some(Active { user, cart });
    }

    /// Signs out, discarding the cart. Returns who was signed in.
    pub fn logout(&mut self) -> Option<User> {
        let previous = self.active.take().map(|a| a.user);
        if let Some(user) = &previous {
            info!(user_id = %user.id, "Signed out");
        }
        previous
    }

    pub fn user(&self) -> Option<&User> {
        self.active.as_ref().map(|a| &a.user)
    }

    /// The signed-in user, or `NotSignedIn`.
    pub fn require_user(&self) -> ShellResult<&User> {
        self.user().ok_or_else(ShellError::not_signed_in)
    }

    /// The signed-in user if they are an administrator.
    pub fn require_admin(&self, what: &str) -> ShellResult<&User> {
        let user = self.require_user()?;
        if !user.role.is_admin() {
            return Err(ShellError::forbidden(what));
        }
        Ok(user)
    }

    /// The current cart, if signed in.
    pub fn cart(&self) -> Option<&Cart> {
        self.active.as_ref().map(|a| &a.cart)
    }

    pub fn cart_mut(&mut self) -> ShellResult<&mut Cart> {
        self.active
            .as_mut()
            .map(|a| &mut a.cart)
            .ok_or_else(ShellError::not_signed_in)
    }
}
