//! Admin area gate.
//!
//! The admin shell starts out `Loading` and settles exactly once on either
//! `Admin` or `NotAdmin`. Anything other than a confirmed admin role,
//! including a failed lookup, settles on `NotAdmin`.

use serde::Serialize;

use crate::roles::ROLE_ADMIN;

/// Where non-admins are sent.
pub const AUTH_REDIRECT: &str = "/auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RoleGate {
    Loading,
    Admin,
    NotAdmin { redirect: &'static str },
}

impl RoleGate {
    /// Settle the gate from the outcome of a role lookup.
    pub fn resolve<E>(lookup: Result<Option<String>, E>) -> Self {
        match lookup {
            Ok(Some(role)) if role == ROLE_ADMIN => RoleGate::Admin,
            _ => RoleGate::NotAdmin {
                redirect: AUTH_REDIRECT,
            },
        }
    }

    /// Whether the admin sidebar may render.
    pub fn allows_admin_ui(self) -> bool {
        matches!(self, RoleGate::Admin)
    }

    /// The redirect target, once settled on `NotAdmin`.
    pub fn redirect(self) -> Option<&'static str> {
        match self {
            RoleGate::NotAdmin { redirect } => Some(redirect),
            _ => None,
        }
    }
}
