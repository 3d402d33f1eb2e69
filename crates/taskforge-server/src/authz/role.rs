//! Static role allow-list checking.

use crate::auth::claims::{Payload, Role};

use super::GateError;

const fn bit(role: Role) -> u8 {
    match role {
        Role::Guest => 1,
        Role::User => 1 << 1,
        Role::Admin => 1 << 2,
    }
}

/// Immutable set of roles permitted to reach an operation.
///
/// Admin is always included, whether or not it is listed. Built once per
/// endpoint as a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(u8);

impl RoleSet {
    /// Build the allow-list for an endpoint.
    pub const fn allow(roles: &[Role]) -> Self {
        let mut mask = bit(Role::Admin);
        let mut i = 0;
        while i < roles.len() {
            mask |= bit(roles[i]);
            i += 1;
        }
        Self(mask)
    }

    pub const fn permits(self, role: Role) -> bool {
        self.0 & bit(role) != 0
    }

    /// Role check: pure, no I/O, evaluated before any resource lookup.
    pub fn check(self, payload: &Payload) -> Result<(), GateError> {
        if self.permits(payload.user_role) {
            Ok(())
        } else {
            Err(GateError::Permission)
        }
    }
}
