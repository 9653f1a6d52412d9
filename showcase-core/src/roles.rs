//! Static role → permission table
//!
//! Two roles. `USER` holds nothing; `ADMIN` holds the four management
//! permissions used by the admin routes. The table is a constant and never
//! changes at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// Named permission checked by an admin route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    GetFeatures,
    ManageFeatures,
    GetContactForms,
    ManageContactForms,
}

const USER_RIGHTS: &[Permission] = &[];

const ADMIN_RIGHTS: &[Permission] = &[
    Permission::GetFeatures,
    Permission::ManageFeatures,
    Permission::GetContactForms,
    Permission::ManageContactForms,
];

/// Every role, in declaration order
pub const ROLES: &[Role] = &[Role::User, Role::Admin];

/// Permissions granted to `role`.
pub fn role_rights(role: Role) -> &'static [Permission] {
    match role {
        Role::User => USER_RIGHTS,
        Role::Admin => ADMIN_RIGHTS,
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Case-insensitive parse of a role name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        role_rights(*self).contains(&permission)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetFeatures => "getFeatures",
            Self::ManageFeatures => "manageFeatures",
            Self::GetContactForms => "getContactForms",
            Self::ManageContactForms => "manageContactForms",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
