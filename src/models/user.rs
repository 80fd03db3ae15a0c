//! Assistant (user) model and role classification.
//!
//! The scheduler only cares about a user's `id` and `role`: senior
//! assistants and leads may be designated as the principal of a cell,
//! everyone else can only fill helper slots.

use serde::{Deserialize, Serialize};

/// Workforce role of an assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular assistant; helper slots only.
    Helper,
    /// Senior assistant; may act as a cell's principal.
    Senior,
    /// Team lead; may act as a cell's principal.
    Lead,
}

impl Role {
    /// Whether this role may be designated as a cell's principal.
    #[inline]
    pub fn is_principal_eligible(self) -> bool {
        matches!(self, Role::Senior | Role::Lead)
    }
}

/// A student assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Workforce role.
    pub role: Role,
    /// Whether the account is active. Carried for the surrounding service;
    /// the scheduler does not filter on it.
    pub active: bool,
}

impl User {
    /// Creates a new active user.
    pub fn new(id: i64, role: Role) -> Self {
        Self {
            id,
            name: String::new(),
            role,
            active: true,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether this user may be designated as a cell's principal.
    #[inline]
    pub fn is_principal_eligible(&self) -> bool {
        self.role.is_principal_eligible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_eligibility() {
        assert!(!Role::Helper.is_principal_eligible());
        assert!(Role::Senior.is_principal_eligible());
        assert!(Role::Lead.is_principal_eligible());

        let u = User::new(1, Role::Senior).with_name("Ada");
        assert!(u.is_principal_eligible());
        assert!(!User::new(2, Role::Helper).is_principal_eligible());
    }

    #[test]
    fn test_user_builder() {
        let u = User::new(7, Role::Lead).with_name("Kim").with_active(false);
        assert_eq!(u.id, 7);
        assert_eq!(u.name, "Kim");
        assert_eq!(u.role, Role::Lead);
        assert!(!u.active);
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Senior).unwrap();
        assert_eq!(json, "\"senior\"");
        let role: Role = serde_json::from_str("\"lead\"").unwrap();
        assert_eq!(role, Role::Lead);
    }
}
