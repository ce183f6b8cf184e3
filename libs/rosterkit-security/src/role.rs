use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a role's accessible entities are resolved.
///
/// Admin-type roles carry their entity references directly on the loaded
/// identity. Operational roles reach their entities through an intermediate
/// operational record (a teacher, student, or parent row).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Entity ids are read off the identity's pre-loaded association.
    Direct,
    /// Entity ids are resolved through the caller's operational record.
    Affiliation,
}

/// A role from the closed back-office vocabulary.
///
/// Role names are unique strings; the set is fixed. Adding a role means
/// adding a variant and a [`Role::resolution`] table entry; there is no
/// string-keyed dispatch anywhere downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The single bypass role: skips all entity scoping.
    SuperAdmin,
    /// Administers one or more franchises.
    FranchiseAdmin,
    /// Administers one or more locations.
    LocationAdmin,
    /// Teaches at one or more locations.
    Teacher,
    /// Enrolled at one or more locations.
    Student,
    /// Linked to one or more students.
    Parent,
}

impl Role {
    /// All roles in the vocabulary, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::FranchiseAdmin,
        Role::LocationAdmin,
        Role::Teacher,
        Role::Student,
        Role::Parent,
    ];

    /// Whether this role bypasses entity scoping entirely.
    #[inline]
    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// The entity-resolution strategy bound to this role.
    ///
    /// `None` for the privileged role, which never resolves a scope.
    #[must_use]
    pub fn resolution(self) -> Option<ResolutionStrategy> {
        match self {
            Role::SuperAdmin => None,
            Role::FranchiseAdmin | Role::LocationAdmin => Some(ResolutionStrategy::Direct),
            Role::Teacher | Role::Student | Role::Parent => Some(ResolutionStrategy::Affiliation),
        }
    }

    /// The canonical role name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::FranchiseAdmin => "FranchiseAdmin",
            Role::LocationAdmin => "LocationAdmin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role name outside the closed vocabulary.
#[derive(Debug, thiserror::Error)]
#[error("unknown role name: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRoleError(s.to_owned()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn only_super_admin_is_privileged() {
        for role in Role::ALL {
            assert_eq!(role.is_privileged(), role == Role::SuperAdmin);
        }
    }

    #[test]
    fn privileged_role_has_no_resolution_strategy() {
        assert!(Role::SuperAdmin.resolution().is_none());
    }

    #[test]
    fn admin_roles_resolve_directly() {
        assert_eq!(
            Role::FranchiseAdmin.resolution(),
            Some(ResolutionStrategy::Direct)
        );
        assert_eq!(
            Role::LocationAdmin.resolution(),
            Some(ResolutionStrategy::Direct)
        );
    }

    #[test]
    fn operational_roles_resolve_through_affiliation() {
        for role in [Role::Teacher, Role::Student, Role::Parent] {
            assert_eq!(role.resolution(), Some(ResolutionStrategy::Affiliation));
        }
    }

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
        }
    }

    #[test]
    fn unknown_role_name_is_rejected() {
        assert!("Janitor".parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Role::FranchiseAdmin).unwrap();
        assert_eq!(json, r#""FranchiseAdmin""#);
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::FranchiseAdmin);
    }
}
