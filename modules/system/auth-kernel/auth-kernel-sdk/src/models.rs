//! Identity models for the auth kernel.

use rosterkit_security::{EntityId, Role};
use serde::{Deserialize, Serialize};

/// The live identity loaded for an authenticated subject.
///
/// Loaded fresh on every request by the [`IdentityDirectory`]; role and
/// ownership claims embedded in the credential at issuance are never reused,
/// so a teacher moved between locations mid-session is re-scoped on the very
/// next request.
///
/// [`IdentityDirectory`]: crate::IdentityDirectory
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric subject id (primary key of the user record).
    pub subject_id: i64,
    /// Display name for audit logging.
    pub display_name: String,
    /// Contact email, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Roles currently assigned to the subject.
    pub roles: Vec<Role>,
    /// Franchises the subject administers (direct ownership).
    #[serde(default)]
    pub administered_franchises: Vec<EntityId>,
    /// Locations the subject administers (direct ownership).
    #[serde(default)]
    pub administered_locations: Vec<EntityId>,
}

impl Identity {
    /// Whether the subject holds the bypass role.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.roles.iter().any(|r| r.is_privileged())
    }
}

/// An operational record tied to an identity for one role: the teacher,
/// student, or parent row behind the account.
///
/// A newly created account may hold a role without a record yet; affiliation
/// resolution then contributes an empty set, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalRecord {
    /// Primary key of the operational row.
    pub id: EntityId,
    /// The role this record backs.
    pub role: Role,
}
