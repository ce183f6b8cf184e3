//! Collaborator traits the auth kernel consumes.
//!
//! The kernel treats identity storage and entity relationships as black
//! boxes behind these traits. Implementations live in the data layer; tests
//! supply in-memory fakes.

use async_trait::async_trait;
use rosterkit_security::{EntityId, Role};

use crate::error::DirectoryError;
use crate::models::{Identity, OperationalRecord};

/// Looks up live identity state by subject id.
///
/// Called once per request, strictly after credential verification. The
/// directory is the source of truth for roles and direct entity ownership;
/// nothing from the credential beyond the subject id is trusted.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Load the current identity for a subject.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the subject was deleted since credential issuance
    /// - `Unavailable` / `Internal` if the backing store fails
    async fn load_identity(&self, subject_id: i64) -> Result<Identity, DirectoryError>;
}

/// Resolves entity affiliation for operational roles.
///
/// Operational roles (teacher, student, parent) reach their entities through
/// an intermediate record: first the record tied to the identity, then one
/// hop to the target relation. A parent's hop is two-legged underneath
/// (parent → students → student locations); implementations own that walk
/// and return the effective location ids directly.
#[async_trait]
pub trait AffiliationResolver: Send + Sync {
    /// The operational record backing `role` for this identity, if one
    /// exists yet.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Internal` if the backing store fails
    async fn operational_record(
        &self,
        identity: &Identity,
        role: Role,
    ) -> Result<Option<OperationalRecord>, DirectoryError>;

    /// The entity ids one hop from the operational record.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Internal` if the backing store fails
    async fn affiliated_entities(
        &self,
        record: OperationalRecord,
    ) -> Result<Vec<EntityId>, DirectoryError>;
}
