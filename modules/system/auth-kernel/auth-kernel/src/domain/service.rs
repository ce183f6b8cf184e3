//! The authorization pipeline.
//!
//! Per-request stages:
//!
//! ```text
//! Unauthenticated → CredentialVerified → IdentityLoaded
//!     → { PrivilegedBypass | RoleChecked → ScopeResolved → GateChecked }
//!     → ContextReady
//! ```
//!
//! Any stage failure is terminal; no partial context is ever exposed
//! downstream. The kernel holds no per-request state and caches nothing, so
//! retrying a rejected request is always safe (and pointless unless the
//! underlying data changed).

use std::sync::Arc;

use auth_kernel_sdk::{
    AccessPolicy, AffiliationResolver, AuthKernelError, IdentityDirectory,
};
use rosterkit_security::ResolvedScope;

use super::resolver;
use crate::config::AuthKernelConfig;
use crate::context::RequestContext;
use crate::token::TokenVerifier;

/// The authorization & entity-scoping kernel.
///
/// One instance serves the whole process; every method is `&self` and
/// request-scoped, safe under arbitrary concurrency.
pub struct AuthKernel {
    verifier: TokenVerifier,
    directory: Arc<dyn IdentityDirectory>,
    affiliations: Arc<dyn AffiliationResolver>,
}

impl AuthKernel {
    /// Build a kernel from config and its two collaborators.
    #[must_use]
    pub fn new(
        config: &AuthKernelConfig,
        directory: Arc<dyn IdentityDirectory>,
        affiliations: Arc<dyn AffiliationResolver>,
    ) -> Self {
        Self {
            verifier: TokenVerifier::from_config(&config.jwt),
            directory,
            affiliations,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// `credential` is the raw bearer token, already stripped of its
    /// `Authorization: Bearer` carrier; `None` means no credential was
    /// presented. Verification happens strictly before any directory
    /// lookup: an expired or forged token never touches identity storage.
    ///
    /// # Errors
    ///
    /// Any [`AuthKernelError`]; see the taxonomy on that type. Every error
    /// is terminal for the request.
    #[tracing::instrument(skip_all, fields(subject_id = tracing::field::Empty))]
    pub async fn authorize(
        &self,
        credential: Option<&str>,
        policy: &AccessPolicy,
    ) -> Result<RequestContext, AuthKernelError> {
        let token = credential.ok_or(AuthKernelError::MissingCredential)?;
        let claims = self.verifier.verify(token)?;
        tracing::Span::current().record("subject_id", claims.subject_id);

        let identity = self
            .directory
            .load_identity(claims.subject_id)
            .await
            .map_err(AuthKernelError::from)?;

        if identity.is_privileged() {
            tracing::debug!("privileged bypass");
            return Ok(RequestContext::privileged(identity));
        }

        if policy.is_open() {
            // Any authenticated identity may pass; the context still fails
            // closed if a collaborator compiles its (empty) scope.
            return Ok(RequestContext::scoped(identity, ResolvedScope::new()));
        }

        if policy.matching(&identity.roles).next().is_none() {
            tracing::debug!(held_roles = identity.roles.len(), "no allow-listed role held");
            return Err(AuthKernelError::InsufficientRole);
        }

        let scope = resolver::resolve_scope(&identity, policy, self.affiliations.as_ref()).await?;

        if !scope.has_any() {
            // Role membership is the coarse capability; entity affiliation
            // is the fine-grained one. Both must hold.
            tracing::debug!("role matched but no concrete entity affiliation");
            return Err(AuthKernelError::NoAccessibleEntities);
        }

        Ok(RequestContext::scoped(identity, scope))
    }
}
