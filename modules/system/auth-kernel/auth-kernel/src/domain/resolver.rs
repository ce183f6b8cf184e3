//! Per-role entity resolution.
//!
//! For each role the identity holds that the route's policy allows, resolve
//! the concrete entity ids that role grants, by the strategy bound to the
//! role. Contributions to the same relation union and de-duplicate.

use auth_kernel_sdk::{AccessPolicy, AffiliationResolver, AuthKernelError, Identity};
use rosterkit_security::{ResolutionStrategy, ResolvedScope, ScopeRelation};

/// Resolve the scope the policy's matching roles grant to this identity.
///
/// Indirect lookups run sequentially within the request: the affiliation
/// hop depends on the operational-record lookup completing first.
///
/// # Errors
///
/// `ResolutionFailure` when a downstream lookup fails. A missing
/// operational record is not an error; the role simply contributes nothing.
#[tracing::instrument(skip_all, fields(subject_id = identity.subject_id))]
pub async fn resolve_scope(
    identity: &Identity,
    policy: &AccessPolicy,
    affiliations: &dyn AffiliationResolver,
) -> Result<ResolvedScope, AuthKernelError> {
    let mut scope = ResolvedScope::new();

    for binding in policy.matching(&identity.roles) {
        // The policy never yields a binding for the bypass role.
        let Some(strategy) = binding.role.resolution() else {
            continue;
        };

        match strategy {
            ResolutionStrategy::Direct => {
                let ids = direct_association(identity, binding.relation);
                tracing::debug!(
                    role = %binding.role,
                    relation = %binding.relation,
                    count = ids.len(),
                    "resolved direct ownership"
                );
                scope.extend(binding.relation, ids.iter().copied());
            }
            ResolutionStrategy::Affiliation => {
                let record = affiliations
                    .operational_record(identity, binding.role)
                    .await
                    .map_err(AuthKernelError::from)?;

                let Some(record) = record else {
                    // Account holds the role but has no backing record yet.
                    tracing::debug!(
                        role = %binding.role,
                        "no operational record, empty contribution"
                    );
                    continue;
                };

                let ids = affiliations
                    .affiliated_entities(record)
                    .await
                    .map_err(AuthKernelError::from)?;
                tracing::debug!(
                    role = %binding.role,
                    relation = %binding.relation,
                    count = ids.len(),
                    "resolved affiliation"
                );
                scope.extend(binding.relation, ids);
            }
        }
    }

    Ok(scope)
}

/// The identity's pre-loaded association for a relation.
fn direct_association(identity: &Identity, relation: ScopeRelation) -> &[i64] {
    match relation {
        ScopeRelation::Franchises => &identity.administered_franchises,
        ScopeRelation::Locations => &identity.administered_locations,
    }
}
