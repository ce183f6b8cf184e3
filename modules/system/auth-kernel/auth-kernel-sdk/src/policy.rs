//! Per-route access declarations.
//!
//! A route declares which roles may call it and, for each role, which scope
//! relation that role resolves over. The binding is an explicit role →
//! relation mapping; there is no positional coupling between an allow-list
//! and a separate relation list to get out of order.

use rosterkit_security::{Role, ScopeRelation};
use serde::{Deserialize, Serialize};

/// One allowed role and the relation its resolved entities key under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    /// The allowed role.
    pub role: Role,
    /// The relation the role's entities scope over.
    pub relation: ScopeRelation,
}

/// A route's role allow-list with relation bindings.
///
/// An empty policy means "any authenticated identity": no role check, no
/// entity resolution, no scope gate. The bypass role never needs a binding;
/// it is authorized before the policy is consulted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccessPolicy {
    bindings: Vec<RoleBinding>,
}

impl AccessPolicy {
    /// Create an empty policy (any authenticated identity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a role, binding it to the relation it scopes over.
    ///
    /// Binding the bypass role is meaningless (it skips scoping entirely)
    /// and is ignored. Re-declaring a role keeps the first binding; both
    /// cases are logged at debug level.
    #[must_use]
    pub fn allow(mut self, role: Role, relation: ScopeRelation) -> Self {
        if role.is_privileged() {
            tracing::debug!(%role, "ignoring binding for bypass role");
            return self;
        }
        if let Some(prior) = self.bindings.iter().find(|b| b.role == role) {
            tracing::debug!(
                %role,
                kept = %prior.relation,
                dropped = %relation,
                "ignoring duplicate binding for role"
            );
            return self;
        }
        self.bindings.push(RoleBinding { role, relation });
        self
    }

    /// The declared bindings, in declaration order.
    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[RoleBinding] {
        &self.bindings
    }

    /// True when the policy admits any authenticated identity.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The bindings whose role the identity holds.
    pub fn matching<'a>(
        &'a self,
        held: &'a [Role],
    ) -> impl Iterator<Item = RoleBinding> + 'a {
        self.bindings
            .iter()
            .copied()
            .filter(move |b| held.contains(&b.role))
    }
}
