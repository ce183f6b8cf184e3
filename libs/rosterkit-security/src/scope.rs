use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a tenant-owned entity (franchise or location row id).
pub type EntityId = i64;

/// A logical relation a scope keys its entity ids under.
///
/// Downstream queries map each relation to their own identifying column
/// (see the `ScopableEntity` trait in `rosterkit-db`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeRelation {
    /// Franchise-identifying ids.
    Franchises,
    /// Location-identifying ids.
    Locations,
}

impl fmt::Display for ScopeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Franchises => f.write_str("franchises"),
            Self::Locations => f.write_str("locations"),
        }
    }
}

/// The set of entity ids a request is permitted to touch, keyed by relation.
///
/// Built fresh per request by the entity resolver and consumed only within
/// that request's lifetime. Contributions from multiple roles union per
/// relation and are de-duplicated by entity id.
///
/// # Examples
///
/// ```
/// use rosterkit_security::{ResolvedScope, ScopeRelation};
///
/// let mut scope = ResolvedScope::new();
/// assert!(!scope.has_any());
///
/// scope.extend(ScopeRelation::Locations, [7, 9, 7]);
/// assert!(scope.has_any());
/// assert_eq!(scope.ids_for(ScopeRelation::Locations).len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedScope {
    relations: BTreeMap<ScopeRelation, BTreeSet<EntityId>>,
}

impl ResolvedScope {
    /// Create an empty scope (no accessible entities).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add entity ids under a relation, unioning with prior contributions.
    pub fn extend(&mut self, relation: ScopeRelation, ids: impl IntoIterator<Item = EntityId>) {
        self.relations.entry(relation).or_default().extend(ids);
    }

    /// The ids resolved for a relation. Empty if the relation never matched
    /// a held role.
    #[must_use]
    pub fn ids_for(&self, relation: ScopeRelation) -> BTreeSet<EntityId> {
        self.relations.get(&relation).cloned().unwrap_or_default()
    }

    /// Whether the given entity id is in scope under the given relation.
    #[must_use]
    pub fn contains(&self, relation: ScopeRelation, id: EntityId) -> bool {
        self.relations
            .get(&relation)
            .is_some_and(|ids| ids.contains(&id))
    }

    /// True iff at least one relation has a non-empty id set.
    ///
    /// This is the scope-gate predicate: holding a role name is necessary
    /// but not sufficient; the caller must also be affiliated with at least
    /// one concrete entity.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.relations.values().any(|ids| !ids.is_empty())
    }

    /// Iterate over relations with non-empty id sets.
    pub fn non_empty_relations(
        &self,
    ) -> impl Iterator<Item = (ScopeRelation, &BTreeSet<EntityId>)> {
        self.relations
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(rel, ids)| (*rel, ids))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_scope_has_no_access() {
        let scope = ResolvedScope::new();
        assert!(!scope.has_any());
        assert!(scope.ids_for(ScopeRelation::Locations).is_empty());
        assert_eq!(scope.non_empty_relations().count(), 0);
    }

    #[test]
    fn extend_unions_and_dedupes() {
        let mut scope = ResolvedScope::new();
        scope.extend(ScopeRelation::Locations, [7, 9]);
        scope.extend(ScopeRelation::Locations, [9, 11]);

        assert_eq!(
            scope.ids_for(ScopeRelation::Locations),
            BTreeSet::from([7, 9, 11])
        );
    }

    #[test]
    fn relations_are_independent() {
        let mut scope = ResolvedScope::new();
        scope.extend(ScopeRelation::Franchises, [1]);

        assert!(scope.contains(ScopeRelation::Franchises, 1));
        assert!(!scope.contains(ScopeRelation::Locations, 1));
        assert!(scope.ids_for(ScopeRelation::Locations).is_empty());
    }

    #[test]
    fn relation_with_empty_contribution_does_not_pass_gate() {
        let mut scope = ResolvedScope::new();
        scope.extend(ScopeRelation::Locations, []);
        assert!(!scope.has_any());
    }

    #[test]
    fn relation_names_serialize_snake_case() {
        let json = serde_json::to_string(&ScopeRelation::Franchises).unwrap();
        assert_eq!(json, r#""franchises""#);
        assert_eq!(ScopeRelation::Locations.to_string(), "locations");
    }
}
