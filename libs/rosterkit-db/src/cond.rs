use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Select};

use crate::entity_traits::ScopableEntity;
use rosterkit_security::ResolvedScope;

/// Build a deny-all condition (`WHERE false`).
fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// Builds a `SeaORM` `Condition` from a [`ResolvedScope`].
///
/// # Semantics
///
/// - For every non-empty relation in the scope that the entity resolves to
///   a column, adds a `column IN (ids)` conjunct.
/// - Relations the entity does not resolve are skipped (no-op); the
///   collaborator decides which relations are relevant to its query shape.
/// - Conjuncts only ever accumulate: applying the result to a query that
///   already carries its own filters adds constraints without touching them.
///
/// # Policy Rules
///
/// | Scope | Behavior |
/// |-------|----------|
/// | no non-empty relation | `WHERE false` (fail-closed) |
/// | relations resolve to columns | AND of `IN` conjuncts |
/// | no relation resolves on this entity | `WHERE true` (entity is out of band) |
///
/// The empty-scope case should never be reached in practice (the scope
/// gate rejects such requests before any query runs), but the builder
/// fails closed rather than trusting the caller.
pub fn build_scope_condition<E>(scope: &ResolvedScope) -> Condition
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    if !scope.has_any() {
        return deny_all();
    }

    let mut cond = Condition::all();
    for (relation, ids) in scope.non_empty_relations() {
        let Some(col) = E::resolve_relation(relation) else {
            continue;
        };
        let values: Vec<sea_orm::Value> = ids.iter().map(|id| sea_orm::Value::from(*id)).collect();
        cond = cond.add(Expr::col(col).is_in(values));
    }
    cond
}

/// Extension for applying a resolved scope to a select as a pure
/// transformation.
pub trait ScopedSelect<E>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Return a new select with the scope's membership conjuncts added.
    ///
    /// Idempotent up to result set: applying twice appends a duplicate
    /// conjunct but does not change which rows match.
    #[must_use]
    fn scoped(self, scope: &ResolvedScope) -> Self;
}

impl<E> ScopedSelect<E> for Select<E>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    fn scoped(self, scope: &ResolvedScope) -> Self {
        self.filter(build_scope_condition::<E>(scope))
    }
}
