//! Per-request authorization context.

use auth_kernel_sdk::Identity;
use rosterkit_db::{ScopableEntity, build_scope_condition};
use rosterkit_security::ResolvedScope;
use sea_orm::{ColumnTrait, Condition, EntityTrait};

/// The bundle handed to downstream collaborators for the lifetime of one
/// inbound request.
///
/// Never persisted or reused across requests. `scope` is `None` only for
/// privileged bypass: an unrestricted request still carries its identity
/// for audit/row-level bookkeeping.
#[derive(Clone, Debug)]
pub struct RequestContext {
    identity: Identity,
    scope: Option<ResolvedScope>,
}

impl RequestContext {
    /// Context for a privileged (bypass) identity: unrestricted, no scope.
    #[must_use]
    pub fn privileged(identity: Identity) -> Self {
        Self {
            identity,
            scope: None,
        }
    }

    /// Context for a scoped identity.
    #[must_use]
    pub fn scoped(identity: Identity, scope: ResolvedScope) -> Self {
        Self {
            identity,
            scope: Some(scope),
        }
    }

    /// The loaded identity.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The resolved scope; `None` for privileged bypass.
    #[inline]
    #[must_use]
    pub fn scope(&self) -> Option<&ResolvedScope> {
        self.scope.as_ref()
    }

    /// Whether this request bypasses entity scoping.
    #[inline]
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.scope.is_none()
    }

    /// Compile the scope into a condition for one entity's query.
    ///
    /// The scoping function downstream data access applies before executing
    /// any query over tenant-owned rows. Pure and reusable: call it for as
    /// many queries as the request needs. Privileged requests compile to an
    /// unrestricted condition; a scoped request with a relation the entity
    /// does not reference leaves that relation unconstrained.
    #[must_use]
    pub fn condition_for<E>(&self) -> Condition
    where
        E: ScopableEntity + EntityTrait,
        E::Column: ColumnTrait + Copy,
    {
        match &self.scope {
            None => Condition::all(),
            Some(scope) => build_scope_condition::<E>(scope),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use rosterkit_security::{Role, ScopeRelation};

    mod location_row {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "location_rows")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i64,
            pub location_id: i64,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}

        impl rosterkit_db::ScopableEntity for Entity {
            fn franchise_col() -> Option<Column> {
                None
            }
            fn location_col() -> Option<Column> {
                Some(Column::LocationId)
            }
        }
    }

    fn identity() -> Identity {
        Identity {
            subject_id: 5,
            display_name: "Nia Okafor".to_owned(),
            email: None,
            roles: vec![Role::Teacher],
            administered_franchises: Vec::new(),
            administered_locations: Vec::new(),
        }
    }

    #[test]
    fn privileged_context_is_unrestricted() {
        let ctx = RequestContext::privileged(identity());
        assert!(ctx.is_privileged());
        assert!(ctx.scope().is_none());

        let cond = ctx.condition_for::<location_row::Entity>();
        let cond_str = format!("{cond:?}");
        assert!(!cond_str.contains("Value(Bool(Some(false)))"));
    }

    #[test]
    fn scoped_context_compiles_its_scope() {
        let mut scope = ResolvedScope::new();
        scope.extend(ScopeRelation::Locations, [7, 9]);
        let ctx = RequestContext::scoped(identity(), scope);

        assert!(!ctx.is_privileged());
        assert!(ctx.scope().is_some_and(ResolvedScope::has_any));

        let cond = ctx.condition_for::<location_row::Entity>();
        let cond_str = format!("{cond:?}");
        assert!(!cond_str.contains("Value(Bool(Some(false)))"));
    }

    #[test]
    fn empty_scope_fails_closed() {
        let ctx = RequestContext::scoped(identity(), ResolvedScope::new());
        let cond = ctx.condition_for::<location_row::Entity>();
        let cond_str = format!("{cond:?}");
        assert!(cond_str.contains("Value(Bool(Some(false)))"));
    }
}
