use rosterkit_security::ScopeRelation;
use sea_orm::EntityTrait;

/// Defines the contract for entities whose rows are owned by a franchise
/// and/or a location.
///
/// Each entity implementing this trait must explicitly declare both scope
/// dimensions:
/// - `franchise_col()`: column holding the owning franchise id
/// - `location_col()`: column holding the owning location id
///
/// **Important**: no implicit defaults. Every dimension must be explicitly
/// specified as `Some(Column::...)` or `None`. A dimension declared `None`
/// means queries against this entity do not reference that relation at all,
/// and scoping for it is a no-op: the entity is reached through joins or
/// is scoped by the other dimension.
///
/// # Example
/// ```rust,ignore
/// impl ScopableEntity for student::Entity {
///     fn franchise_col() -> Option<Self::Column> {
///         None
///     }
///     fn location_col() -> Option<Self::Column> {
///         Some(student::Column::LocationId)
///     }
/// }
/// ```
pub trait ScopableEntity: EntityTrait {
    /// Column holding the owning franchise id, if the table has one.
    fn franchise_col() -> Option<Self::Column>;

    /// Column holding the owning location id, if the table has one.
    fn location_col() -> Option<Self::Column>;

    /// Resolve a scope relation to this entity's identifying column.
    ///
    /// The default maps [`ScopeRelation::Franchises`] to `franchise_col()`
    /// and [`ScopeRelation::Locations`] to `location_col()`.
    #[must_use]
    fn resolve_relation(relation: ScopeRelation) -> Option<Self::Column> {
        match relation {
            ScopeRelation::Franchises => Self::franchise_col(),
            ScopeRelation::Locations => Self::location_col(),
        }
    }
}
