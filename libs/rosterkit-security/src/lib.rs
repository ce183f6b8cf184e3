#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod role;
pub mod scope;

pub use role::{ResolutionStrategy, Role, UnknownRoleError};
pub use scope::{EntityId, ResolvedScope, ScopeRelation};
