#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Scoped query building for tenant-owned entities.
//!
//! Data-access code applies a request's [`ResolvedScope`] to every query
//! that returns or mutates tenant-owned rows, by way of
//! [`build_scope_condition`] or the [`ScopedSelect`] extension.
//!
//! [`ResolvedScope`]: rosterkit_security::ResolvedScope

pub mod cond;
pub mod entity_traits;

pub use cond::{ScopedSelect, build_scope_condition};
pub use entity_traits::ScopableEntity;
