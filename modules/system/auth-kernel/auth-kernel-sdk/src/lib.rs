#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Auth Kernel SDK
//!
//! This crate provides the public surface of the `auth_kernel` module:
//!
//! - [`IdentityDirectory`] / [`AffiliationResolver`] - collaborator traits
//!   the kernel consumes
//! - [`Identity`] / [`OperationalRecord`] - identity models
//! - [`AccessPolicy`] - per-route role/relation declarations
//! - [`AuthKernelError`] / [`DirectoryError`] - error types
//!
//! ## Usage
//!
//! Route handlers declare which roles may call them and which relation each
//! role scopes over:
//!
//! ```
//! use auth_kernel_sdk::AccessPolicy;
//! use rosterkit_security::{Role, ScopeRelation};
//!
//! let policy = AccessPolicy::new()
//!     .allow(Role::FranchiseAdmin, ScopeRelation::Franchises)
//!     .allow(Role::Teacher, ScopeRelation::Locations);
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod policy;

// Re-export main types at crate root
pub use api::{AffiliationResolver, IdentityDirectory};
pub use error::{AuthKernelError, DirectoryError};
pub use models::{Identity, OperationalRecord};
pub use policy::{AccessPolicy, RoleBinding};
