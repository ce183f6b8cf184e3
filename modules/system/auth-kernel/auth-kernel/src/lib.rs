#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Authorization & entity-scoping kernel.
//!
//! The one security-critical subsystem of the back office: every inbound
//! request passes through here before any tenant-owned row is read or
//! written. The kernel
//!
//! 1. verifies the bearer credential (signature + expiry),
//! 2. loads the live identity for the credential's subject,
//! 3. resolves which franchises/locations the caller may act on, and
//! 4. hands downstream collaborators a [`RequestContext`] whose scope they
//!    must compile into every query.
//!
//! Per-request and stateless: no cross-request shared mutable state, no
//! scope caching. A teacher moved between locations mid-session is re-scoped
//! on the very next request.
//!
//! ## Wiring
//!
//! ```ignore
//! let kernel = Arc::new(AuthKernel::new(&config, directory, affiliations));
//! let policy = AccessPolicy::new()
//!     .allow(Role::FranchiseAdmin, ScopeRelation::Franchises)
//!     .allow(Role::Teacher, ScopeRelation::Locations);
//!
//! let router = Router::new()
//!     .route("/students", get(list_students))
//!     .route_layer(AuthKernelLayer::new(kernel, policy));
//! ```

pub mod config;
pub mod context;
pub mod domain;
pub mod http;
pub mod token;

pub use config::{AuthKernelConfig, JwtConfig};
pub use context::RequestContext;
pub use domain::service::AuthKernel;
pub use http::{AuthKernelLayer, Authz};
pub use token::TokenVerifier;
