//! Axum extractors and middleware for the auth kernel.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use auth_kernel_sdk::{AccessPolicy, AuthKernelError};
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{HeaderMap, Method, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::context::RequestContext;
use crate::domain::service::AuthKernel;

/// RFC-9457 problem details body for kernel rejections.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    problem_type: String,
    title: String,
    status: u16,
    detail: String,
    #[serde(skip)]
    status_code: StatusCode,
}

impl Problem {
    #[must_use]
    pub fn new(status: StatusCode, title: &str, detail: &str) -> Self {
        Self {
            problem_type: "about:blank".to_owned(),
            title: title.to_owned(),
            status: status.as_u16(),
            detail: detail.to_owned(),
            status_code: status,
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status_code;
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Extractor for [`RequestContext`]; validates that the kernel layer ran.
#[derive(Debug, Clone)]
pub struct Authz(pub RequestContext);

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Authz)
            .ok_or_else(|| {
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "RequestContext not found - auth kernel layer not configured",
                )
            })
    }
}

/// Shared state for the kernel middleware.
struct KernelState {
    kernel: Arc<AuthKernel>,
    policy: AccessPolicy,
}

/// Layer that runs the authorization pipeline for every request of a route
/// group and inserts the resulting [`RequestContext`].
///
/// Attach with `route_layer` so each group carries its own policy:
///
/// ```ignore
/// router.route_layer(AuthKernelLayer::new(kernel, policy));
/// ```
#[derive(Clone)]
pub struct AuthKernelLayer {
    state: Arc<KernelState>,
}

impl AuthKernelLayer {
    #[must_use]
    pub fn new(kernel: Arc<AuthKernel>, policy: AccessPolicy) -> Self {
        Self {
            state: Arc::new(KernelState { kernel, policy }),
        }
    }
}

impl<S> Layer<S> for AuthKernelLayer {
    type Service = AuthKernelService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthKernelService {
            inner,
            state: self.state.clone(),
        }
    }
}

/// Service that applies the authorization pipeline to requests.
#[derive(Clone)]
pub struct AuthKernelService<S> {
    inner: S,
    state: Arc<KernelState>,
}

impl<S> Service<Request<Body>> for AuthKernelService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let state = self.state.clone();
        let not_ready_inner = self.inner.clone();
        let mut ready_inner = std::mem::replace(&mut self.inner, not_ready_inner);

        Box::pin(async move {
            // CORS preflight never carries credentials.
            if is_preflight_request(request.method(), request.headers()) {
                return ready_inner.call(request).await;
            }

            let token = extract_bearer_token(request.headers()).map(str::to_owned);

            match state
                .kernel
                .authorize(token.as_deref(), &state.policy)
                .await
            {
                Ok(ctx) => {
                    request.extensions_mut().insert(ctx);
                    ready_inner.call(request).await
                }
                Err(err) => Ok(error_to_response(&err)),
            }
        })
    }
}

/// Convert a pipeline failure to an RFC-9457 problem response.
///
/// The kernel owns the error taxonomy; this transport layer owns the HTTP
/// mapping. Identity problems stay distinguishable from authorization
/// problems in logs even though both bodies are deliberately terse.
fn error_to_response(err: &AuthKernelError) -> Response {
    log_rejection(err);
    let (status, title, detail) = match err {
        AuthKernelError::MissingCredential
        | AuthKernelError::InvalidCredential(_)
        | AuthKernelError::ExpiredCredential
        | AuthKernelError::IdentityNotFound(_) => (
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Authentication failed",
        ),
        AuthKernelError::InsufficientRole | AuthKernelError::NoAccessibleEntities => {
            (StatusCode::FORBIDDEN, "Forbidden", "Access denied")
        }
        AuthKernelError::ResolutionFailure(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Internal authorization error",
        ),
    };
    Problem::new(status, title, detail).into_response()
}

/// Log rejections at appropriate levels.
///
/// Cognitive complexity is inflated by tracing macro expansion.
#[allow(clippy::cognitive_complexity)]
fn log_rejection(err: &AuthKernelError) {
    match err {
        AuthKernelError::MissingCredential
        | AuthKernelError::InvalidCredential(_)
        | AuthKernelError::ExpiredCredential => tracing::debug!("credential rejected: {err}"),
        AuthKernelError::IdentityNotFound(subject_id) => {
            tracing::debug!(subject_id, "subject no longer exists");
        }
        AuthKernelError::InsufficientRole | AuthKernelError::NoAccessibleEntities => {
            tracing::debug!("request forbidden: {err}");
        }
        AuthKernelError::ResolutionFailure(msg) => {
            tracing::error!("entity resolution failed: {msg}");
        }
    }
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
}

/// Check if this is a CORS preflight request
///
/// Preflight requests are OPTIONS requests with:
/// - Origin header present
/// - Access-Control-Request-Method header present
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(axum::http::header::ORIGIN)
        && headers.contains_key(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD)
}
