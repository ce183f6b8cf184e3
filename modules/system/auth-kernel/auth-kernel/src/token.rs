//! Bearer credential verification.
//!
//! Only the signature, expiry, and (optionally) issuer of a token are
//! checked, and only the subject id is carried forward. Role or ownership
//! data embedded at issuance is deliberately ignored; the identity
//! directory re-fetches live state so that assignments revoked after
//! issuance take effect on the next request.

use auth_kernel_sdk::AuthKernelError;
use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::JwtConfig;

/// Claims parsed from a verified token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)] // validated by the JWT library, never read directly
    exp: u64,
    #[serde(default)]
    iat: Option<u64>,
    #[serde(default)]
    iss: Option<String>,
}

/// The subset of claims exposed after verification.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    /// Numeric subject id parsed from `sub`.
    pub subject_id: i64,
    /// `iat`, kept for audit logging.
    pub issued_at: Option<u64>,
    /// `iss`, kept for audit logging.
    pub issuer: Option<String>,
}

/// Validates token signature and expiry and extracts the subject id.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from JWT settings.
    #[must_use]
    pub fn from_config(cfg: &JwtConfig) -> Self {
        let key = DecodingKey::from_secret(cfg.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = cfg.leeway_secs;
        if let Some(issuer) = &cfg.issuer {
            validation.set_issuer(&[issuer]);
        }
        Self { key, validation }
    }

    /// Verify a raw bearer token.
    ///
    /// # Errors
    ///
    /// - `ExpiredCredential` if `exp` has passed (beyond leeway)
    /// - `InvalidCredential` for anything else: bad signature, malformed
    ///   token, wrong issuer, non-numeric subject
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthKernelError> {
        let data: TokenData<Claims> =
            decode(token, &self.key, &self.validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AuthKernelError::ExpiredCredential
                }
                _ => AuthKernelError::InvalidCredential(e.to_string()),
            })?;

        let subject_id = data.claims.sub.parse::<i64>().map_err(|_| {
            AuthKernelError::InvalidCredential(format!(
                "non-numeric subject claim: {}",
                data.claims.sub
            ))
        })?;

        Ok(VerifiedClaims {
            subject_id,
            issued_at: data.claims.iat,
            issuer: data.claims.iss,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<String>,
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn sign(claims: &TestClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn verifier(secret: &str, leeway_secs: u64) -> TokenVerifier {
        TokenVerifier::from_config(&JwtConfig {
            secret: secret.to_owned().into(),
            issuer: None,
            leeway_secs,
        })
    }

    #[test]
    fn valid_token_yields_subject_id() {
        let token = sign(
            &TestClaims {
                sub: "42".to_owned(),
                exp: now() + 600,
                iss: None,
            },
            "s3cret",
        );
        let claims = verifier("s3cret", 0).verify(&token).unwrap();
        assert_eq!(claims.subject_id, 42);
    }

    #[test]
    fn expired_token_is_distinguished_from_invalid() {
        let token = sign(
            &TestClaims {
                sub: "42".to_owned(),
                exp: now() - 600,
                iss: None,
            },
            "s3cret",
        );
        let err = verifier("s3cret", 0).verify(&token).unwrap_err();
        assert!(matches!(err, AuthKernelError::ExpiredCredential));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = sign(
            &TestClaims {
                sub: "42".to_owned(),
                exp: now() + 600,
                iss: None,
            },
            "other",
        );
        let err = verifier("s3cret", 0).verify(&token).unwrap_err();
        assert!(matches!(err, AuthKernelError::InvalidCredential(_)));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let err = verifier("s3cret", 0).verify("not-a-jwt").unwrap_err();
        assert!(matches!(err, AuthKernelError::InvalidCredential(_)));
    }

    #[test]
    fn non_numeric_subject_is_invalid() {
        let token = sign(
            &TestClaims {
                sub: "alice".to_owned(),
                exp: now() + 600,
                iss: None,
            },
            "s3cret",
        );
        let err = verifier("s3cret", 0).verify(&token).unwrap_err();
        assert!(matches!(err, AuthKernelError::InvalidCredential(_)));
    }

    #[test]
    fn issuer_mismatch_is_invalid() {
        let token = sign(
            &TestClaims {
                sub: "42".to_owned(),
                exp: now() + 600,
                iss: Some("rogue".to_owned()),
            },
            "s3cret",
        );
        let v = TokenVerifier::from_config(&JwtConfig {
            secret: "s3cret".to_owned().into(),
            issuer: Some("backoffice".to_owned()),
            leeway_secs: 0,
        });
        let err = v.verify(&token).unwrap_err();
        assert!(matches!(err, AuthKernelError::InvalidCredential(_)));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let token = sign(
            &TestClaims {
                sub: "42".to_owned(),
                exp: now() - 5,
                iss: None,
            },
            "s3cret",
        );
        assert!(verifier("s3cret", 60).verify(&token).is_ok());
    }
}
