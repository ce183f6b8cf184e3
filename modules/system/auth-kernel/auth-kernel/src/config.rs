use secrecy::SecretString;
use serde::Deserialize;

/// Configuration for the `auth_kernel` module.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthKernelConfig {
    #[serde(default)]
    pub jwt: JwtConfig,
}

/// Bearer token verification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JwtConfig {
    /// HS256 signing secret. Must be set in deployment config; the empty
    /// default exists only so tests can build configs piecemeal.
    #[serde(default = "default_secret")]
    pub secret: SecretString,
    /// Expected `iss` claim. Unset disables issuer checking.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Clock-skew leeway applied to expiry checking, in seconds.
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            issuer: None,
            leeway_secs: default_leeway_secs(),
        }
    }
}

fn default_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_leeway_secs() -> u64 {
    30
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_missing() {
        let cfg: AuthKernelConfig = serde_json::from_str(r#"{"jwt":{"secret":"s3cret"}}"#).unwrap();
        assert_eq!(cfg.jwt.leeway_secs, 30);
        assert!(cfg.jwt.issuer.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<AuthKernelConfig, _> =
            serde_json::from_str(r#"{"jwt":{"secret":"x","algo":"none"}}"#);
        assert!(result.is_err());
    }
}
