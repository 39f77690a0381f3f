use crate::JawboneError;
use crate::http_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::oauth::{Credentials, DEFAULT_TOKEN_TYPE};
use secrecy::SecretString;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub client_id: String,
    pub client_secret: SecretString,
    pub base_url: String,
    pub authorization_code: Option<String>,
    pub access_token: Option<SecretString>,
    pub token_type: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, JawboneError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, JawboneError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let client_id = get("JAWBONE_CLIENT_ID")
            .ok_or_else(|| JawboneError::Config("JAWBONE_CLIENT_ID missing".into()))?;
        let client_secret = get("JAWBONE_CLIENT_SECRET")
            .ok_or_else(|| JawboneError::Config("JAWBONE_CLIENT_SECRET missing".into()))?;
        let base_url = get("JAWBONE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let token_type = get("JAWBONE_TOKEN_TYPE").unwrap_or_else(|| DEFAULT_TOKEN_TYPE.into());
        let timeout = match get("JAWBONE_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(JawboneError::Config(
                        "JAWBONE_TIMEOUT_SECS must be at least 1".into(),
                    ));
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    return Err(JawboneError::Config(format!(
                        "JAWBONE_TIMEOUT_SECS is not a number: {raw}"
                    )));
                }
            },
            None => DEFAULT_TIMEOUT,
        };
        Ok(Self {
            client_id,
            client_secret: SecretString::new(client_secret.into()),
            base_url,
            authorization_code: get("JAWBONE_AUTH_CODE").filter(|s| !s.is_empty()),
            access_token: get("JAWBONE_ACCESS_TOKEN")
                .filter(|s| !s.is_empty())
                .map(|t| SecretString::new(t.into())),
            token_type,
            timeout,
        })
    }

    pub fn credentials(&self) -> Credentials {
        let mut credentials = Credentials::new(self.client_id.clone(), self.client_secret.clone());
        credentials.authorization_code.clone_from(&self.authorization_code);
        if let Some(token) = &self.access_token {
            credentials = credentials.with_token(token.clone(), self.token_type.clone());
        }
        credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl FnMut(&str) -> Option<String> + 'a {
        move |k: &str| {
            pairs
                .iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn from_env_missing_client_id() {
        let res = Config::from_env_with(env(&[("JAWBONE_CLIENT_SECRET", "s")]));
        assert!(matches!(res, Err(JawboneError::Config(_))));
    }

    #[test]
    fn from_env_defaults() {
        let cfg = Config::from_env_with(env(&[
            ("JAWBONE_CLIENT_ID", "cid"),
            ("JAWBONE_CLIENT_SECRET", "s"),
        ]))
        .expect("cfg");
        assert_eq!(cfg.base_url, "https://jawbone.com");
        assert_eq!(cfg.token_type, "Bearer");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.authorization_code.is_none());
        assert!(!cfg.credentials().has_token());
    }

    #[test]
    fn from_env_reads_token_and_code() {
        let cfg = Config::from_env_with(env(&[
            ("JAWBONE_CLIENT_ID", "cid"),
            ("JAWBONE_CLIENT_SECRET", "s"),
            ("JAWBONE_BASE_URL", "http://localhost"),
            ("JAWBONE_AUTH_CODE", "code1"),
            ("JAWBONE_ACCESS_TOKEN", "tok"),
            ("JAWBONE_TOKEN_TYPE", "MAC"),
            ("JAWBONE_TIMEOUT_SECS", "5"),
        ]))
        .expect("cfg");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        let creds = cfg.credentials();
        assert_eq!(creds.authorization_code.as_deref(), Some("code1"));
        assert_eq!(creds.authorization_header().as_deref(), Some("MAC tok"));
    }

    #[test]
    fn from_env_rejects_bad_timeout() {
        let res = Config::from_env_with(env(&[
            ("JAWBONE_CLIENT_ID", "cid"),
            ("JAWBONE_CLIENT_SECRET", "s"),
            ("JAWBONE_TIMEOUT_SECS", "soon"),
        ]));
        assert!(res.is_err());
    }

    #[test]
    fn from_env_rejects_zero_timeout() {
        let res = Config::from_env_with(env(&[
            ("JAWBONE_CLIENT_ID", "cid"),
            ("JAWBONE_CLIENT_SECRET", "s"),
            ("JAWBONE_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(res, Err(JawboneError::Config(ref m)) if m.contains("at least 1")));
    }
}
