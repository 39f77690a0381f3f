//! OAuth2 credential state, scopes and the authorization URL.
//!
//! The token exchange itself needs HTTP and lives on
//! [`ReqwestJawboneClient`](crate::http_client::ReqwestJawboneClient).

use crate::JawboneError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const AUTH_PATH: &str = "/auth/oauth2/auth";
pub const TOKEN_PATH: &str = "/auth/oauth2/token";
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

const READ_PERMISSIONS: &[&str] = &[
    "basic_read",
    "extended_read",
    "location_read",
    "friends_read",
    "mood_read",
    "move_read",
    "sleep_read",
    "meal_read",
    "weight_read",
    "cardiac_read",
    "generic_event_read",
];

const WRITE_PERMISSIONS: &[&str] = &[
    "mood_write",
    "move_write",
    "meal_write",
    "weight_write",
    "cardiac_write",
    "generic_event_write",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    Read,
    /// Every read permission plus the write permissions.
    Write,
}

impl Scope {
    pub fn permissions(self) -> Vec<&'static str> {
        match self {
            Scope::Read => READ_PERMISSIONS.to_vec(),
            Scope::Write => READ_PERMISSIONS
                .iter()
                .chain(WRITE_PERMISSIONS)
                .copied()
                .collect(),
        }
    }

    /// Space-joined permission list, as sent in the `scope` query parameter.
    pub fn as_param(self) -> String {
        self.permissions().join(" ")
    }
}

impl FromStr for Scope {
    type Err = std::convert::Infallible;

    /// `"read"` is the read scope; anything else asks for write access.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "read" { Scope::Read } else { Scope::Write })
    }
}

#[derive(Clone, Debug)]
pub struct Credentials {
    /// Single-use code handed to the redirect URI.
    pub authorization_code: Option<String>,
    pub access_token: Option<SecretString>,
    pub token_type: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Self {
        Self {
            authorization_code: None,
            access_token: None,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            client_id: client_id.into(),
            client_secret,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.authorization_code = Some(code.into());
        self
    }

    pub fn with_token(mut self, token: SecretString, token_type: impl Into<String>) -> Self {
        self.access_token = Some(token);
        self.token_type = token_type.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Value of the `Authorization` header, once a token is held.
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token
            .as_ref()
            .map(|token| format!("{} {}", self.token_type, token.expose_secret()))
    }

    pub(crate) fn store_token(&mut self, response: &TokenResponse) {
        self.access_token = Some(SecretString::new(response.access_token.clone().into()));
        self.token_type.clone_from(&response.token_type);
    }
}

/// Body of a successful token exchange. Fields the client does not use are
/// kept in `extra` so callers see the whole response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Build the URL the user is sent to in order to grant access.
///
/// Fails while an authorization code is held: that code should be exchanged,
/// not requested again.
pub fn authorization_url(
    base_url: &str,
    credentials: &Credentials,
    redirect_uri: &str,
    scope: Scope,
) -> Result<String, JawboneError> {
    if credentials.authorization_code.is_some() {
        return Err(JawboneError::Authorization(
            "authorization code already held; exchange it for a token instead".into(),
        ));
    }

    let mut url = url::Url::parse(&format!("{base_url}{AUTH_PATH}"))
        .map_err(|e| JawboneError::Config(format!("invalid base url {base_url}: {e}")))?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &credentials.client_id)
        .append_pair("scope", &scope.as_param())
        .append_pair("redirect_uri", redirect_uri);
    Ok(url.to_string())
}
