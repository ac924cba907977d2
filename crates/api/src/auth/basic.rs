//! HTTP Basic credentials (RFC 7617): configuration and header parsing.

use axum::http::HeaderValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Realm named in the `WWW-Authenticate` challenge when `AUTH_REALM` is unset.
pub const DEFAULT_REALM: &str = "warehouse";

/// The single identity accepted by the authentication gate.
///
/// Custom `Debug` redacts the hash so configuration can be logged safely.
#[derive(Clone)]
pub struct BasicAuthConfig {
    /// Realm named in the `WWW-Authenticate` challenge.
    pub realm: String,
    pub username: String,
    /// Argon2id PHC string for the identity's password.
    pub password_hash: String,
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("realm", &self.realm)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl BasicAuthConfig {
    /// Load the identity from environment variables.
    ///
    /// | Env Var              | Required | Default     |
    /// |----------------------|----------|-------------|
    /// | `AUTH_REALM`         | no       | `warehouse` |
    /// | `AUTH_USERNAME`      | **yes**  | --          |
    /// | `AUTH_PASSWORD_HASH` | **yes**  | --          |
    ///
    /// `AUTH_PASSWORD_HASH` is an Argon2id PHC string as printed by the
    /// `hash-password` binary.
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_USERNAME` or `AUTH_PASSWORD_HASH` is unset or empty.
    pub fn from_env() -> Self {
        let realm = std::env::var("AUTH_REALM").unwrap_or_else(|_| DEFAULT_REALM.into());

        let username =
            std::env::var("AUTH_USERNAME").expect("AUTH_USERNAME must be set in the environment");
        assert!(!username.is_empty(), "AUTH_USERNAME must not be empty");

        let password_hash = std::env::var("AUTH_PASSWORD_HASH")
            .expect("AUTH_PASSWORD_HASH must be set in the environment");
        assert!(!password_hash.is_empty(), "AUTH_PASSWORD_HASH must not be empty");

        Self {
            realm,
            username,
            password_hash,
        }
    }

    /// The `WWW-Authenticate` value sent with every 401.
    pub fn challenge(&self) -> String {
        format!("Basic realm=\"{}\", charset=\"UTF-8\"", self.realm)
    }
}

/// A decoded `username:password` pair.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Why an `Authorization` header could not be turned into credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BasicAuthError {
    #[error("missing authorization header")]
    Missing,
    #[error("authorization header must use the Basic scheme")]
    WrongScheme,
    #[error("credentials are not valid base64")]
    InvalidBase64,
    #[error("credentials are not valid UTF-8")]
    InvalidUtf8,
    #[error("credentials must have the form username:password")]
    MissingSeparator,
}

/// Parse an `Authorization: Basic <base64(username:password)>` header.
///
/// The scheme name is case-insensitive. The username ends at the first `:`;
/// the password may contain further colons.
pub fn parse_authorization(
    header: Option<&HeaderValue>,
) -> Result<BasicCredentials, BasicAuthError> {
    let value = header.ok_or(BasicAuthError::Missing)?;
    let value = value.to_str().map_err(|_| BasicAuthError::WrongScheme)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(BasicAuthError::WrongScheme)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(BasicAuthError::WrongScheme);
    }

    let decoded = STANDARD
        .decode(token.trim())
        .map_err(|_| BasicAuthError::InvalidBase64)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidUtf8)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(BasicAuthError::MissingSeparator)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Build an `Authorization` header value. Used by clients and tests.
pub fn encode_authorization(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
