//! Subsonic per-request auth parameters and the native token cache.

use std::time::{Duration, Instant};

/// Client name reported in the `c` auth parameter.
pub(crate) const CLIENT_NAME: &str = "seaglass";
/// Subsonic protocol version reported in the `v` auth parameter.
pub(crate) const PROTOCOL_VERSION: &str = "1.16.1";

/// How long a native API token stays usable before a fresh login.
pub(crate) const TOKEN_VALIDITY: Duration = Duration::from_secs(4 * 60);

/// Subsonic token auth: a fresh random salt per request and
/// `t = md5(password + salt)`.
#[derive(Debug)]
pub(crate) struct AuthParams {
    username: String,
    salt: String,
    token: String,
}

impl AuthParams {
    pub(crate) fn generate(username: &str, password: &str) -> Self {
        let salt = format!("{:016x}", rand::random::<u64>());
        let token = format!("{:x}", md5::compute(format!("{password}{salt}")));
        Self {
            username: username.to_string(),
            salt,
            token,
        }
    }

    /// Query pairs for a Subsonic REST request.
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("u", self.username.clone()),
            ("s", self.salt.clone()),
            ("t", self.token.clone()),
            ("c", CLIENT_NAME.to_string()),
            ("v", PROTOCOL_VERSION.to_string()),
            ("f", "json".to_string()),
        ]
    }
}

/// Explicit cache for the native API bearer token.
///
/// A token older than [`TOKEN_VALIDITY`] is treated as expired and a
/// fresh login is performed on the next native call.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    value: Option<String>,
    issued_at: Option<Instant>,
}

impl TokenCache {
    /// The cached token, if still within its validity window.
    pub(crate) fn valid(&self, now: Instant) -> Option<&str> {
        let issued_at = self.issued_at?;
        if now.duration_since(issued_at) < TOKEN_VALIDITY {
            self.value.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn store(&mut self, token: String, now: Instant) {
        self.value = Some(token);
        self.issued_at = Some(now);
    }
}
