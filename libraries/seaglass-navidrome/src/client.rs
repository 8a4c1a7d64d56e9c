//! Main Navidrome client.
//!
//! Navidrome exposes two API surfaces and this client speaks both: the
//! Subsonic-compatible REST API under `/rest/` (per-request salted
//! token auth) and the native API under `/api/` (bearer token from
//! `/auth/login`, cached in an explicit [`TokenCache`]).

use crate::auth::{AuthParams, TokenCache};
use crate::error::{NavidromeError, Result};
use crate::types::{LoginRequest, LoginResponse, ServerConfig, SubsonicSong};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub(crate) const SUBSONIC_TIMEOUT: Duration = Duration::from_secs(20);
pub(crate) const NATIVE_TIMEOUT: Duration = Duration::from_secs(20);
const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);
const SCROBBLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a single Navidrome server.
///
/// # Example
///
/// ```ignore
/// use seaglass_navidrome::{NavidromeClient, ServerConfig};
///
/// let config = ServerConfig::new("https://music.example.com", "alice", "secret");
/// let client = NavidromeClient::new(config)?;
/// let page = client.search_songs("yesterday beatles", 1, 50).await?;
/// println!("{} candidates", page.data.len());
/// ```
pub struct NavidromeClient {
    pub(crate) http: Client,
    pub(crate) config: ServerConfig,
    token: RwLock<TokenCache>,
}

impl NavidromeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let url = normalize_url(&config.url)?;
        let config = ServerConfig { url, ..config };

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Seaglass/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NavidromeError::Request)?;

        Ok(Self {
            http,
            config,
            token: RwLock::new(TokenCache::default()),
        })
    }

    /// The normalized server base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Perform a Subsonic REST call and unwrap the response envelope.
    ///
    /// The envelope's `failed` status is mapped to typed errors: code
    /// 40 is an auth failure, code 70 on `getSong` a stale id.
    pub(crate) async fn subsonic_get<T: DeserializeOwned>(
        &self,
        op: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/rest/{}", self.config.url, op);
        let auth = AuthParams::generate(&self.config.username, &self.config.password);
        debug!(url = %url, op = %op, "Subsonic request");

        let response = self
            .http
            .get(&url)
            .query(&auth.pairs())
            .query(params)
            .timeout(SUBSONIC_TIMEOUT)
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NavidromeError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            NavidromeError::ParseError(format!("invalid Subsonic response body: {e}"))
        })?;
        let envelope = body.get("subsonic-response").ok_or_else(|| {
            NavidromeError::ParseError("missing subsonic-response envelope".to_string())
        })?;

        if envelope.get("status").and_then(|s| s.as_str()) == Some("failed") {
            let code = envelope
                .pointer("/error/code")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or(0);
            let message = envelope
                .pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(match code {
                40 => NavidromeError::AuthFailed("wrong username or password".to_string()),
                70 if op == "getSong" => NavidromeError::InvalidId(message),
                _ => NavidromeError::Api { code, message },
            });
        }

        serde_json::from_value(envelope.clone())
            .map_err(|e| NavidromeError::ParseError(format!("unexpected {op} payload: {e}")))
    }

    /// Perform a native API call, returning the payload and the total
    /// row count from the `x-total-count` header (0 when absent).
    pub(crate) async fn native_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<(T, u64)> {
        let token = self.native_token().await?;
        let url = format!("{}/api/{}", self.config.url, path);
        debug!(url = %url, "Native API request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .header("x-nd-authorization", format!("Bearer {token}"))
            .timeout(NATIVE_TIMEOUT)
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NavidromeError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let total = response
            .headers()
            .get("x-total-count")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let payload = response
            .json()
            .await
            .map_err(|e| NavidromeError::ParseError(format!("invalid {path} response: {e}")))?;

        Ok((payload, total))
    }

    /// Get a native API token, logging in when the cached one expired.
    pub(crate) async fn native_token(&self) -> Result<String> {
        let now = Instant::now();
        if let Some(token) = self.token.read().await.valid(now) {
            return Ok(token.to_string());
        }

        let mut cache = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = cache.valid(now) {
            return Ok(token.to_string());
        }

        let url = format!("{}/auth/login", self.config.url);
        debug!(url = %url, username = %self.config.username, "Native API login");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                username: self.config.username.clone(),
                password: self.config.password.clone(),
            })
            .timeout(LOGIN_TIMEOUT)
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NavidromeError::AuthFailed(format!(
                "native login rejected with HTTP {status}"
            )));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| NavidromeError::ParseError(format!("invalid login response: {e}")))?;

        let token = login.token.ok_or_else(|| {
            NavidromeError::AuthFailed("login response carried no token".to_string())
        })?;
        cache.store(token.clone(), now);
        Ok(token)
    }

    /// Ping the native session keepalive endpoint.
    pub async fn keepalive(&self) -> Result<()> {
        let token = self.native_token().await?;
        let url = format!("{}/api/keepalive/keepalive", self.config.url);

        let response = self
            .http
            .get(&url)
            .header("x-nd-authorization", format!("Bearer {token}"))
            .timeout(LOGIN_TIMEOUT)
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NavidromeError::ServerError {
                status: status.as_u16(),
                message: "keepalive rejected".to_string(),
            })
        }
    }

    /// Spawn a background task that keeps the native session alive.
    ///
    /// Failures are logged and retried on the next tick; abort the
    /// returned handle to stop the maintenance task.
    pub fn spawn_keepalive(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // immediate first tick is a no-op
            loop {
                ticker.tick().await;
                if let Err(e) = client.keepalive().await {
                    warn!(error = %e, "Keepalive failed");
                }
            }
        })
    }

    /// Fetch one song by id via the Subsonic API.
    ///
    /// A stale or fabricated id surfaces as [`NavidromeError::InvalidId`].
    pub async fn get_song(&self, id: &str) -> Result<SubsonicSong> {
        #[derive(serde::Deserialize)]
        struct Payload {
            song: Option<SubsonicSong>,
        }

        let payload: Payload = self
            .subsonic_get("getSong", &[("id", id.to_string())])
            .await?;
        payload
            .song
            .ok_or_else(|| NavidromeError::InvalidId(id.to_string()))
    }

    /// Report playback to the server. Errors are swallowed: scrobbling
    /// must never disturb playback or imports.
    pub async fn scrobble(&self, id: &str, submission: bool) -> bool {
        let url = format!("{}/rest/scrobble", self.config.url);
        let auth = AuthParams::generate(&self.config.username, &self.config.password);

        let result = self
            .http
            .get(&url)
            .query(&auth.pairs())
            .query(&[
                ("id", id.to_string()),
                ("submission", submission.to_string()),
            ])
            .timeout(SCROBBLE_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(status = %response.status(), "Scrobble rejected");
                false
            }
            Err(e) => {
                debug!(error = %e, "Scrobble failed");
                false
            }
        }
    }

    /// Build a cover-art URL with embedded auth parameters.
    pub fn cover_art_url(&self, cover_id: &str) -> Option<String> {
        if cover_id.is_empty() {
            return None;
        }
        self.rest_url_with_auth("getCoverArt", cover_id).ok()
    }

    /// Build a stream URL for a track with embedded auth parameters.
    pub fn stream_url(&self, track_id: &str) -> Result<String> {
        self.rest_url_with_auth("stream", track_id)
    }

    fn rest_url_with_auth(&self, op: &str, id: &str) -> Result<String> {
        let mut url = url::Url::parse(&format!("{}/rest/{}", self.config.url, op))
            .map_err(|e| NavidromeError::InvalidUrl(e.to_string()))?;
        let auth = AuthParams::generate(&self.config.username, &self.config.password);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in auth.pairs() {
                query.append_pair(key, &value);
            }
            query.append_pair("id", id);
        }
        Ok(url.to_string())
    }
}

/// Default the scheme to http and strip trailing slashes.
fn normalize_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(NavidromeError::InvalidUrl("URL cannot be empty".to_string()));
    }
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    Ok(with_scheme.trim_end_matches('/').to_string())
}

fn connection_error(e: reqwest::Error) -> NavidromeError {
    if e.is_connect() || e.is_timeout() {
        NavidromeError::ServerUnreachable(e.to_string())
    } else {
        NavidromeError::Request(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_normalization() {
        assert_eq!(normalize_url("https://example.com/").unwrap(), "https://example.com");
        assert_eq!(normalize_url("example.com///").unwrap(), "http://example.com");
        assert_eq!(normalize_url("http://localhost:4533").unwrap(), "http://localhost:4533");
        assert!(normalize_url("  ").is_err());
    }

    #[test]
    fn test_cover_art_url_carries_auth_and_id() {
        let client = NavidromeClient::new(ServerConfig::new(
            "https://example.com",
            "alice",
            "secret",
        ))
        .expect("valid config");

        let url = client.cover_art_url("al-42").expect("some url");
        assert!(url.starts_with("https://example.com/rest/getCoverArt?"));
        assert!(url.contains("u=alice"));
        assert!(url.contains("id=al-42"));
        assert!(url.contains("f=json"));

        assert!(client.cover_art_url("").is_none());
    }
}
