use rand::{distributions::Alphanumeric, Rng};
use std::fmt;

pub const STATE_TOKEN_LEN: usize = 16;

/// Token payload as returned by the SSO (access_token, refresh_token, expires_in, ...).
/// Kept as an untyped JSON object and handed back to the caller unchanged.
pub type TokenResponse = serde_json::Map<String, serde_json::Value>;

/// Anti-CSRF value sent with the authorization request.
/// Checking it against the callback is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateToken(String);

impl StateToken {
    pub fn generate() -> Self {
        let s = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_TOKEN_LEN)
            .map(char::from)
            .collect();
        Self(s)
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
