// PKCE helper for the S256 challenge method
use base64::{engine::general_purpose, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of random bytes behind a verifier.
pub const VERIFIER_ENTROPY_BYTES: usize = 32;

/// Secret half of the PKCE pair. URL-safe base64 of 32 random bytes, padding kept.
/// Hold it until the token exchange and drop it afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeVerifier(String);

impl CodeVerifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw entropy bytes the verifier was encoded from.
    pub fn decode(&self) -> anyhow::Result<Vec<u8>> {
        Ok(general_purpose::URL_SAFE.decode(&self.0)?)
    }
}

// keep verifiers out of logs
impl fmt::Debug for CodeVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CodeVerifier(..)")
    }
}

/// Public half of the PKCE pair, sent with the authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChallenge(String);

impl CodeChallenge {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// base64url(SHA-256(verifier text)) without trailing `=`.
    pub fn from_verifier(verifier: &CodeVerifier) -> Self {
        let hash = Sha256::digest(verifier.as_str().as_bytes());
        Self(general_purpose::URL_SAFE_NO_PAD.encode(hash))
    }

    pub fn matches(&self, verifier: &CodeVerifier) -> bool {
        *self == Self::from_verifier(verifier)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a fresh verifier from the OS random source and derive its challenge.
pub fn generate_code_challenge() -> (CodeVerifier, CodeChallenge) {
    let mut bytes = [0u8; VERIFIER_ENTROPY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let verifier = CodeVerifier(general_purpose::URL_SAFE.encode(bytes));
    let challenge = CodeChallenge::from_verifier(&verifier);
    (verifier, challenge)
}
