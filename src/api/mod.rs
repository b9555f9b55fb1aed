//! EVE SSO authorization code flow with PKCE.
//!
//! `pkce` makes the verifier/challenge pair, `sso` builds the authorize
//! redirect and performs the code-for-token exchange, `sso_auth` strings them
//! together for interactive use.
pub mod pkce;
pub mod sso;
pub mod sso_auth;

pub use pkce::{generate_code_challenge, CodeChallenge, CodeVerifier};
pub use sso::{parse_callback, redirect_to_sso, request_token};
