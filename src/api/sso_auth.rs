use super::pkce::generate_code_challenge;
use super::sso::{parse_callback, redirect_to_sso, request_token};
use crate::config::Config;
use crate::models::TokenResponse;
use anyhow::{anyhow, Result};
use reqwest::Client;
use std::io::{self, BufRead, BufReader, Write};
use tracing::info;

/// Manual login against the SSO:
/// 1. Generate a PKCE pair and print the authorization URL.
/// 2. User opens it in a browser, signs in and gets redirected to the redirect URI
///    (a dead localhost page is fine).
/// 3. User pastes the full redirect URL back here.
/// 4. The state is checked, the `code` extracted and exchanged for tokens.
/// 5. Token JSON is printed to stdout. Nothing is stored.
pub async fn run_sso_auth(
    cfg: &Config,
    scopes: &[String],
    redirect_uri: &str,
) -> Result<TokenResponse> {
    // BufReader<Stdin> only takes the stdin lock per read, so the future stays Send
    let mut input = BufReader::new(io::stdin());
    let mut out = io::stdout();
    run_sso_auth_with(cfg, scopes, redirect_uri, &mut input, &mut out).await
}

/// Same as [`run_sso_auth`], reading the pasted redirect URL from `input`
/// and writing prompts and the token JSON to `out`.
pub async fn run_sso_auth_with<R: BufRead, W: Write>(
    cfg: &Config,
    scopes: &[String],
    redirect_uri: &str,
    input: &mut R,
    out: &mut W,
) -> Result<TokenResponse> {
    let (verifier, challenge) = generate_code_challenge();
    let (url, state) = redirect_to_sso(cfg, scopes, redirect_uri, &challenge)?;

    writeln!(out, "Open this URL in your browser and log in:\n\n{}\n", url)?;
    writeln!(out, "After logging in you'll be redirected to {}.", redirect_uri)?;
    writeln!(out, "Copy the full redirect URL and paste it here.")?;
    writeln!(out, "Paste redirect URL:")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.trim().is_empty() {
        return Err(anyhow!("no redirect url provided"));
    }
    let code = parse_callback(&line, &state)?;

    let client = Client::new();
    let tokens = request_token(&client, cfg, &code, &verifier).await?;

    if let Some(secs) = tokens.get("expires_in").and_then(|v| v.as_i64()) {
        // epoch seconds
        let expires_at = chrono::Utc::now().timestamp().saturating_add(secs);
        info!("SSO access token obtained, expires_at={}", expires_at);
    } else {
        info!("SSO access token obtained");
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&tokens)?)?;

    Ok(tokens)
}
