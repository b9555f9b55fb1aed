use super::pkce::{CodeChallenge, CodeVerifier};
use crate::config::Config;
use crate::models::{StateToken, TokenResponse};
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, warn};
use reqwest::Client;
use url::Url;

pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// Build the URL to send the user-agent to, along with the state it carries.
///
/// Scopes and the redirect URI go out as given; the SSO rejects anything it
/// does not know, so nothing is validated here.
pub fn redirect_to_sso<S: AsRef<str>>(
    cfg: &Config,
    scopes: &[S],
    redirect_uri: &str,
    challenge: &CodeChallenge,
) -> Result<(String, StateToken)> {
    let state = StateToken::generate();
    let scope = scopes
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    let mut url = Url::parse(&cfg.authorize_url())
        .with_context(|| format!("invalid authorize endpoint {}", cfg.authorize_url()))?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &cfg.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &scope)
        .append_pair("state", state.as_str())
        .append_pair("code_challenge", challenge.as_str())
        .append_pair("code_challenge_method", CODE_CHALLENGE_METHOD);

    Ok((url.into(), state))
}

/// Exchange an authorization code plus the verifier behind its challenge for tokens.
/// One POST, no retries; a non-2xx answer becomes an error carrying the body.
pub async fn request_token(
    client: &Client,
    cfg: &Config,
    authorization_code: &str,
    verifier: &CodeVerifier,
) -> Result<TokenResponse> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", authorization_code),
        ("client_id", cfg.client_id.as_str()),
        ("code_verifier", verifier.as_str()),
    ];
    let url = cfg.token_url();
    debug!("requesting token from {}", url);
    let resp = client.post(&url).form(&params).send().await?;
    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        warn!("token exchange rejected with {}", status);
        return Err(anyhow!("token exchange failed: {} => {}", status, txt));
    }
    let tokens: TokenResponse = resp.json().await?;
    Ok(tokens)
}

/// Pull the authorization code out of the redirect the SSO sent back,
/// after checking its `state` against the one we issued.
pub fn parse_callback(redirect_url: &str, expected_state: &StateToken) -> Result<String> {
    let parsed = Url::parse(redirect_url.trim())
        .map_err(|e| anyhow!("invalid callback url: {}", e))?;
    let param = |name: &str| {
        parsed
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    };

    if let Some(err) = param("error") {
        match param("error_description") {
            Some(desc) => bail!("authorization denied: {} ({})", err, desc),
            None => bail!("authorization denied: {}", err),
        }
    }

    let state = param("state").ok_or_else(|| anyhow!("no state in callback url"))?;
    if !expected_state.matches(&state) {
        bail!("state mismatch in callback url");
    }

    param("code").ok_or_else(|| anyhow!("no code in callback url"))
}
