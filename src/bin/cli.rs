use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;
use tracing_log::LogTracer;
use tracing::subscriber as tracing_subscriber_global;
use anyhow::{Context, Result};
use eve_sso_pkce as lib;
use lib::api::{pkce, sso, sso_auth};
use lib::config::Config;

#[derive(Parser)]
#[command(name = "eve-sso", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in interactively and print the token JSON
    Login {
        /// Scope to request (repeatable); defaults to the configured scopes
        #[arg(long = "scope")]
        scopes: Vec<String>,
        #[arg(long)]
        redirect_uri: Option<String>,
    },
    /// Print a fresh PKCE verifier and challenge
    Challenge,
    /// Print an authorization URL with its state and verifier
    AuthorizeUrl {
        #[arg(long = "scope")]
        scopes: Vec<String>,
        #[arg(long)]
        redirect_uri: Option<String>,
    },
    /// Exchange an authorization code for tokens
    Exchange {
        #[arg(long)]
        code: String,
        #[arg(long)]
        verifier: String,
    },
    /// Validate config file and exit
    ConfigValidate,
}

fn init_logging(cfg: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let _ = LogTracer::init();

    // Honor RUST_LOG if set, otherwise default to info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries URLs and token JSON, so logs go to stderr
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &cfg.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "eve-sso.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_ansi(false).with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer);

    if let Err(e) = tracing_subscriber_global::set_global_default(subscriber) {
        eprintln!("failed to set global tracing subscriber: {}", e);
    }
    guard
}

fn pick_scopes(cli_scopes: Vec<String>, cfg: &Config) -> Vec<String> {
    if cli_scopes.is_empty() {
        cfg.scopes.clone()
    } else {
        cli_scopes
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Explicit --config wins; otherwise use /etc/eve-sso/config.toml when
    // present and fall back to built-in defaults.
    let resolved_config_path: Option<PathBuf> = match &cli.config {
        Some(p) => Some(p.clone()),
        None => {
            let etc_path = Path::new("/etc/eve-sso/config.toml");
            etc_path.exists().then(|| etc_path.to_path_buf())
        }
    };

    if let Commands::ConfigValidate = cli.command {
        let Some(path) = resolved_config_path else {
            println!("OK (no config file, using defaults)");
            return Ok(());
        };
        match Config::from_path(&path) {
            Ok(_) => println!("OK"),
            Err(e) => {
                eprintln!("Config validation failed: {}", e);
                std::process::exit(2);
            }
        }
        return Ok(());
    }

    let cfg = match &resolved_config_path {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default().with_env_overrides(),
    };
    let _guard = init_logging(&cfg);

    match cli.command {
        Commands::Login { scopes, redirect_uri } => {
            let scopes = pick_scopes(scopes, &cfg);
            let redirect_uri = redirect_uri.unwrap_or_else(|| cfg.redirect_uri.clone());
            sso_auth::run_sso_auth(&cfg, &scopes, &redirect_uri)
                .await
                .context("running SSO login")?;
        }
        Commands::Challenge => {
            let (verifier, challenge) = pkce::generate_code_challenge();
            println!("verifier:  {}", verifier.as_str());
            println!("challenge: {}", challenge);
        }
        Commands::AuthorizeUrl { scopes, redirect_uri } => {
            let scopes = pick_scopes(scopes, &cfg);
            let redirect_uri = redirect_uri.unwrap_or_else(|| cfg.redirect_uri.clone());
            let (verifier, challenge) = pkce::generate_code_challenge();
            let (url, state) = sso::redirect_to_sso(&cfg, &scopes, &redirect_uri, &challenge)?;
            println!("url:      {}", url);
            println!("state:    {}", state);
            println!("verifier: {}", verifier.as_str());
        }
        Commands::Exchange { code, verifier } => {
            let client = reqwest::Client::new();
            let verifier = pkce::CodeVerifier::new(verifier);
            let tokens = sso::request_token(&client, &cfg, &code, &verifier)
                .await
                .context("exchanging authorization code")?;
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        // handled before config load
        Commands::ConfigValidate => {}
    }

    Ok(())
}
