use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Password;
use dotenvy::dotenv;
use serde_json::{Map, Value};
use tracing::{debug, info};

use tokenizer_auth::{
    EncodedSecret, encode_secret, issue_access_token, issue_refresh_token, verify,
    verify_access_token, verify_refresh_token,
};
use tokenizer_config::{JwtConfig, expires_after};

#[derive(Parser)]
#[command(name = "tokenizer")]
#[command(about = "Tokenizer - issue and verify HMAC-signed JWTs", long_about = None)]
struct Cli {
    /// Raw secret (falls back to JWT_SECRET, then a hidden prompt)
    #[arg(short = 's', long, global = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the base64 form of the secret
    EncodeSecret,
    /// Issue an access token
    IssueAccess {
        /// Subject claim
        #[arg(long)]
        subject: String,

        /// Custom claims as a JSON object, e.g. '{"memberId":1,"roles":["USER"]}'
        #[arg(short = 'c', long, default_value = "{}")]
        claims: String,

        /// Lifetime in seconds (default: JWT_ACCESS_EXPIRY)
        #[arg(long)]
        ttl: Option<i64>,
    },
    /// Issue a refresh token
    IssueRefresh {
        /// Subject claim
        #[arg(long)]
        subject: String,

        /// Lifetime in seconds (default: JWT_REFRESH_EXPIRY)
        #[arg(long)]
        ttl: Option<i64>,
    },
    /// Verify a token's signature and expiry
    Verify {
        /// The compact token
        #[arg(short = 't', long)]
        token: String,

        /// Which claim layout to expect
        #[arg(long, value_enum, default_value_t = TokenKind::Any)]
        kind: TokenKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TokenKind {
    Any,
    Access,
    Refresh,
}

fn main() -> Result<()> {
    dotenv().ok();
    tokenizer_observability::init_logging();

    let cli = Cli::parse();
    let config = JwtConfig::from_env();
    debug!(?config, "Loaded configuration");

    let secret = resolve_secret(cli.secret, &config)?;

    let output = match cli.command {
        Commands::EncodeSecret => secret.as_str().to_string(),
        Commands::IssueAccess {
            subject,
            claims,
            ttl,
        } => handle_issue_access(&secret, &config, &subject, &claims, ttl)?,
        Commands::IssueRefresh { subject, ttl } => {
            handle_issue_refresh(&secret, &config, &subject, ttl)?
        }
        Commands::Verify { token, kind } => handle_verify(&secret, &token, kind)?,
    };

    println!("{}", output);
    Ok(())
}

fn resolve_secret(flag: Option<String>, config: &JwtConfig) -> Result<EncodedSecret> {
    if let Some(raw) = flag {
        return Ok(encode_secret(raw));
    }

    if std::env::var_os("JWT_SECRET").is_some() {
        return Ok(EncodedSecret::from(config));
    }

    let raw: String = Password::new()
        .with_prompt("Secret")
        .interact()
        .context("Failed to read secret")?;
    Ok(encode_secret(raw))
}

fn expires_at(
    ttl: Option<i64>,
    default: impl FnOnce(DateTime<Utc>) -> Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>> {
    let now = Utc::now();
    let expiration = match ttl {
        Some(seconds) => expires_after(now, seconds),
        None => default(now),
    };
    expiration.context("Token lifetime is out of range")
}

fn handle_issue_access(
    secret: &EncodedSecret,
    config: &JwtConfig,
    subject: &str,
    claims: &str,
    ttl: Option<i64>,
) -> Result<String> {
    let claims: Map<String, Value> =
        serde_json::from_str(claims).context("--claims must be a JSON object")?;
    let expiration = expires_at(ttl, |now| config.access_expires_at(now))?;

    let token = issue_access_token(claims, subject, expiration, secret)
        .context("Failed to issue access token")?;

    info!(exp = %expiration, "Access token issued");
    Ok(token)
}

fn handle_issue_refresh(
    secret: &EncodedSecret,
    config: &JwtConfig,
    subject: &str,
    ttl: Option<i64>,
) -> Result<String> {
    let expiration = expires_at(ttl, |now| config.refresh_expires_at(now))?;

    let token = issue_refresh_token(subject, expiration, secret)
        .context("Failed to issue refresh token")?;

    info!(exp = %expiration, "Refresh token issued");
    Ok(token)
}

fn handle_verify(secret: &EncodedSecret, token: &str, kind: TokenKind) -> Result<String> {
    let output = match kind {
        TokenKind::Any => {
            verify(token, secret).context("Token rejected")?;
            "valid".to_string()
        }
        TokenKind::Access => {
            let claims = verify_access_token(token, secret).context("Token rejected")?;
            serde_json::to_string_pretty(&claims)?
        }
        TokenKind::Refresh => {
            let claims = verify_refresh_token(token, secret).context("Token rejected")?;
            serde_json::to_string_pretty(&claims)?
        }
    };
    Ok(output)
}
