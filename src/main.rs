//! `truelist-check`: validates addresses from the command line.
//!
//! Prints one JSON object per address and exits non-zero when any address is
//! rejected or the API key is refused.

use anyhow::Context as _;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use truelist_guard::{Config, ConfigBuilder, Context, EmailValidator, ValidatorError};

#[derive(Parser, Debug)]
#[command(name = "truelist-check", version, about = "Check email deliverability via Truelist")]
struct Cli {
    /// Addresses to validate.
    #[arg(required = true)]
    emails: Vec<String>,

    /// Path to a TOML config file (defaults to ./truelist.toml when present).
    #[arg(short, long, env = "TRUELIST_CONFIG")]
    config: Option<PathBuf>,

    /// Reject addresses the service reports as risky.
    #[arg(long)]
    reject_risky: bool,

    /// Reject addresses when the service is unreachable or inconclusive.
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    email: &'a str,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let mut builder = ConfigBuilder::from_config(config);
    if cli.reject_risky {
        builder = builder.allow_risky(false);
    }
    let config = builder.build()?;

    let ctx = Context::new(config);
    let validator = EmailValidator::new(ctx.config()).fail_silently(!cli.strict);

    let mut all_accepted = true;
    for email in &cli.emails {
        let report = match validator.validate(&ctx, email).await {
            Ok(()) => Report {
                email,
                accepted: true,
                code: None,
                message: None,
            },
            Err(ValidatorError::Invalid(e)) => Report {
                email,
                accepted: false,
                code: Some(e.code),
                message: Some(e.message),
            },
            Err(ValidatorError::Propagated(e)) => {
                return Err(e).with_context(|| format!("Validation of {} aborted", email));
            }
        };
        all_accepted &= report.accepted;
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(if all_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
