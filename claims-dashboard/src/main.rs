mod shell;
mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use claims_client::{
    ClaimAction, ClientConfig, Dashboard, HttpClaimsApi, LIST_LOAD_ERROR,
    config::BASE_URL_VAR,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::view::{render_claim_detail, render_claims, render_dashboard};

#[derive(Parser)]
#[command(
    name = "claims-dashboard",
    version,
    about = "Submit and track claims against the claims backend"
)]
struct Cli {
    /// Base URL of the claims backend
    #[arg(long, env = BASE_URL_VAR, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all claims with the actions available for each
    List,
    /// Show one claim with its audit log
    Show { id: i64 },
    /// Submit a new claim
    Submit {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        description: String,
    },
    /// Validate (AI) a submitted claim
    Validate { id: i64 },
    /// Analyze (Manual): move a validated or reviewed claim to root_cause_identified
    Analyze { id: i64 },
    /// Resolve (Manual): move a claim with an identified root cause to resolved
    Resolve { id: i64 },
    /// Re-open a resolved claim for manual review
    Reopen { id: i64 },
    /// Interactive dashboard
    Shell,
}

/// Initialize tracing on stderr; `LOG_FORMAT=json` switches to structured output
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "claims_dashboard=warn,claims_client=warn".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_lookup(|key| {
        if key == BASE_URL_VAR {
            cli.base_url.clone()
        } else {
            std::env::var(key).ok()
        }
    })
    .context("Failed to read client configuration")?;

    info!(base_url = %config.base_url, "Using claims backend");
    let api = HttpClaimsApi::new(&config).context("Failed to build HTTP client")?;
    let mut dash = Dashboard::new(Arc::new(api));

    match cli.command {
        Command::List => {
            dash.load().await.context(LIST_LOAD_ERROR)?;
            print!("{}", render_dashboard(&dash));
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { id } => {
            let claim = dash
                .fetch(id)
                .await
                .with_context(|| format!("Failed to fetch claim {id}"))?;
            print!("{}", render_claim_detail(&claim));
            Ok(ExitCode::SUCCESS)
        }
        Command::Submit {
            customer_id,
            description,
        } => {
            dash.form_mut().set_customer_id(customer_id);
            dash.form_mut().set_description(description);
            match dash.submit().await {
                Ok(_) => Ok(report(&dash, true)),
                Err(e) if dash.notice().is_some() => {
                    info!(error = %e, "Submit failed");
                    Ok(report(&dash, false))
                }
                Err(e) => Err(e).context("Cannot submit claim"),
            }
        }
        Command::Validate { id } => act(&mut dash, id, ClaimAction::ValidateAi).await,
        Command::Analyze { id } => act(&mut dash, id, ClaimAction::Analyze).await,
        Command::Resolve { id } => act(&mut dash, id, ClaimAction::Resolve).await,
        Command::Reopen { id } => act(&mut dash, id, ClaimAction::Reopen).await,
        Command::Shell => {
            shell::run(dash).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the list so the claim's current status is known, then dispatch
async fn act(dash: &mut Dashboard, id: i64, action: ClaimAction) -> Result<ExitCode> {
    dash.load().await.context(LIST_LOAD_ERROR)?;

    match dash.dispatch(id, action).await {
        Ok(_) => Ok(report(dash, true)),
        Err(e) if dash.notice().is_some() => {
            info!(claim_id = id, error = %e, "Action failed");
            Ok(report(dash, false))
        }
        Err(e) => Err(e).with_context(|| format!("Cannot {} claim {id}", action.command())),
    }
}

fn report(dash: &Dashboard, ok: bool) -> ExitCode {
    if let Some(notice) = dash.notice() {
        if notice.is_error {
            eprintln!("{}", notice.text);
        } else {
            println!("{}", notice.text);
        }
    }
    if ok {
        print!("{}", render_claims(dash));
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
