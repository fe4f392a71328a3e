//! Interactive dashboard: one command per line, re-rendered after each.

use anyhow::Result;
use claims_client::{ClaimAction, Dashboard};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::view::render_dashboard;

const HELP: &str = "\
Commands:
  customer <text>      set the Customer ID field
  description <text>   set the Description field
  submit               submit the form
  validate <id>        Validate (AI)
  analyze <id>         Analyze (Manual)
  resolve <id>         Resolve (Manual)
  reopen <id>          Re-open
  refresh              reload the claim list
  help                 show this help
  quit                 leave the dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    SetCustomerId(String),
    SetDescription(String),
    Submit,
    Action(ClaimAction, i64),
    Refresh,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim_start();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    // Field values keep their inner and trailing text exactly as typed
    let rest = rest.strip_suffix('\n').unwrap_or(rest);
    let rest = rest.strip_suffix('\r').unwrap_or(rest);

    match word.trim_end() {
        "customer" => Ok(ShellCommand::SetCustomerId(rest.to_string())),
        "description" => Ok(ShellCommand::SetDescription(rest.to_string())),
        "submit" => Ok(ShellCommand::Submit),
        "refresh" => Ok(ShellCommand::Refresh),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "" => Err("empty command".to_string()),
        other => {
            let action = ClaimAction::from_command(other)
                .ok_or_else(|| format!("unknown command '{other}' (try 'help')"))?;
            let id = rest
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("'{other}' needs a numeric claim id"))?;
            Ok(ShellCommand::Action(action, id))
        }
    }
}

pub async fn run(mut dash: Dashboard) -> Result<()> {
    let _ = dash.load().await;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout.write_all(render_dashboard(&dash).as_bytes()).await?;

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                stdout.write_all(format!("{message}\n").as_bytes()).await?;
                continue;
            }
        };
        debug!(?command, "Shell command");

        // Dashboard operations record their own outcome in the notice line;
        // only requests refused before reaching the backend are printed here.
        let refused = match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                stdout.write_all(format!("{HELP}\n").as_bytes()).await?;
                continue;
            }
            ShellCommand::SetCustomerId(value) => {
                dash.form_mut().set_customer_id(value);
                None
            }
            ShellCommand::SetDescription(value) => {
                dash.form_mut().set_description(value);
                None
            }
            ShellCommand::Refresh => {
                let _ = dash.load().await;
                None
            }
            ShellCommand::Submit => preflight(dash.submit().await.err(), &dash),
            ShellCommand::Action(action, id) => {
                preflight(dash.dispatch(id, action).await.err(), &dash)
            }
        };

        stdout.write_all(b"\n").await?;
        stdout.write_all(render_dashboard(&dash).as_bytes()).await?;
        if let Some(message) = refused {
            stdout.write_all(format!("\n{message}\n").as_bytes()).await?;
        }
    }

    Ok(())
}

/// Errors that never reached the backend leave the notice untouched, so they
/// are reported separately
fn preflight(error: Option<claims_client::ClaimsError>, dash: &Dashboard) -> Option<String> {
    use claims_client::ClaimsError;

    match error? {
        e @ (ClaimsError::MissingField(_)
        | ClaimsError::Busy
        | ClaimsError::UnknownClaim(_)
        | ClaimsError::ActionUnavailable { .. }) => {
            warn!(error = %e, busy = dash.is_busy(), "Request refused before sending");
            Some(e.to_string())
        }
        _ => None,
    }
}
