//! herdbook - command-line client for the farm-management API.
//!
//! Exercises the core library end to end: login/logout, profile, livestock
//! and finance listings, and the dashboard. Results print as pretty JSON on
//! stdout; status and log lines go to stderr.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use herdbook_core::api::{AnimalFilters, ApiClient, StatusFilter};
use herdbook_core::auth::{CredentialStore, MemorySession, SessionFile};
use herdbook_core::config::Config;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!(
        "Usage: herdbook <command> [options]

Commands:
  login [--remember]          Authenticate and save the session
  logout                      Drop the session (and saved tokens)
  me                          Show the current account profile
  animals [--all] [--page N] [--status S] [--type ID]
                              List animals (status: all|existing|sold|dead)
  types                       List animal types
  sales [--page N]            List sales
  purchases [--page N]        List purchases
  expenses [--page N]         List expenses
  stats                       Show dashboard statistics
  dashboard                   Stats plus the five most recent animals"
    );
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_page(args: &[String]) -> Result<u32> {
    match flag_value(args, "--page") {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid --page value: {raw}")),
        None => Ok(1),
    }
}

fn parse_status(raw: &str) -> Result<StatusFilter> {
    match raw {
        "all" => Ok(StatusFilter::All),
        "existing" => Ok(StatusFilter::Existing),
        "sold" => Ok(StatusFilter::Sold),
        "dead" => Ok(StatusFilter::Dead),
        other => bail!("invalid --status value: {other} (expected all|existing|sold|dead)"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn prompt_username(default: Option<&str>) -> Result<String> {
    match default {
        Some(name) => eprint!("Username [{name}]: "),
        None => eprint!("Username: "),
    }
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let entered = line.trim();

    if entered.is_empty() {
        match default {
            Some(name) => Ok(name.to_string()),
            None => bail!("a username is required"),
        }
    } else {
        Ok(entered.to_string())
    }
}

async fn run_login(
    client: &ApiClient,
    config: &mut Config,
    username: &mut Option<String>,
    args: &[String],
) -> Result<()> {
    let name = prompt_username(config.last_username.as_deref())?;

    // Reuse a remembered password when the keychain has one
    let credentials = CredentialStore::for_user(&name);
    let password = if credentials.exists() {
        info!(username = %name, "using stored credentials");
        credentials.password()?
    } else {
        rpassword::prompt_password("Password: ").context("Failed to read password")?
    };

    let user = client.login(&name, &password).await?;

    if has_flag(args, "--remember") {
        credentials.remember(&password)?;
        eprintln!("Credentials stored in the OS keychain.");
    }

    config.last_username = Some(name.clone());
    config.save()?;
    *username = Some(name);

    eprintln!("Logged in as {}.", user.full_name());
    print_json(&user)
}

fn run_logout(client: &ApiClient, username: Option<&str>) -> Result<()> {
    client.logout();

    // A remembered password would silently log the account back in on the
    // next `login`, so drop it too.
    if let Some(name) = username {
        let credentials = CredentialStore::for_user(name);
        if credentials.exists() {
            credentials.forget()?;
            eprintln!("Removed stored credentials.");
        }
    }

    eprintln!("Logged out.");
    Ok(())
}

async fn run_animals(client: &ApiClient, args: &[String]) -> Result<()> {
    let mut filters = AnimalFilters::default();
    if let Some(raw) = flag_value(args, "--status") {
        filters.status = Some(parse_status(raw)?);
    }
    if let Some(raw) = flag_value(args, "--type") {
        filters.animal_type = Some(
            raw.parse()
                .with_context(|| format!("invalid --type value: {raw}"))?,
        );
    }

    if has_flag(args, "--all") {
        let animals = client.all_animals(&filters).await?;
        print_json(&animals)
    } else {
        let page = client.animals(&filters, parse_page(args)?).await?;
        print_json(&page)
    }
}

async fn run_dashboard(client: &ApiClient) -> Result<()> {
    let recent_filters = AnimalFilters {
        ordering: Some("-created_at".to_string()),
        limit: Some(5),
        ..Default::default()
    };
    let (stats, recent) =
        futures::future::try_join(client.stats(), client.animals(&recent_filters, 1)).await?;

    print_json(&serde_json::json!({
        "stats": stats,
        "recent_animals": recent.results,
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().cloned() else {
        print_usage();
        std::process::exit(2);
    };

    let mut config = Config::load()?;
    let mut username = config.last_username.clone();

    // Hydrate the session from the last saved login, if any
    let session = Arc::new(MemorySession::new());
    if let Some(saved) = SessionFile::load()? {
        saved.hydrate(session.as_ref());
        if saved.username.is_some() {
            username = saved.username.clone();
        }
    }

    let client = ApiClient::new(
        &config.base_url(),
        Duration::from_secs(config.timeout_secs),
        session.clone(),
    )?;

    let result = run_command(&client, &mut config, &mut username, &command, &args).await;

    // Persist the session even when the command failed: the access token
    // may have been silently refreshed mid-command, or a failed refresh
    // may have cleared the session entirely. Either way the file on disk
    // must match the store, or the next run rehydrates dead tokens.
    let synced = SessionFile::sync(session.as_ref(), username);

    result.and(synced)
}

async fn run_command(
    client: &ApiClient,
    config: &mut Config,
    username: &mut Option<String>,
    command: &str,
    args: &[String],
) -> Result<()> {
    match command {
        "login" => run_login(client, config, username, args).await,
        "logout" => run_logout(client, username.as_deref()),
        "me" => print_json(&client.me().await?),
        "animals" => run_animals(client, args).await,
        "types" => print_json(&client.animal_types().await?),
        "sales" => print_json(&client.sales(parse_page(args)?).await?),
        "purchases" => print_json(&client.purchases(parse_page(args)?).await?),
        "expenses" => print_json(&client.expenses(parse_page(args)?).await?),
        "stats" => print_json(&client.stats().await?),
        "dashboard" => run_dashboard(client).await,
        other => {
            eprintln!("Unknown command: {other}\n");
            print_usage();
            std::process::exit(2);
        }
    }
}
