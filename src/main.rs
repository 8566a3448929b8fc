//! Ladle - a terminal dashboard for food donation databases.

mod chart;
mod cli;
mod config;
mod db;
mod error;
mod logging;
mod reports;
mod tui;

use cli::{Cli, OutputFormat};
use config::{Config, ConnectionConfig};
use error::{LadleError, Result};
use reports::Report;
use tracing::info;
use tui::widgets::table::ResultTable;

#[tokio::main]
async fn main() {
    // Pick up MYSQL_* variables from a local .env, if present.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    if cli.is_headless() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.list_reports {
        for report in Report::ALL {
            println!("{}", report.label());
        }
        return Ok(());
    }

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
        LadleError::config(
            "No database connection configured. \
             Pass a connection string, use --host/--database, or add a \
             [connections.default] section to the config file.",
        )
    })?;

    info!("Connection: {}", connection.display_string());

    match cli.report {
        Some(number) => run_headless(&cli, &connection, number).await,
        None => tui::run(&connection).await,
    }
}

/// Runs a single report and prints it to stdout.
async fn run_headless(cli: &Cli, connection: &ConnectionConfig, number: usize) -> Result<()> {
    let report = number
        .checked_sub(1)
        .and_then(Report::from_index)
        .ok_or_else(|| {
            LadleError::config(format!(
                "No report number {number}. Valid reports are 1-{} (see --list-reports).",
                Report::ALL.len()
            ))
        })?;

    let format = cli
        .parse_output_format()
        .map_err(LadleError::config)?;

    let result = db::run_report(connection, report).await?;

    match format {
        OutputFormat::Text => {
            println!("{}", report.label());
            println!("{}", ResultTable::new(&result).render_plain(120));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| LadleError::internal(format!("Failed to serialize result: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Resolves the final connection configuration from CLI args, config file,
/// and environment.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    // Precedence:
    // 1. CLI arguments (highest)
    // 2. Named connection from config
    // 3. Default connection from config
    // 4. Environment variables
    let mut connection = cli.to_connection_config()?;

    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(LadleError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                )));
            }
        }
    }

    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    // Fall back to a purely environment-driven connection.
    let mut conn = connection.unwrap_or_default();
    conn.apply_env_defaults();

    if conn.host.is_none() && conn.database.is_none() {
        return Ok(None);
    }

    Ok(Some(conn))
}
