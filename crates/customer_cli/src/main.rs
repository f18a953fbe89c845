//! Customer store command-line caller.
//!
//! # Usage
//!
//! ```bash
//! customer-cli --db customers.sqlite3 seed
//! customer-cli list
//! customer-cli get 1
//! customer-cli find phone 111-222-3333
//! customer-cli upsert '{"name":"Juan Perez","city":"Texas"}'
//! customer-cli delete 3
//! ```
//!
//! Every command opens its own connection, performs one service call and
//! prints a `{"statusCode": …, "value": …}` envelope. Exit status is 0 for
//! 200/204, 1 for 404 and 2 when the command could not run.

use clap::Parser;
use customer_core::db::open_db;
use customer_core::{core_version, default_log_level, init_logging};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod envelope;
mod error;

use commands::{execute, Command};
use envelope::Envelope;
use error::CliError;

const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "customer-cli")]
#[command(author, version, about = "Customer record access tools")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "CUSTOMER_DB_PATH", default_value = "customers.sqlite3", global = true)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error); only applies with --log-dir
    #[arg(long, env = "CUSTOMER_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "CUSTOMER_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Level requested while file logging is off.
    fn ignored_log_level(&self) -> Option<&str> {
        match self.log_dir {
            Some(_) => None,
            None => self.log_level.as_deref(),
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli) {
        Ok(envelope) => match serde_json::to_string_pretty(&envelope) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::from(envelope.exit_status())
            }
            Err(err) => report_failure(&CliError::from(err)),
        },
        Err(err) => report_failure(&err),
    }
}

fn run(cli: Cli) -> Result<Envelope, CliError> {
    match cli.log_dir.as_deref() {
        Some(log_dir) => {
            let level = cli.log_level.as_deref().unwrap_or(default_log_level());
            init_logging(level, log_dir)?;
        }
        None => {
            if let Some(level) = cli.ignored_log_level() {
                eprintln!("warning: --log-level {level} has no effect without --log-dir");
            }
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={} command={}",
        core_version(),
        cli.command.name()
    );

    let mut conn = open_db(&cli.db)?;
    execute(cli.command, &mut conn)
}

fn report_failure(err: &CliError) -> ExitCode {
    error!("event=cli_command module=cli status=error error={err}");
    eprintln!("error: {err}");
    ExitCode::from(EXIT_FAILURE)
}
