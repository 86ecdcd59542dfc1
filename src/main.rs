use clap::Parser;
use fnb_scrape::args::{Args, Command};
use fnb_scrape::{commands, Config};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> anyhow::Result<()> {
    trace!("{args:?}");
    let config_path = args.common().config();

    match args.command() {
        Command::Transactions(transactions_args) => {
            let config = Config::resolve(config_path).await?;
            commands::transactions(config, transactions_args)
                .await?
                .print()
        }
        Command::Accounts(accounts_args) => commands::accounts(accounts_args).await?.print(),
        Command::InitConfig(init_args) => commands::init_config(config_path, init_args.force())
            .await?
            .print(),
    }
}

/// Sends logs to stderr. `RUST_LOG` takes precedence over `--log-level`, which only applies to
/// this crate's own targets.
pub fn init_logger(level: LevelFilter) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!(
            "{crate_name}={level},{bin_name}={level}",
            crate_name = env!("CARGO_CRATE_NAME"),
            bin_name = env!("CARGO_BIN_NAME"),
        ))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
