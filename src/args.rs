//! These structs provide the CLI interface for the fnb CLI.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// fnb: reads transactions from FNB online banking pages into typed records.
///
/// The pipeline runs against a view of the banking site. From the command line that view is a
/// snapshot file of captured page data (see `FixtureView` for its format). The result is printed
/// to stdout as JSON.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read the posted or pending transactions of one account.
    Transactions(TransactionsArgs),
    /// List the accounts present in a snapshot.
    Accounts(AccountsArgs),
    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The configuration file. Defaults to ~/.fnb-scrape/config.json, and to built-in settings if
    /// that file does not exist.
    #[arg(long, env = "FNB_SCRAPE_CONFIG")]
    config: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self { log_level, config }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// (Not shown): Args for the `fnb transactions` command.
#[derive(Debug, Parser, Clone)]
pub struct TransactionsArgs {
    /// The account name or number.
    #[arg(long)]
    account: String,

    /// Read pending (authorised but not settled) transactions instead of posted ones.
    #[arg(long)]
    pending: bool,

    /// The snapshot file to read from.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl TransactionsArgs {
    pub fn new(account: impl Into<String>, pending: bool, snapshot: Option<PathBuf>) -> Self {
        Self {
            account: account.into(),
            pending,
            snapshot,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn snapshot(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }
}

/// (Not shown): Args for the `fnb accounts` command.
#[derive(Debug, Parser, Clone)]
pub struct AccountsArgs {
    /// The snapshot file to read from.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl AccountsArgs {
    pub fn new(snapshot: Option<PathBuf>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }
}

/// (Not shown): Args for the `fnb init-config` command.
#[derive(Debug, Parser, Clone)]
pub struct InitConfigArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    force: bool,
}

impl InitConfigArgs {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transactions() {
        let args = Args::try_parse_from([
            "fnb",
            "--log-level",
            "debug",
            "transactions",
            "--account",
            "Gold Cheque",
            "--pending",
            "--snapshot",
            "/tmp/page.json",
        ])
        .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        match args.command() {
            Command::Transactions(t) => {
                assert_eq!(t.account(), "Gold Cheque");
                assert!(t.pending());
                assert_eq!(t.snapshot(), Some(Path::new("/tmp/page.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["fnb", "init-config"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        assert!(matches!(args.command(), Command::InitConfig(a) if !a.force()));
    }

    #[test]
    fn test_transactions_requires_account() {
        assert!(Args::try_parse_from(["fnb", "transactions"]).is_err());
    }
}
