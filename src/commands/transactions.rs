//! The `fnb transactions` and `fnb accounts` commands.

use crate::api::{FixtureNavigator, FixtureView, Mode};
use crate::args::{AccountsArgs, TransactionsArgs};
use crate::commands::Out;
use crate::model::{Account, TransactionsResult};
use crate::pipeline::TransactionMode;
use crate::session::Scraper;
use crate::Config;
use anyhow::{bail, Context};
use std::path::Path;
use tracing::debug;

/// Reads the transactions of one account from the view and returns them as the command output.
pub async fn transactions(
    config: Config,
    args: &TransactionsArgs,
) -> anyhow::Result<Out<TransactionsResult>> {
    let view = open_view(args.snapshot()).await?;
    let account = view
        .find_account(args.account())
        .with_context(|| format!("No account named or numbered '{}'", args.account()))?;
    let navigator = FixtureNavigator::new(config.section_label());
    let mut scraper = Scraper::new(view, navigator, config);

    let mode = TransactionMode::from_pending(args.pending());
    let result = scraper
        .transactions(&account, mode)
        .await
        .with_context(|| format!("Unable to read {mode} transactions for '{}'", account.name()))?;

    Ok(Out::new(
        format!(
            "Read {} {mode} transactions for '{}' ({} account)",
            result.len(),
            account.name(),
            result.account_category()
        ),
        result,
    ))
}

/// Lists the accounts that the view knows about.
pub async fn accounts(args: &AccountsArgs) -> anyhow::Result<Out<Vec<Account>>> {
    let view = open_view(args.snapshot()).await?;
    let accounts = view.accounts();
    Ok(Out::new(format!("Found {} accounts", accounts.len()), accounts))
}

/// Opens the snapshot at `snapshot`, or the seeded snapshot in test mode.
async fn open_view(snapshot: Option<&Path>) -> anyhow::Result<FixtureView> {
    match (snapshot, Mode::from_env()) {
        (Some(path), _) => FixtureView::load(path).await,
        (None, Mode::Test) => {
            debug!("Using the seeded snapshot");
            Ok(FixtureView::default())
        }
        (None, Mode::Snapshot) => bail!("No snapshot given, pass --snapshot"),
    }
}
