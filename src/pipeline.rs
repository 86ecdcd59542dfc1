//! Routes a transactions request to the right table reader for the account's category.

use crate::api::{Navigator, View};
use crate::builders::build_all;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{extract_rows, Variant};
use crate::model::{Account, AccountCategory, TransactionsResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Which transaction table is requested.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionMode {
    /// Settled transactions.
    #[default]
    Posted,
    /// Authorised transactions that have not settled.
    Pending,
}

serde_plain::derive_display_from_serialize!(TransactionMode);
serde_plain::derive_fromstr_from_deserialize!(TransactionMode);

impl TransactionMode {
    pub fn from_pending(pending: bool) -> Self {
        if pending {
            TransactionMode::Pending
        } else {
            TransactionMode::Posted
        }
    }
}

/// The table shape to read for `category` in `mode`, or `None` when there is nothing to read.
///
/// | mode    | Cheque  | Savings | Credit  | Other |
/// |---------|---------|---------|---------|-------|
/// | posted  | Cheque  | Savings | Credit  | -     |
/// | pending | Pending | -       | Pending | -     |
pub fn route(mode: TransactionMode, category: AccountCategory) -> Option<Variant> {
    match mode {
        TransactionMode::Pending => category.has_pending().then_some(Variant::Pending),
        TransactionMode::Posted => match category {
            AccountCategory::Cheque => Some(Variant::Cheque),
            AccountCategory::Savings => Some(Variant::Savings),
            AccountCategory::Credit => Some(Variant::Credit),
            AccountCategory::Other => None,
        },
    }
}

/// Reads the transactions of `account` for `mode`.
///
/// 1. The navigator positions `view` on the account's transaction section with the toggle for
///    `mode`.
/// 2. The account category is read once from the positioned view and trusted for the rest of the
///    call.
/// 3. If the category has no table for `mode`, the result is empty and no rows are read.
///    Otherwise every row is extracted and built, and the call fails if any row fails.
///
/// The caller must not run another call against the same `view` until this one completes.
pub async fn scrape_transactions<V, N>(
    view: &mut V,
    navigator: &mut N,
    config: &Config,
    account: &Account,
    mode: TransactionMode,
) -> Result<TransactionsResult>
where
    V: View + Send + ?Sized,
    N: Navigator<V> + Send + ?Sized,
{
    navigator
        .navigate_to_account(
            view,
            account,
            config.section_label(),
            config.toggle_for(mode),
        )
        .await
        .map_err(Error::Navigation)?;

    let type_label = view
        .labelled_text(config.type_label())
        .await
        .map_err(Error::View)?;
    let category = AccountCategory::from_label(&type_label);
    debug!("Account '{}' has type '{type_label}' ({category})", account.name());

    let variant = match route(mode, category) {
        Some(variant) => variant,
        None => {
            info!("No {mode} transactions are available for {category} accounts");
            return Ok(TransactionsResult::empty(category));
        }
    };

    let rows = extract_rows(view, &config.row_query(), variant).await?;
    let transactions = build_all(&rows, &config.normalizer())?;
    info!(
        "Read {} {mode} transactions for account '{}'",
        transactions.len(),
        account.name()
    );
    Ok(TransactionsResult::new(category, transactions))
}
