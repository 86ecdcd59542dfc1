//! The seams to the rendered banking page. `View` reads from a page that has already been
//! positioned, `Navigator` positions it. Both are implemented elsewhere for a live browser, and by
//! `FixtureView`/`FixtureNavigator` for captured snapshots.

mod fixture;

use crate::model::Account;
use serde::{Deserialize, Serialize};

pub use fixture::{FixtureAccount, FixtureNavigator, FixtureView, Snapshot};

/// Selects the transaction rows and their cells in the rendered table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RowQuery {
    /// Matches one element per transaction row.
    pub row_selector: String,
    /// Matches the cells within a row, in column order.
    pub cell_selector: String,
}

/// The toggle that shows posted transactions.
pub const POSTED_TOGGLE: &str = "tableSwitcherButton_1";
/// The toggle that shows pending transactions.
pub const PENDING_TOGGLE: &str = "tableSwitcherButton_2";
/// The section that holds the transaction tables.
pub const TRANSACTION_SECTION: &str = "Transaction";
/// The title shown next to the account type in the account details panel.
pub const TYPE_LABEL: &str = "Type";

pub const DEFAULT_ROW_SELECTOR: &str = ".tableRow";
pub const DEFAULT_CELL_SELECTOR: &str = ".tableCell .tableCellItem";

impl Default for RowQuery {
    fn default() -> Self {
        Self {
            row_selector: DEFAULT_ROW_SELECTOR.to_string(),
            cell_selector: DEFAULT_CELL_SELECTOR.to_string(),
        }
    }
}

/// A rendered page that has been positioned on an account's transaction table.
///
/// A view is a shared mutable resource: navigation changes what it shows. Callers must not run
/// more than one pipeline call against the same view at a time.
#[async_trait::async_trait]
pub trait View {
    /// Runs the in-page query and returns the inner text of every cell, one `Vec` per row, in
    /// on-screen order.
    async fn query_rows(&mut self, query: &RowQuery) -> anyhow::Result<Vec<Vec<String>>>;

    /// Returns the trimmed text of the value shown next to the title `label`, e.g. the account
    /// type next to `Type`.
    async fn labelled_text(&mut self, label: &str) -> anyhow::Result<String>;
}

/// Positions a view on one section of one account.
#[async_trait::async_trait]
pub trait Navigator<V>
where
    V: View + Send + ?Sized,
{
    /// Opens `section` (e.g. `Transaction`) for `account` and clicks the table toggle
    /// `mode_toggle_id`. An error here is fatal to the calling pipeline.
    async fn navigate_to_account(
        &mut self,
        view: &mut V,
        account: &Account,
        section: &str,
        mode_toggle_id: &str,
    ) -> anyhow::Result<()>;
}

/// The environment variable that switches the CLI to the seeded snapshot.
pub const TEST_MODE_ENV: &str = "FNB_SCRAPE_IN_TEST_MODE";

/// Where the CLI gets its view from.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// A snapshot file given on the command line.
    #[default]
    Snapshot,
    /// The seeded snapshot compiled into the binary.
    Test,
}

serde_plain::derive_display_from_serialize!(Mode);

impl Mode {
    /// `Mode::Test` when `FNB_SCRAPE_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Mode::Snapshot`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Snapshot,
        }
    }
}
