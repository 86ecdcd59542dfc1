//! Implements `View` and `Navigator` over captured page data held in memory.
//!
//! Note: this is compiled even in the "production" version of this app so that the whole pipeline
//! can run, top-to-bottom, against a snapshot file without a browser.

use crate::api::{
    Navigator, RowQuery, View, PENDING_TOGGLE, POSTED_TOGGLE, TRANSACTION_SECTION, TYPE_LABEL,
};
use crate::model::Account;
use crate::utils;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, trace};

/// Captured page data for a set of accounts.
///
/// Example snapshot file:
/// ```json
/// {
///   "accounts": [
///     {
///       "name": "Gold Cheque",
///       "number": "62000000001",
///       "labels": { "Type": "Cheque Account" },
///       "tables": {
///         "tableSwitcherButton_1": [
///           ["01 Feb 2020", "Grocery Store", "REF123", "R 2,50", "R 150,00", "R 4 200,00"]
///         ],
///         "tableSwitcherButton_2": []
///       }
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    pub accounts: Vec<FixtureAccount>,
}

/// What the page shows for one account.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FixtureAccount {
    pub name: String,
    pub number: String,
    /// Title -> value pairs from the account details panel, e.g. `Type` -> `Cheque Account`.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Toggle id -> rows of cell text.
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<Vec<String>>>,
}

impl FixtureAccount {
    pub fn account(&self) -> Account {
        Account::new(&self.name, &self.number)
    }

    fn is(&self, account: &Account) -> bool {
        if !account.number().is_empty() {
            return self.number == account.number();
        }
        self.name.eq_ignore_ascii_case(account.name())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Position {
    account: usize,
    toggle: String,
}

/// An implementation of `View` that serves a `Snapshot`. It shows nothing until a
/// `FixtureNavigator` has positioned it.
#[derive(Debug, Clone)]
pub struct FixtureView {
    snapshot: Snapshot,
    position: Option<Position>,
}

impl FixtureView {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            position: None,
        }
    }

    /// Loads a JSON snapshot file.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let snapshot: Snapshot = utils::deserialize(path).await?;
        debug!(
            "Loaded snapshot with {} accounts from {}",
            snapshot.accounts.len(),
            path.display()
        );
        Ok(Self::new(snapshot))
    }

    /// The accounts present in the snapshot.
    pub fn accounts(&self) -> Vec<Account> {
        self.snapshot
            .accounts
            .iter()
            .map(FixtureAccount::account)
            .collect()
    }

    /// Finds an account by number or, ignoring case, by name.
    pub fn find_account(&self, key: &str) -> Option<Account> {
        self.accounts().into_iter().find(|a| a.matches(key))
    }

    fn positioned(&self) -> anyhow::Result<(&FixtureAccount, &str)> {
        let position = self
            .position
            .as_ref()
            .context("The view has not been positioned on an account")?;
        let account = self
            .snapshot
            .accounts
            .get(position.account)
            .context("The positioned account is no longer in the snapshot")?;
        Ok((account, &position.toggle))
    }

    fn show(&mut self, account: &Account, toggle: &str) -> anyhow::Result<()> {
        let ix = self
            .snapshot
            .accounts
            .iter()
            .position(|a| a.is(account))
            .with_context(|| {
                format!(
                    "Account '{}' ({}) not found",
                    account.name(),
                    account.number()
                )
            })?;
        if !self.snapshot.accounts[ix].tables.contains_key(toggle) {
            bail!("Table toggle '{toggle}' not found for account '{}'", account.name());
        }
        self.position = Some(Position {
            account: ix,
            toggle: toggle.to_string(),
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl View for FixtureView {
    async fn query_rows(&mut self, query: &RowQuery) -> anyhow::Result<Vec<Vec<String>>> {
        trace!("query_rows {query:?}");
        let (account, toggle) = self.positioned()?;
        account
            .tables
            .get(toggle)
            .cloned()
            .with_context(|| format!("Table '{toggle}' not found"))
    }

    async fn labelled_text(&mut self, label: &str) -> anyhow::Result<String> {
        trace!("labelled_text for {label}");
        let (account, _) = self.positioned()?;
        account
            .labels
            .get(label)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("No value found next to the title '{label}'"))
    }
}

impl Default for FixtureView {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::new(default_snapshot())
    }
}

/// Positions a `FixtureView`. Only the transaction section exists in a snapshot.
#[derive(Debug, Clone)]
pub struct FixtureNavigator {
    section: String,
    navigations: usize,
}

impl FixtureNavigator {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            navigations: 0,
        }
    }

    /// How many successful navigations this navigator has performed.
    pub fn navigations(&self) -> usize {
        self.navigations
    }
}

impl Default for FixtureNavigator {
    fn default() -> Self {
        Self::new(TRANSACTION_SECTION)
    }
}

#[async_trait::async_trait]
impl Navigator<FixtureView> for FixtureNavigator {
    async fn navigate_to_account(
        &mut self,
        view: &mut FixtureView,
        account: &Account,
        section: &str,
        mode_toggle_id: &str,
    ) -> anyhow::Result<()> {
        debug!(
            "Navigating to '{section}' for account '{}' with toggle '{mode_toggle_id}'",
            account.name()
        );
        if section != self.section {
            bail!("Section '{section}' not found");
        }
        view.show(account, mode_toggle_id)?;
        self.navigations += 1;
        Ok(())
    }
}

/// Provides the seed snapshot from this module.
fn default_snapshot() -> Snapshot {
    let seed = [
        (
            "Gold Cheque",
            "62000000001",
            "Cheque Account",
            CHEQUE_POSTED,
            CHEQUE_PENDING,
        ),
        (
            "Money Maximiser",
            "62000000002",
            "Savings Account",
            SAVINGS_POSTED,
            "",
        ),
        (
            "Premier Credit Card",
            "4901000000000003",
            "Credit Card",
            CREDIT_POSTED,
            CREDIT_PENDING,
        ),
    ];
    let accounts = seed
        .into_iter()
        .map(|(name, number, type_label, posted, pending)| {
            let mut tables = BTreeMap::new();
            tables.insert(POSTED_TOGGLE.to_string(), seed_rows(posted));
            tables.insert(PENDING_TOGGLE.to_string(), seed_rows(pending));
            FixtureAccount {
                name: name.to_string(),
                number: number.to_string(),
                labels: BTreeMap::from([(TYPE_LABEL.to_string(), type_label.to_string())]),
                tables,
            }
        })
        .collect();
    Snapshot { accounts }
}

fn seed_rows(csv_data: &str) -> Vec<Vec<String>> {
    // The seed data is a compile-time constant covered by tests.
    load_csv(csv_data).unwrap_or_default()
}

/// Loads rows of cell text from a CSV-formatted string.
pub(crate) fn load_csv(csv_data: &str) -> anyhow::Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.context("Unable to read seed CSV record")?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Seed cheque posted rows: date, description, reference, service fee, amount, balance, status.
const CHEQUE_POSTED: &str = r##"05 Feb 2020,Salary Acme Ltd,ACME PAYROLL,"R 0,00","R 25 000,00","R 29 200,00",Successful
03 Feb 2020,Cash Withdrawal,ATM 0042,"R 9,50","-R 1 000,00","R 4 200,00",Successful
01 Feb 2020,Grocery Store,REF123,"R 2,50","R 150,00","R 5 209,50",Successful
"##;

/// Seed cheque pending rows: date, card number, description, amount.
const CHEQUE_PENDING: &str = r##"06 Feb 2020,4901********1234,Fuel Station,"-R 450,00",Pending
"##;

/// Seed savings posted rows: date, description, amount, balance.
const SAVINGS_POSTED: &str = r##"29 Feb 2020,Interest,"R 41,07","R 10 041,07",Successful
01 Feb 2020,Transfer From Gold Cheque,"R 10 000,00","R 10 000,00",Successful
"##;

/// Seed credit posted rows: date, description, amount.
const CREDIT_POSTED: &str = r##"04 Feb 2020,Online Store,"-R 1 299,99",Successful
02 Feb 2020,Payment Received,"R 5 000,00",Successful
"##;

/// Seed credit pending rows: date, card number, description, amount.
const CREDIT_PENDING: &str = r##"07 Feb 2020,,Streaming Service,"-R 159,00",Pending
"##;
