//! Reads FNB online banking transaction tables into typed, normalized records.
//!
//! The pipeline positions a [`api::View`] on an account's transaction table, reads the account
//! type, extracts the raw rows, and builds one [`Transaction`] per row. See
//! [`scrape_transactions`].

pub mod api;
pub mod args;
pub mod builders;
pub mod commands;
mod config;
mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod session;
mod utils;


pub use config::Config;
pub use error::{Error, NormalizationError, Result};
pub use extract::{Variant, LAYOUT_VERSION};
pub use model::{
    Account, AccountCategory, ChequeTransaction, CreditTransaction, Details, PendingTransaction,
    SavingsTransaction, Transaction, TransactionDetails, TransactionStatus, TransactionsResult,
};
pub use normalize::{map_status_label, parse_amount, parse_date, Normalizer};
pub use pipeline::{route, scrape_transactions, TransactionMode};
pub use session::{Scraper, ScraperCache};
