use crate::model::AccountCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The settlement state of a transaction.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TransactionStatus {
    Successful,
    Pending,
    Declined,
    /// Never produced from a status label (see `map_status_label`), but it round-trips through
    /// JSON like the other statuses.
    #[default]
    Unknown,
}

serde_plain::derive_display_from_serialize!(TransactionStatus);
serde_plain::derive_fromstr_from_deserialize!(TransactionStatus);

/// The fields every transaction variant carries. Amounts are in minor currency units (cents).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Details {
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) amount: i64,
    pub(crate) status: TransactionStatus,
}

impl Details {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: i64,
        status: TransactionStatus,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            status,
        }
    }
}

/// Read access to the fields shared by all transaction variants.
pub trait TransactionDetails {
    fn details(&self) -> &Details;

    fn date(&self) -> NaiveDate {
        self.details().date
    }

    fn description(&self) -> &str {
        &self.details().description
    }

    /// Signed amount in minor currency units.
    fn amount(&self) -> i64 {
        self.details().amount
    }

    fn status(&self) -> TransactionStatus {
        self.details().status
    }
}

/// A posted transaction on a cheque account.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChequeTransaction {
    #[serde(flatten)]
    pub(crate) details: Details,
    pub(crate) reference: String,
    pub(crate) service_fee: i64,
    /// Running balance after this transaction.
    pub(crate) balance: i64,
}

impl ChequeTransaction {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn service_fee(&self) -> i64 {
        self.service_fee
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }
}

/// A posted transaction on a savings account. Savings tables have no reference or service fee.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SavingsTransaction {
    #[serde(flatten)]
    pub(crate) details: Details,
    pub(crate) balance: i64,
}

impl SavingsTransaction {
    pub fn balance(&self) -> i64 {
        self.balance
    }
}

/// A posted transaction on a credit card account.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreditTransaction {
    #[serde(flatten)]
    pub(crate) details: Details,
}

/// An authorised transaction that has not yet settled.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PendingTransaction {
    #[serde(flatten)]
    pub(crate) details: Details,
    pub(crate) card_number: Option<String>,
}

impl PendingTransaction {
    pub fn card_number(&self) -> Option<&str> {
        self.card_number.as_deref()
    }
}

impl TransactionDetails for ChequeTransaction {
    fn details(&self) -> &Details {
        &self.details
    }
}

impl TransactionDetails for SavingsTransaction {
    fn details(&self) -> &Details {
        &self.details
    }
}

impl TransactionDetails for CreditTransaction {
    fn details(&self) -> &Details {
        &self.details
    }
}

impl TransactionDetails for PendingTransaction {
    fn details(&self) -> &Details {
        &self.details
    }
}

/// One transaction row, typed according to the table it was read from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transaction {
    Cheque(ChequeTransaction),
    Savings(SavingsTransaction),
    Credit(CreditTransaction),
    Pending(PendingTransaction),
}

impl TransactionDetails for Transaction {
    fn details(&self) -> &Details {
        match self {
            Transaction::Cheque(t) => t.details(),
            Transaction::Savings(t) => t.details(),
            Transaction::Credit(t) => t.details(),
            Transaction::Pending(t) => t.details(),
        }
    }
}

impl Transaction {
    /// The running balance, for the variants whose table shows one.
    pub fn balance(&self) -> Option<i64> {
        match self {
            Transaction::Cheque(t) => Some(t.balance()),
            Transaction::Savings(t) => Some(t.balance()),
            Transaction::Credit(_) | Transaction::Pending(_) => None,
        }
    }
}

/// The outcome of one pipeline call. `transactions` keeps the on-screen row order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionsResult {
    pub(crate) account_category: AccountCategory,
    pub(crate) transactions: Vec<Transaction>,
}

impl TransactionsResult {
    pub fn new(account_category: AccountCategory, transactions: Vec<Transaction>) -> Self {
        Self {
            account_category,
            transactions,
        }
    }

    /// A result with no transactions, used when the category has no table for the requested mode.
    pub fn empty(account_category: AccountCategory) -> Self {
        Self::new(account_category, Vec::new())
    }

    pub fn account_category(&self) -> AccountCategory {
        self.account_category
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
