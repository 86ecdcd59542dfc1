//! Types that represent the extracted data, such as `Transaction` and `AccountCategory`.
mod account;
mod transaction;

pub use account::{Account, AccountCategory};
pub use transaction::{
    ChequeTransaction, CreditTransaction, Details, PendingTransaction, SavingsTransaction,
    Transaction, TransactionDetails, TransactionStatus, TransactionsResult,
};
