use serde::{Deserialize, Serialize};

/// Identifies the account whose transactions are wanted. The navigation collaborator uses this to
/// find the account on the page.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Account {
    name: String,
    number: String,
}

impl Account {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// True if `key` is this account's number or, ignoring case, its name.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.number == key || self.name.eq_ignore_ascii_case(key)
    }
}

/// The coarse classification of an account, which decides how its transaction table is read.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AccountCategory {
    Cheque,
    Savings,
    Credit,
    #[default]
    Other,
}

serde_plain::derive_display_from_serialize!(AccountCategory);
serde_plain::derive_fromstr_from_deserialize!(AccountCategory);

impl AccountCategory {
    /// Resolves the category from the account type label shown on the page, e.g. `Cheque Account`
    /// or `Credit Card`. Labels that are not recognised resolve to `Other`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.contains("cheque") || label.contains("current") {
            AccountCategory::Cheque
        } else if label.contains("saving") {
            AccountCategory::Savings
        } else if label.contains("credit") {
            AccountCategory::Credit
        } else {
            AccountCategory::Other
        }
    }

    /// Whether a pending-transactions table exists for this category.
    pub fn has_pending(&self) -> bool {
        matches!(self, AccountCategory::Cheque | AccountCategory::Credit)
    }
}
