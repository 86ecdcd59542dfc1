//! Error types for the extraction pipeline.

use crate::extract::Variant;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can fail a call to the transaction pipeline. There is no partial-success mode:
/// any of these aborts the whole call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The navigation collaborator could not position the view. Propagated unchanged.
    #[error("Unable to navigate to the requested section: {0:#}")]
    Navigation(#[source] anyhow::Error),

    /// The view could not answer an in-page query or label lookup.
    #[error("Unable to read from the view: {0:#}")]
    View(#[source] anyhow::Error),

    /// A table row did not have as many cells as the column layout for its variant requires.
    #[error("Row {row} of the {variant} table has {found} cells but at least {expected} are required")]
    Layout {
        row: usize,
        variant: Variant,
        expected: usize,
        found: usize,
    },

    /// A cell could not be converted into its typed value.
    #[error("Row {row} of the {variant} table could not be normalized: {source}")]
    Normalization {
        row: usize,
        variant: Variant,
        #[source]
        source: NormalizationError,
    },
}

/// Raw text that does not have the expected numeric, date or status shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("'{text}' is not a valid amount")]
    InvalidAmount { text: String },

    #[error("'{text}' does not fit in a 64-bit minor unit amount")]
    AmountOutOfRange { text: String },

    #[error("'{text}' does not match the date format '{format}': {source}")]
    InvalidDate {
        text: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("'{text}' has the year {year}, which is not four digits")]
    YearOutOfRange { text: String, year: i32 },

    #[error("'{label}' is not a known transaction status")]
    UnknownStatus { label: String },
}
