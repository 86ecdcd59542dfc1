//! Reads the rows of the transaction table out of a positioned view.
//!
//! Cells are addressed by position, not by header. The position of each column for each table
//! shape is fixed by the layout below, which is versioned by `LAYOUT_VERSION`. A config file that
//! was written against a different layout version is refused at load time.

use crate::api::{RowQuery, View};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// The version of the positional column contract described by [`Variant::columns`].
pub const LAYOUT_VERSION: u32 = 1;

/// One of the four table shapes that the transaction widget renders.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Cheque,
    Savings,
    Credit,
    Pending,
}

serde_plain::derive_display_from_serialize!(Variant);
serde_plain::derive_fromstr_from_deserialize!(Variant);

/// A column of the transaction table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    Description,
    Reference,
    ServiceFee,
    Amount,
    Balance,
    CardNumber,
}

serde_plain::derive_display_from_serialize!(Column);

const CHEQUE_COLUMNS: &[Column] = &[
    Column::Date,
    Column::Description,
    Column::Reference,
    Column::ServiceFee,
    Column::Amount,
    Column::Balance,
];

const SAVINGS_COLUMNS: &[Column] = &[
    Column::Date,
    Column::Description,
    Column::Amount,
    Column::Balance,
];

const CREDIT_COLUMNS: &[Column] = &[Column::Date, Column::Description, Column::Amount];

const PENDING_COLUMNS: &[Column] = &[
    Column::Date,
    Column::CardNumber,
    Column::Description,
    Column::Amount,
];

impl Variant {
    /// The columns of this table shape, in on-screen order.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Variant::Cheque => CHEQUE_COLUMNS,
            Variant::Savings => SAVINGS_COLUMNS,
            Variant::Credit => CREDIT_COLUMNS,
            Variant::Pending => PENDING_COLUMNS,
        }
    }

    /// The minimum number of cells a row of this shape must have.
    pub fn arity(&self) -> usize {
        self.columns().len()
    }

    /// The position of `column` in this table shape, if the shape has that column.
    pub fn position(&self, column: Column) -> Option<usize> {
        self.columns().iter().position(|c| *c == column)
    }
}

/// The raw cell text of one table row. Cells past the variant's arity (for example the legacy
/// status cell) are kept but never read.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RawRow {
    variant: Variant,
    cells: Vec<String>,
}

impl RawRow {
    /// Wraps `cells` as a row of `variant`. `index` is the row's position in the table and is only
    /// used for the error.
    pub fn new(variant: Variant, index: usize, cells: Vec<String>) -> Result<Self> {
        if cells.len() < variant.arity() {
            return Err(Error::Layout {
                row: index,
                variant,
                expected: variant.arity(),
                found: cells.len(),
            });
        }
        Ok(Self { variant, cells })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The text of `column`. Columns that this row's variant does not have read as `""`.
    pub fn cell(&self, column: Column) -> &str {
        self.variant
            .position(column)
            .and_then(|ix| self.cells.get(ix))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Queries the positioned view for its table rows and returns them, in on-screen order, as rows of
/// `variant`. An empty table is an empty `Vec`.
pub async fn extract_rows<V>(view: &mut V, query: &RowQuery, variant: Variant) -> Result<Vec<RawRow>>
where
    V: View + Send + ?Sized,
{
    trace!("extract_rows for {variant} with {query:?}");
    let table = view.query_rows(query).await.map_err(Error::View)?;
    debug!("Extracted {} {variant} rows", table.len());
    table
        .into_iter()
        .enumerate()
        .map(|(ix, cells)| RawRow::new(variant, ix, cells))
        .collect()
}
