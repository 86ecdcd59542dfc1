//! Turns raw rows into typed transactions, one builder per table shape.
//!
//! The status of every transaction is fixed by the table it came from: posted tables stamp
//! `Successful` and the pending table stamps `Pending`. Whatever a status cell says is not read, so
//! a declined or reversed row in a posted table still comes out as `Successful`.

use crate::error::{Error, NormalizationError, Result};
use crate::extract::{Column, RawRow, Variant};
use crate::model::{
    ChequeTransaction, CreditTransaction, Details, PendingTransaction, SavingsTransaction,
    Transaction, TransactionStatus,
};
use crate::normalize::Normalizer;

/// The status stamped on rows of posted tables.
pub const POSTED_STATUS: TransactionStatus = TransactionStatus::Successful;

/// The status stamped on rows of the pending table.
pub const PENDING_STATUS: TransactionStatus = TransactionStatus::Pending;

impl Variant {
    /// The status every transaction built from this table shape receives.
    pub fn fixed_status(&self) -> TransactionStatus {
        match self {
            Variant::Cheque | Variant::Savings | Variant::Credit => POSTED_STATUS,
            Variant::Pending => PENDING_STATUS,
        }
    }
}

type Built<T> = std::result::Result<T, NormalizationError>;

fn details(row: &RawRow, normalizer: &Normalizer) -> Built<Details> {
    Ok(Details {
        date: normalizer.parse_date(row.cell(Column::Date))?,
        description: row.cell(Column::Description).trim().to_string(),
        amount: normalizer.parse_amount(row.cell(Column::Amount))?,
        status: row.variant().fixed_status(),
    })
}

pub fn build_cheque(row: &RawRow, normalizer: &Normalizer) -> Built<ChequeTransaction> {
    Ok(ChequeTransaction {
        details: details(row, normalizer)?,
        reference: row.cell(Column::Reference).trim().to_string(),
        service_fee: normalizer.parse_amount(row.cell(Column::ServiceFee))?,
        balance: normalizer.parse_amount(row.cell(Column::Balance))?,
    })
}

pub fn build_savings(row: &RawRow, normalizer: &Normalizer) -> Built<SavingsTransaction> {
    Ok(SavingsTransaction {
        details: details(row, normalizer)?,
        balance: normalizer.parse_amount(row.cell(Column::Balance))?,
    })
}

pub fn build_credit(row: &RawRow, normalizer: &Normalizer) -> Built<CreditTransaction> {
    Ok(CreditTransaction {
        details: details(row, normalizer)?,
    })
}

/// An empty card number cell means the card is not known.
pub fn build_pending(row: &RawRow, normalizer: &Normalizer) -> Built<PendingTransaction> {
    let card_number = row.cell(Column::CardNumber).trim();
    Ok(PendingTransaction {
        details: details(row, normalizer)?,
        card_number: (!card_number.is_empty()).then(|| card_number.to_string()),
    })
}

/// Builds the transaction for `row` with the builder that matches its variant.
pub fn build(row: &RawRow, normalizer: &Normalizer) -> Built<Transaction> {
    Ok(match row.variant() {
        Variant::Cheque => Transaction::Cheque(build_cheque(row, normalizer)?),
        Variant::Savings => Transaction::Savings(build_savings(row, normalizer)?),
        Variant::Credit => Transaction::Credit(build_credit(row, normalizer)?),
        Variant::Pending => Transaction::Pending(build_pending(row, normalizer)?),
    })
}

/// Builds every row, in order. The first row that fails to normalize fails the whole batch.
pub fn build_all(rows: &[RawRow], normalizer: &Normalizer) -> Result<Vec<Transaction>> {
    rows.iter()
        .enumerate()
        .map(|(ix, row)| {
            build(row, normalizer).map_err(|source| Error::Normalization {
                row: ix,
                variant: row.variant(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionDetails;
    use crate::test::row;
    use chrono::NaiveDate;

    fn raw(variant: Variant, cells: &[&str]) -> RawRow {
        RawRow::new(variant, 0, row(cells)).unwrap()
    }

    fn feb_1() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()
    }

    #[test]
    fn test_build_cheque() {
        let row = raw(
            Variant::Cheque,
            &[
                "01 Feb 2020",
                "Grocery Store",
                "REF123",
                "R 2,50",
                "R 150,00",
                "R 4 200,00",
                "Successful",
            ],
        );
        let t = build_cheque(&row, &Normalizer::default()).unwrap();
        assert_eq!(t.date(), feb_1());
        assert_eq!(t.description(), "Grocery Store");
        assert_eq!(t.reference(), "REF123");
        assert_eq!(t.service_fee(), 250);
        assert_eq!(t.amount(), 15000);
        assert_eq!(t.balance(), 420000);
        assert_eq!(t.status(), TransactionStatus::Successful);
    }

    #[test]
    fn test_build_savings() {
        let row = raw(
            Variant::Savings,
            &["01 Feb 2020", "Interest", "R 12,34", "R 10 012,34"],
        );
        let t = build_savings(&row, &Normalizer::default()).unwrap();
        assert_eq!(t.date(), feb_1());
        assert_eq!(t.description(), "Interest");
        assert_eq!(t.amount(), 1234);
        assert_eq!(t.balance(), 1001234);
        assert_eq!(t.status(), TransactionStatus::Successful);
    }

    #[test]
    fn test_build_credit() {
        let row = raw(Variant::Credit, &["01 Feb 2020", " Online Store ", "-R 99,99"]);
        let t = build_credit(&row, &Normalizer::default()).unwrap();
        assert_eq!(t.description(), "Online Store");
        assert_eq!(t.amount(), -9999);
        assert_eq!(t.status(), TransactionStatus::Successful);
    }

    #[test]
    fn test_build_pending() {
        let row = raw(
            Variant::Pending,
            &["01 Feb 2020", "4901********1234", "Fuel", "R 450,00"],
        );
        let t = build_pending(&row, &Normalizer::default()).unwrap();
        assert_eq!(t.card_number(), Some("4901********1234"));
        assert_eq!(t.amount(), 45000);
        assert_eq!(t.status(), TransactionStatus::Pending);
    }

    #[test]
    fn test_build_pending_without_card_number() {
        let row = raw(Variant::Pending, &["01 Feb 2020", "  ", "Fuel", "R 450,00"]);
        let t = build_pending(&row, &Normalizer::default()).unwrap();
        assert_eq!(t.card_number(), None);
    }

    /// The status cell is not read. A declined row in a posted table is reported as successful.
    #[test]
    fn test_status_cell_is_overridden() {
        let row = raw(
            Variant::Cheque,
            &[
                "01 Feb 2020",
                "Card purchase",
                "",
                "R 0,00",
                "-R 10,00",
                "R 90,00",
                "Declined",
            ],
        );
        let t = build(&row, &Normalizer::default()).unwrap();
        assert_eq!(t.status(), TransactionStatus::Successful);

        let row = raw(
            Variant::Pending,
            &["01 Feb 2020", "", "Fuel", "R 1,00", "Successful"],
        );
        let t = build(&row, &Normalizer::default()).unwrap();
        assert_eq!(t.status(), TransactionStatus::Pending);
    }

    #[test]
    fn test_build_dispatches_on_variant() {
        let n = Normalizer::default();
        let t = build(&raw(Variant::Credit, &["01 Feb 2020", "x", "R 1,00"]), &n).unwrap();
        assert!(matches!(t, Transaction::Credit(_)));
        let t = build(
            &raw(Variant::Savings, &["01 Feb 2020", "x", "R 1,00", "R 2,00"]),
            &n,
        )
        .unwrap();
        assert!(matches!(t, Transaction::Savings(_)));
    }

    #[test]
    fn test_build_all_fails_whole_batch() {
        let rows = vec![
            raw(Variant::Credit, &["01 Feb 2020", "ok", "R 1,00"]),
            raw(Variant::Credit, &["02 Feb 2020", "bad", "abc"]),
            raw(Variant::Credit, &["03 Feb 2020", "ok", "R 3,00"]),
        ];
        let err = build_all(&rows, &Normalizer::default()).unwrap_err();
        match err {
            Error::Normalization {
                row,
                variant,
                source,
            } => {
                assert_eq!(row, 1);
                assert_eq!(variant, Variant::Credit);
                assert!(matches!(source, NormalizationError::InvalidAmount { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_build_all_bad_date() {
        let rows = vec![raw(Variant::Credit, &["2020-02-01", "x", "R 1,00"])];
        let err = build_all(&rows, &Normalizer::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Normalization {
                source: NormalizationError::InvalidDate { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_build_all_one_record_per_row() {
        let rows: Vec<RawRow> = (1..=5)
            .map(|d| {
                let date = format!("0{d} Feb 2020");
                RawRow::new(
                    Variant::Savings,
                    0,
                    row(&[date.as_str(), "x", "R 1,00", "R 2,00"]),
                )
                .unwrap()
            })
            .collect();
        let built = build_all(&rows, &Normalizer::default()).unwrap();
        assert_eq!(built.len(), rows.len());
    }
}
