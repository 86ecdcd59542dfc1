//! Converts the text of table cells into typed values.
//!
//! Amounts arrive as display strings like `R 4 200,00` or `-R1,250.50` and leave as signed integer
//! minor units (cents). Dates arrive as `01 Feb 2020`. The conversions never go through floating
//! point, and anything that does not fit the expected shape is an error rather than a default.

use crate::error::NormalizationError;
use crate::model::TransactionStatus;
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// The currency symbol shown in front of amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R";

/// Tokens that appear in amount cells but are not part of the number. `eB` marks eBucks amounts.
pub const DEFAULT_ARTIFACT_TOKENS: &[&str] = &["eB"];

/// Day, abbreviated month name, four digit year, e.g. `01 Feb 2020`.
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";

/// Holds the formatting conventions of the page and applies them to cell text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Normalizer {
    currency_symbol: String,
    artifact_tokens: Vec<String>,
    date_format: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            artifact_tokens: DEFAULT_ARTIFACT_TOKENS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Normalizer {
    pub fn new(
        currency_symbol: impl Into<String>,
        artifact_tokens: impl IntoIterator<Item = impl Into<String>>,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            artifact_tokens: artifact_tokens.into_iter().map(Into::into).collect(),
            date_format: date_format.into(),
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Parses a displayed amount into signed minor units.
    ///
    /// Whitespace (including non-breaking spaces), artifact tokens and the currency symbol are
    /// removed, separators are resolved, and the value is multiplied by 100 and rounded half away
    /// from zero.
    ///
    /// ```
    /// # use fnb_scrape::Normalizer;
    /// let n = Normalizer::default();
    /// assert_eq!(n.parse_amount("R 4 200,00").unwrap(), 420000);
    /// assert_eq!(n.parse_amount("-R1,250.50").unwrap(), -125050);
    /// assert!(n.parse_amount("abc").is_err());
    /// ```
    pub fn parse_amount(&self, text: &str) -> Result<i64, NormalizationError> {
        let mut cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        for token in self.artifact_tokens.iter().filter(|t| !t.is_empty()) {
            cleaned = cleaned.replace(token.as_str(), "");
        }
        if !self.currency_symbol.is_empty() {
            cleaned = cleaned.replace(self.currency_symbol.as_str(), "");
        }

        let invalid = || NormalizationError::InvalidAmount {
            text: text.to_string(),
        };
        let numeric = resolve_separators(&cleaned);
        if !is_plain_decimal(&numeric) {
            return Err(invalid());
        }
        let value = Decimal::from_str(&numeric).map_err(|_| invalid())?;

        let out_of_range = || NormalizationError::AmountOutOfRange {
            text: text.to_string(),
        };
        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(out_of_range)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or_else(out_of_range)
    }

    /// Parses a displayed date using this normalizer's date format.
    pub fn parse_date(&self, text: &str) -> Result<NaiveDate, NormalizationError> {
        parse_date(text, &self.date_format)
    }
}

/// Parses an amount with the default conventions. See [`Normalizer::parse_amount`].
pub fn parse_amount(text: &str) -> Result<i64, NormalizationError> {
    Normalizer::default().parse_amount(text)
}

/// Parses `text` with exactly one chrono `format`. No alternate formats are tried.
///
/// chrono's `%Y` accepts any number of digits, so years outside 1000..=9999 are refused here to
/// keep `01 Feb 20` from reading as the year 20.
pub fn parse_date(text: &str, format: &str) -> Result<NaiveDate, NormalizationError> {
    let date = NaiveDate::parse_from_str(text.trim(), format).map_err(|source| {
        NormalizationError::InvalidDate {
            text: text.to_string(),
            format: format.to_string(),
            source,
        }
    })?;
    if !(1000..=9999).contains(&date.year()) {
        return Err(NormalizationError::YearOutOfRange {
            text: text.to_string(),
            year: date.year(),
        });
    }
    Ok(date)
}

/// Maps a status label to its status. Only exact labels are accepted, and `Unknown` is never a
/// label.
pub fn map_status_label(label: &str) -> Result<TransactionStatus, NormalizationError> {
    match TransactionStatus::from_str(label.trim()) {
        Ok(TransactionStatus::Unknown) | Err(_) => Err(NormalizationError::UnknownStatus {
            label: label.to_string(),
        }),
        Ok(status) => Ok(status),
    }
}

/// An optional sign, then digits with at most one `.`. Exponents, underscores and anything else
/// that `Decimal::from_str` would tolerate are refused.
fn is_plain_decimal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}

/// Rewrites `s` so that the only separator left is a `.` decimal point.
///
/// - both `,` and `.` present: the one that occurs last is the decimal point
/// - a single `,` followed by one or two characters: decimal point
/// - otherwise `,` and repeated `.` are thousands separators
fn resolve_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(comma), None) => {
            let decimals = s.len() - comma - 1;
            if s.matches(',').count() == 1 && (1..=2).contains(&decimals) {
                s.replacen(',', ".", 1)
            } else {
                s.replace(',', "")
            }
        }
        (None, Some(_)) if s.matches('.').count() > 1 => s.replace('.', ""),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_comma_decimal() {
        assert_eq!(parse_amount("R 2,50").unwrap(), 250);
        assert_eq!(parse_amount("R 150,00").unwrap(), 15000);
        assert_eq!(parse_amount("R 4 200,00").unwrap(), 420000);
    }

    #[test]
    fn test_parse_amount_dot_decimal_with_comma_thousands() {
        assert_eq!(parse_amount("R1,250.50").unwrap(), 125050);
        assert_eq!(parse_amount("1,234,567.89").unwrap(), 123456789);
    }

    #[test]
    fn test_parse_amount_dot_thousands_with_comma_decimal() {
        assert_eq!(parse_amount("R 1.234,56").unwrap(), 123456);
    }

    #[test]
    fn test_parse_amount_comma_thousands_only() {
        assert_eq!(parse_amount("R 1,000").unwrap(), 100000);
        assert_eq!(parse_amount("1,000,000").unwrap(), 100000000);
    }

    #[test]
    fn test_parse_amount_ignores_incidental_whitespace() {
        let expected = 420000;
        assert_eq!(parse_amount("R4200,00").unwrap(), expected);
        assert_eq!(parse_amount("  R 4 200,00  ").unwrap(), expected);
        assert_eq!(parse_amount("R\u{a0}4\u{a0}200,00").unwrap(), expected);
        assert_eq!(parse_amount("4 200,00").unwrap(), expected);
    }

    #[test]
    fn test_parse_amount_negative() {
        assert_eq!(parse_amount("-R 150,00").unwrap(), -15000);
        assert_eq!(parse_amount("R -150,00").unwrap(), -15000);
        assert_eq!(parse_amount("-150.00").unwrap(), -15000);
    }

    #[test]
    fn test_parse_amount_strips_artifact_token() {
        assert_eq!(parse_amount("eB 12,50").unwrap(), 1250);
        assert_eq!(parse_amount("R 12,50eB").unwrap(), 1250);
    }

    #[test]
    fn test_parse_amount_rounds_to_nearest_minor_unit() {
        assert_eq!(parse_amount("1.005").unwrap(), 101);
        assert_eq!(parse_amount("1.004").unwrap(), 100);
        assert_eq!(parse_amount("-1.005").unwrap(), -101);
        assert_eq!(parse_amount("R 7").unwrap(), 700);
    }

    #[test]
    fn test_parse_amount_invalid() {
        for text in [
            "abc", "", "R", "R 1,2,3x", "--5", "12.3.4x", "1e5", "1_000", "R 1E2", "+-5", ".",
        ] {
            let err = parse_amount(text).unwrap_err();
            assert!(
                matches!(err, NormalizationError::InvalidAmount { .. }),
                "{text}: {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_amount_out_of_range() {
        let err = parse_amount("99999999999999999999").unwrap_err();
        assert!(matches!(err, NormalizationError::AmountOutOfRange { .. }));
    }

    #[test]
    fn test_parse_amount_custom_symbol() {
        let n = Normalizer::new("$", Vec::<String>::new(), DEFAULT_DATE_FORMAT);
        assert_eq!(n.parse_amount("-$60,000.00").unwrap(), -6000000);
        assert!(n.parse_amount("R 5,00").is_err());
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        assert_eq!(parse_date("01 Feb 2020", DEFAULT_DATE_FORMAT).unwrap(), expected);
        assert_eq!(parse_date(" 1 Feb 2020 ", DEFAULT_DATE_FORMAT).unwrap(), expected);
        assert_eq!(
            Normalizer::default().parse_date("01 Feb 2020").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_date_does_not_infer_formats() {
        for text in [
            "2020-02-01",
            "01/02/2020",
            "Feb 01 2020",
            "",
        ] {
            let err = parse_date(text, DEFAULT_DATE_FORMAT).unwrap_err();
            assert!(
                matches!(err, NormalizationError::InvalidDate { .. }),
                "{text}"
            );
        }
    }

    #[test]
    fn test_parse_date_requires_four_digit_year() {
        for (text, year) in [("01 Feb 20", 20), ("01 Feb 020", 20), ("01 Feb 999", 999)] {
            let err = parse_date(text, DEFAULT_DATE_FORMAT).unwrap_err();
            assert_eq!(
                err,
                NormalizationError::YearOutOfRange {
                    text: text.to_string(),
                    year
                }
            );
        }
    }

    #[test]
    fn test_parse_date_rejects_impossible_dates() {
        assert!(parse_date("31 Feb 2020", DEFAULT_DATE_FORMAT).is_err());
    }

    #[test]
    fn test_map_status_label() {
        assert_eq!(
            map_status_label("Successful").unwrap(),
            TransactionStatus::Successful
        );
        assert_eq!(
            map_status_label("Pending").unwrap(),
            TransactionStatus::Pending
        );
        assert_eq!(
            map_status_label("Declined").unwrap(),
            TransactionStatus::Declined
        );
    }

    #[test]
    fn test_map_status_label_unknown_is_error() {
        for label in ["Reversed", "successful", "Unknown", ""] {
            let err = map_status_label(label).unwrap_err();
            assert_eq!(
                err,
                NormalizationError::UnknownStatus {
                    label: label.to_string()
                }
            );
        }
    }
}
