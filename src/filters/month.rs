//! Restricting transactions to a calendar month.

use time::Month;

use crate::{Error, transaction::Transaction};

/// The query parameter value that selects every month.
pub const ALL_MONTHS: &str = "00";

/// Which sales to keep, by the calendar month they happened in.
///
/// The year and day of a sale are ignored, so [MonthSelector::Month] with
/// March keeps sales from March of every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelector {
    /// Keep every transaction.
    #[default]
    AllMonths,
    /// Keep transactions sold in this month.
    Month(Month),
}

impl MonthSelector {
    /// Parse an optional `month` query parameter.
    ///
    /// A missing or empty parameter and [ALL_MONTHS] select every month.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `value` is not one of the above or a
    /// month number from 1 to 12, e.g. "3" or "03".
    pub fn from_query(value: Option<&str>) -> Result<Self, Error> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::AllMonths),
            Some(value) => Self::parse(value),
        }
    }

    /// Parse a `month` query parameter that must be in the request.
    ///
    /// # Errors
    /// Returns [Error::MissingParameter] if `value` is missing or empty, or
    /// [Error::InvalidMonth] if it is not a valid selector.
    pub fn require(value: Option<&str>) -> Result<Self, Error> {
        match value.map(str::trim) {
            None | Some("") => Err(Error::MissingParameter("month")),
            Some(value) => Self::parse(value),
        }
    }

    fn parse(value: &str) -> Result<Self, Error> {
        if value == ALL_MONTHS {
            return Ok(Self::AllMonths);
        }

        if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidMonth(value.to_owned()));
        }

        value
            .parse::<u8>()
            .ok()
            .and_then(|number| Month::try_from(number).ok())
            .map(Self::Month)
            .ok_or_else(|| Error::InvalidMonth(value.to_owned()))
    }

    /// Whether `transaction` was sold in the selected month.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Self::AllMonths => true,
            Self::Month(month) => transaction.date_of_sale.month() == *month,
        }
    }
}

/// Keep the transactions sold in the month chosen by `selector`, preserving order.
pub fn filter_by_month(transactions: &[Transaction], selector: MonthSelector) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| selector.matches(transaction))
        .cloned()
        .collect()
}
