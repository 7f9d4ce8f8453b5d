//! Defines the sale transaction model and how records from the upstream data
//! source are validated into it.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize, Serializer};
use time::{
    Date, Month, OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::Error;

/// An immutable fetch result from the upstream data source.
///
/// Snapshots are shared between the views derived from them, they are never
/// modified in place.
pub type Snapshot = Arc<[Transaction]>;

/// The identifier the upstream data source gives a transaction.
///
/// The upstream data source may use either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    /// An integer ID, e.g. `1`.
    Number(i64),
    /// A string ID, e.g. `"a1b2"`.
    Text(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionId::Number(id) => write!(f, "{id}"),
            TransactionId::Text(id) => f.write_str(id),
        }
    }
}

/// A product sale record.
///
/// Serializes to the same camelCase shape that the upstream data source uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, unique within a snapshot.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// A longer description of the product.
    pub description: String,
    /// The sale price, always finite and non-negative.
    pub price: f64,
    /// A short classification, e.g. "electronics".
    pub category: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// A link to an image of the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// When the product was sold.
    pub date_of_sale: SaleDate,
}

/// The date of a sale along with the text it was parsed from.
///
/// Only the calendar month is used for filtering. The original text is kept so
/// that records are sent to clients exactly as they were received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDate {
    raw: String,
    date: Date,
}

/// e.g. "2024-03-01"
const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// e.g. "2024-03-01T10:30:00", without a UTC offset.
const ISO_DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// e.g. "3/1/2024" or "03/01/2024"
const US_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

impl SaleDate {
    /// Parse a sale date.
    ///
    /// Accepts RFC 3339 date-times, ISO 8601 dates or date-times without an
    /// offset, and US style `M/D/YYYY` dates. The calendar date of an RFC 3339
    /// date-time is the one in its own UTC offset, e.g.
    /// "2021-11-01T00:10:00+05:30" is in November.
    ///
    /// # Errors
    /// Returns a description of the problem if `raw` is not in one of the
    /// supported formats.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();

        let date = OffsetDateTime::parse(trimmed, &Rfc3339)
            .map(|date_time| date_time.date())
            .or_else(|_| {
                PrimitiveDateTime::parse(trimmed, ISO_DATE_TIME_FORMAT)
                    .map(|date_time| date_time.date())
            })
            .or_else(|_| Date::parse(trimmed, ISO_DATE_FORMAT))
            .or_else(|_| Date::parse(trimmed, US_DATE_FORMAT))
            .map_err(|_| format!("\"{raw}\" is not a supported sale date"))?;

        Ok(Self {
            raw: raw.to_owned(),
            date,
        })
    }

    /// The calendar date of the sale.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The calendar month of the sale.
    pub fn month(&self) -> Month {
        self.date.month()
    }

    /// The text the date was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Serialize for SaleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// A record as it arrives from the upstream data source, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    id: TransactionId,
    title: String,
    description: String,
    price: f64,
    category: String,
    sold: bool,
    #[serde(default)]
    image: Option<String>,
    date_of_sale: String,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = String;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        if !raw.price.is_finite() || raw.price < 0.0 {
            return Err(format!(
                "price must be a non-negative number, got {}",
                raw.price
            ));
        }

        let date_of_sale = SaleDate::parse(&raw.date_of_sale)?;

        Ok(Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            price: raw.price,
            category: raw.category,
            sold: raw.sold,
            image: raw.image,
            date_of_sale,
        })
    }
}

/// Parse and validate the body of an upstream response.
///
/// # Errors
/// Returns:
/// - [Error::UpstreamFetch] if `body` is not a JSON array.
/// - [Error::InvalidRecord] for the first element that is not a valid transaction.
pub(crate) fn parse_snapshot(body: &[u8]) -> Result<Vec<Transaction>, Error> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|error| Error::UpstreamFetch(format!("response is not a JSON array: {error}")))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<RawTransaction>(record)
                .map_err(|error| error.to_string())
                .and_then(Transaction::try_from)
                .map_err(|reason| Error::InvalidRecord { index, reason })
        })
        .collect()
}
