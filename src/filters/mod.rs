//! Filters that narrow a snapshot down before it is paged or aggregated.
//!
//! Every filter keeps the order of its input and returns a new list, so
//! applying the same filter to its own output changes nothing.

mod month;
mod search;

pub use month::{ALL_MONTHS, MonthSelector, filter_by_month};
pub use search::{SearchQuery, filter_by_search};
