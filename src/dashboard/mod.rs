//! Dashboard module
//!
//! Provides the sale statistics, the price range and category charts, and the
//! combined view that bundles them with the product listing.

mod aggregation;
mod charts;
mod combined;
mod handlers;

pub use aggregation::{SaleStatistics, compute_statistics};
pub use charts::{
    CategoryBreakdown, CategoryCount, PRICE_RANGE_LABELS, PriceHistogram, build_price_histogram,
    count_by_category,
};
pub use combined::{CombinedView, DEFAULT_COMBINED_MONTH, compose_combined_view};
pub use handlers::{get_bar_chart, get_combined_data, get_pie_chart, get_statistics};
