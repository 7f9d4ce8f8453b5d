//! Composes the product listing, statistics and both charts for one month into
//! a single response.

use std::sync::Arc;

use serde::Serialize;
use time::Month;

use crate::{
    Error,
    dashboard::{
        aggregation::compute_statistics,
        charts::{CategoryBreakdown, PriceHistogram, build_price_histogram, count_by_category},
    },
    filters::{MonthSelector, SearchQuery, filter_by_month},
    pagination::{Page, PageRequest},
    products::search_and_paginate,
    transaction::{Transaction, TransactionSource},
};

/// The month the combined view shows when the request does not pick one.
pub const DEFAULT_COMBINED_MONTH: Month = Month::March;

/// Everything the dashboard needs for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    /// A page of the products sold in the month.
    pub products: Page<Transaction>,
    /// The sum of the prices of the month's transactions.
    pub total_sale_amount: f64,
    /// The number of the month's transactions that were sold.
    pub total_sold_items: usize,
    /// The number of the month's transactions that were not sold.
    pub total_not_sold_items: usize,
    /// The number of the month's transactions in each price range.
    pub bar_chart_data: PriceHistogram,
    /// The number of the month's transactions in each category.
    pub pie_chart_data: CategoryBreakdown,
}

/// Run `compute` on the blocking thread pool.
///
/// # Errors
/// Returns [Error::Internal] if `compute` panicked.
async fn spawn_view<T, F>(view_name: &'static str, compute: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(compute)
        .await
        .map_err(|error| Error::Internal(format!("could not compute {view_name}: {error}")))
}

/// Build the combined view for `month` from a single snapshot.
///
/// The snapshot is fetched once and filtered by month once. The product page,
/// statistics, price histogram and category breakdown are then computed
/// concurrently. If the fetch or any of the views fails, the whole view
/// fails, partial results are never returned.
///
/// # Errors
/// Returns the error from `source` if the snapshot could not be fetched, or
/// [Error::Internal] if a view could not be computed.
pub async fn compose_combined_view(
    source: &dyn TransactionSource,
    month: MonthSelector,
    search: Option<SearchQuery>,
    page: PageRequest,
) -> Result<CombinedView, Error> {
    let snapshot = source.fetch().await?;
    let in_month: Arc<[Transaction]> = filter_by_month(&snapshot, month).into();

    let products = {
        let transactions = in_month.clone();
        spawn_view("products", move || {
            search_and_paginate(&transactions, search.as_ref(), page)
        })
    };
    let statistics = {
        let transactions = in_month.clone();
        spawn_view("statistics", move || compute_statistics(&transactions))
    };
    let bar_chart_data = {
        let transactions = in_month.clone();
        spawn_view("bar chart", move || build_price_histogram(&transactions))
    };
    let pie_chart_data = {
        let transactions = in_month;
        spawn_view("pie chart", move || count_by_category(&transactions))
    };

    let (products, statistics, bar_chart_data, pie_chart_data) =
        tokio::try_join!(products, statistics, bar_chart_data, pie_chart_data)?;

    Ok(CombinedView {
        products,
        total_sale_amount: statistics.total_sale_amount,
        total_sold_items: statistics.total_sold_items,
        total_not_sold_items: statistics.total_not_sold_items,
        bar_chart_data,
        pie_chart_data,
    })
}
