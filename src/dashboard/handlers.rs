//! Dashboard HTTP handlers.
//!
//! Each handler validates its query parameters before fetching a snapshot, so
//! a bad request never costs an upstream call.

use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{SaleStatistics, compute_statistics},
        charts::{CategoryBreakdown, PriceHistogram, build_price_histogram, count_by_category},
        combined::{CombinedView, DEFAULT_COMBINED_MONTH, compose_combined_view},
    },
    filters::{MonthSelector, SearchQuery, filter_by_month},
    pagination::PageRequest,
};

/// The query parameters for the views that only take a month.
#[derive(Debug, Default, Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(Error))]
pub struct MonthQuery {
    /// The month number, or "00" for every month.
    pub month: Option<String>,
}

/// The query parameters for the combined view.
#[derive(Debug, Default, Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(Error))]
#[serde(rename_all = "camelCase")]
pub struct CombinedQuery {
    /// The month number, or "00" for every month. Defaults to
    /// [DEFAULT_COMBINED_MONTH].
    pub month: Option<String>,
    /// Text to look for in the product listing.
    pub search: Option<String>,
    /// The 1-based page number of the product listing.
    pub page: Option<String>,
    /// The number of products per page.
    pub per_page: Option<String>,
}

/// Get the total sale amount and the sold and unsold item counts for a month.
///
/// The `month` query parameter is required.
pub async fn get_statistics(
    State(state): State<AppState>,
    query: MonthQuery,
) -> Result<Json<SaleStatistics>, Error> {
    let month = MonthSelector::require(query.month.as_deref())?;
    let snapshot = state.transaction_source.fetch().await?;
    let transactions = filter_by_month(&snapshot, month);

    Ok(Json(compute_statistics(&transactions)))
}

/// Get the number of items in each price range for a month.
///
/// The `month` query parameter is required.
pub async fn get_bar_chart(
    State(state): State<AppState>,
    query: MonthQuery,
) -> Result<Json<PriceHistogram>, Error> {
    let month = MonthSelector::require(query.month.as_deref())?;
    let snapshot = state.transaction_source.fetch().await?;
    let transactions = filter_by_month(&snapshot, month);

    Ok(Json(build_price_histogram(&transactions)))
}

/// Get the number of items in each category, optionally for a single month.
pub async fn get_pie_chart(
    State(state): State<AppState>,
    query: MonthQuery,
) -> Result<Json<CategoryBreakdown>, Error> {
    let month = MonthSelector::from_query(query.month.as_deref())?;
    let snapshot = state.transaction_source.fetch().await?;
    let transactions = filter_by_month(&snapshot, month);

    Ok(Json(count_by_category(&transactions)))
}

/// Get the product listing, statistics, bar chart and pie chart for a month in
/// one response.
///
/// When no month is given, [DEFAULT_COMBINED_MONTH] (March) is used.
pub async fn get_combined_data(
    State(state): State<AppState>,
    query: CombinedQuery,
) -> Result<Json<CombinedView>, Error> {
    let month = match query.month.as_deref().map(str::trim) {
        None | Some("") => MonthSelector::Month(DEFAULT_COMBINED_MONTH),
        Some(month) => MonthSelector::require(Some(month))?,
    };
    let search = SearchQuery::new(query.search.as_deref());
    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.per_page.as_deref(),
        &state.pagination_config,
    );

    let view =
        compose_combined_view(state.transaction_source.as_ref(), month, search, page).await?;

    Ok(Json(view))
}
