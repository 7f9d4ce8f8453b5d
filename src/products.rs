//! The paged, filterable product listing.

use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    filters::{MonthSelector, SearchQuery, filter_by_month, filter_by_search},
    pagination::{Page, PageRequest, paginate},
    transaction::Transaction,
};

/// The query parameters for the product listing.
///
/// Numbers are kept as text so that malformed values can fall back to their
/// defaults instead of rejecting the request. A query string that cannot be
/// decoded at all is rejected with [Error::InvalidQuery].
#[derive(Debug, Default, Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(Error))]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    /// The month number to list, or "00" for every month.
    pub month: Option<String>,
    /// Text to look for in product titles and prices.
    pub search: Option<String>,
    /// The 1-based page number.
    pub page: Option<String>,
    /// The number of products per page.
    pub per_page: Option<String>,
}

/// Search `transactions` and return the requested page of the matches.
pub(crate) fn search_and_paginate(
    transactions: &[Transaction],
    search: Option<&SearchQuery>,
    page: PageRequest,
) -> Page<Transaction> {
    let matches = filter_by_search(transactions, search);
    paginate(&matches, page)
}

/// Filter `transactions` by month and then by search text, and return the
/// requested page.
pub fn list_products(
    transactions: &[Transaction],
    month: MonthSelector,
    search: Option<&SearchQuery>,
    page: PageRequest,
) -> Page<Transaction> {
    let in_month = filter_by_month(transactions, month);
    search_and_paginate(&in_month, search, page)
}

/// Get a page of products, optionally filtered by month and search text.
pub async fn get_products(
    State(state): State<AppState>,
    query: ProductsQuery,
) -> Result<Json<Page<Transaction>>, Error> {
    let month = MonthSelector::from_query(query.month.as_deref())?;
    let search = SearchQuery::new(query.search.as_deref());
    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.per_page.as_deref(),
        &state.pagination_config,
    );

    let snapshot = state.transaction_source.fetch().await?;

    Ok(Json(list_products(&snapshot, month, search.as_ref(), page)))
}
