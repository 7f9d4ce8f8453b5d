//! The API endpoints URIs.

/// The route for a page of products, filterable by month and search text.
pub const PRODUCTS: &str = "/api/products";
/// The route for the sale statistics of a month.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price range chart of a month.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the category chart.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the products, statistics and charts of a month in one response.
pub const COMBINED_DATA: &str = "/api/combined-data";
/// The route for checking whether the server is up.
pub const HEALTH: &str = "/api/health";
