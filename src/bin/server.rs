use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{
    AppState, CachedTransactionSource, DEFAULT_UPSTREAM_URL, HttpTransactionSource,
    PaginationConfig, TransactionSource, build_router, graceful_shutdown,
};

/// The JSON API server for the sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// The URL of the JSON array of sale transactions.
    #[arg(long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,

    /// How long to wait for the upstream data source before giving up.
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    upstream_timeout_secs: u64,

    /// How long to reuse a fetched snapshot for. Zero fetches on every request.
    #[arg(long, env = "CACHE_TTL_SECS", default_value_t = 0)]
    cache_ttl_secs: u64,

    /// The number of products per page when `perPage` is not given.
    #[arg(long, env = "DEFAULT_PAGE_SIZE", default_value_t = 10)]
    default_page_size: usize,

    /// The largest `perPage` a client may ask for. Unlimited when not set.
    #[arg(long, env = "MAX_PAGE_SIZE")]
    max_page_size: Option<usize>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);

    let http_source = HttpTransactionSource::new(
        &args.upstream_url,
        Duration::from_secs(args.upstream_timeout_secs),
    )
    .expect("Could not create the HTTP client for the upstream data source.");

    let transaction_source: Arc<dyn TransactionSource> = if args.cache_ttl_secs > 0 {
        let ttl = Duration::from_secs(args.cache_ttl_secs);
        tracing::info!("Caching upstream snapshots for {ttl:?}");
        Arc::new(CachedTransactionSource::new(http_source, ttl))
    } else {
        Arc::new(http_source)
    };

    let default_page_size = args.default_page_size.max(1);
    let pagination_config = PaginationConfig {
        default_page_size,
        max_page_size: args
            .max_page_size
            .map(|max_page_size| max_page_size.max(default_page_size)),
        ..Default::default()
    };

    let app_state = AppState::new(transaction_source, pagination_config);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    tracing::info!(
        "HTTP server listening on {addr}, reading transactions from {}",
        args.upstream_url
    );
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
