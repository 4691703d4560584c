use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, Json},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::viewer::ViewerInputArgs;
use crate::cli::ServeArgs;
use crate::viewer::html::VERSION;

/// Shared application state
pub struct AppState {
    /// Fully assembled viewer page
    pub html: String,
}

/// Run the viewer server
///
/// The page is assembled once up front, so figure or metadata errors are
/// reported before anything binds.
///
/// # Errors
///
/// Returns an error if the viewer page cannot be built, the tokio runtime
/// cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let html = build_page(&args.input)?;

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, html).await })
}

fn build_page(input: &ViewerInputArgs) -> anyhow::Result<String> {
    let (assets, svg, features, links) = input.load()?;
    Ok(assets.assemble(&svg, &features, &links)?)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(html: String) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { html });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("no-referrer"),
                ))
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(100))
                // The viewer only serves GETs; refuse request bodies
                .layer(DefaultBodyLimit::max(1024)),
        );

    Ok(app)
}

async fn run_server(args: ServeArgs, html: String) -> anyhow::Result<()> {
    let app = create_router(html)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Serving genome viewer at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Viewer page handler
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.html.clone())
}

/// Liveness probe
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": VERSION,
    }))
}
