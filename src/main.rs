use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use talenthub_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/postings", post(routes::posting::create_posting))
        .route(
            "/api/postings/:id",
            get(routes::posting::get_posting).put(routes::posting::update_posting),
        )
        .route(
            "/api/postings/company/:company_id",
            get(routes::posting::list_company_postings),
        )
        .route(
            "/api/postings/:id/filter",
            post(routes::posting::filter_applications),
        )
        .route(
            "/api/applications",
            post(routes::application::create_application),
        )
        .route(
            "/api/applications/posting/:posting_id",
            get(routes::application::list_posting_applications),
        )
        .route(
            "/api/applications/:id",
            put(routes::application::update_application),
        )
        .route("/api/companies/:id", get(routes::company::get_company))
        .route(
            "/api/companies/:id/employees",
            get(routes::company::list_company_employees),
        )
        .route(
            "/api/analytics/turnover/:company_id",
            get(routes::analytics::get_turnover),
        )
        .route(
            "/api/analytics/applications/options/:company_id",
            get(routes::analytics::application_options),
        )
        .route(
            "/api/analytics/applications/completed/:company_id",
            post(routes::analytics::completed_applications),
        );

    let app = api
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
