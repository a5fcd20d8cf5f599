use super::load_site;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use seo_kit_core::{PageRepository, SiteConfig};
use seo_kit_generator::{
    STYLESHEET, publishable_slugs, render_home, render_not_found, render_page, render_sitemap,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Loaded once at startup and shared read-only by every request
struct PreviewState {
    site: SiteConfig,
    repo: PageRepository,
}

type AppState = Arc<PreviewState>;

/// Start preview server for local development.
///
/// The dataset is loaded once; restart the server to pick up data changes.
/// Only published slugs are routed, matching what `build` writes to disk.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    let (site, repo) = load_site(&path)?;

    println!("   ✓ Loaded: {}", site.site.name);
    println!("   ✓ Pages: {}", repo.len());
    println!("   ✓ Published: {}", repo.all_slugs().len());

    let app = router(Arc::new(PreviewState { site, repo })).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;
    info!(%addr, "preview server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/style.css", get(stylesheet_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/{slug}", get(page_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for Ctrl+C: {}", e);
    }
    println!("\n   Stopping preview server");
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_home(&state.repo, &state.site))
}

async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn sitemap_handler(State(state): State<AppState>) -> impl IntoResponse {
    let xml = render_sitemap(&state.repo, &state.site, Local::now().date_naive());
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
}

async fn page_handler(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let published = publishable_slugs(&state.repo).contains(&slug.as_str());
    let html = published
        .then(|| render_page(&state.repo, &state.site, &slug))
        .flatten();

    match html {
        Some(html) => Html(html).into_response(),
        None => not_found(&state),
    }
}

async fn not_found_handler(State(state): State<AppState>) -> Response {
    not_found(&state)
}

fn not_found(state: &PreviewState) -> Response {
    (StatusCode::NOT_FOUND, Html(render_not_found(&state.site))).into_response()
}
