//! Preview server rendering pages on demand

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::ContentCache;
use crate::pages::{PageResponse, Pages};
use crate::Site;

/// Server state
struct ServerState {
    pages: Pages,
    cache: ContentCache,
    static_dir: PathBuf,
}

/// Build the router for a site
pub fn router(site: &Site) -> Result<Router> {
    let state = Arc::new(ServerState {
        pages: Pages::new(&site.config)?,
        cache: ContentCache::new(site.post_index()),
        static_dir: site.static_dir.clone(),
    });

    Ok(Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_handler))
        .route("/blog/", get(blog_handler))
        .route("/blog/:slug", get(post_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the preview server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a page renderer off the async runtime; file reads and highlighting
/// are blocking work
async fn render<F>(state: Arc<ServerState>, f: F) -> Response
where
    F: FnOnce(&ServerState) -> Result<Response> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || f(&state)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
        Err(e) => {
            tracing::error!("Render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    render(state, |s| Ok(Html(s.pages.home()?).into_response())).await
}

async fn blog_handler(State(state): State<Arc<ServerState>>) -> Response {
    render(state, |s| Ok(Html(s.pages.blog_list(&s.cache)?).into_response())).await
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    render(state, move |s| {
        Ok(match s.pages.post_detail(&s.cache, &slug)? {
            PageResponse::Ok(html) => Html(html).into_response(),
            PageResponse::NotFound(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        })
    })
    .await
}

async fn sitemap_handler(State(state): State<Arc<ServerState>>) -> Response {
    render(state, |s| {
        let xml = s.pages.sitemap(&s.cache, chrono::Utc::now())?;
        Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
    })
    .await
}

/// Static files, otherwise the not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => {
            render(state, |s| {
                Ok((StatusCode::NOT_FOUND, Html(s.pages.not_found()?)).into_response())
            })
            .await
        }
        Err(e) => {
            tracing::error!("Failed to serve static file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
