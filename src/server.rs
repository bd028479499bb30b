//! Request dispatch and server lifecycle.
//!
//! ## Dispatch
//!
//! Two observable request paths:
//!
//! - `GET /` and `GET /index.html`: re-list the gallery directory, paginate
//!   against the `page` query parameter, and respond with the rendered HTML
//!   document. The parameter is parsed leniently; a missing or malformed
//!   value means page 1, never an error response.
//! - Anything else: static file serving rooted at the gallery directory via
//!   tower-http's `ServeDir`, which supplies 404s for missing files,
//!   directory-traversal protection, and content-type inference by
//!   extension. Thumbnail and full-image links resolve through this path.
//!
//! ## Lifecycle
//!
//! [`GalleryServer`] owns the duplicate-start guard. However many times
//! `start_background` is invoked, at most one listening server exists per
//! process: the first call wins an atomic compare-exchange and spawns a
//! dedicated thread running the accept loop; later calls return `None`.
//! The caller's control flow is never blocked.
//!
//! A bind failure (port already taken, say) is fatal to the server thread
//! only. It is logged at error level so a missing gallery is diagnosable,
//! and the rest of the process keeps running without the feature. There is
//! no graceful drain and no stop operation; shutdown is process exit.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderValue, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::listing::list_images;
use crate::page::paginate;
use crate::render::gallery_page;

struct AppState {
    directory: PathBuf,
    page_size: usize,
}

/// Build the gallery router for a server configuration.
///
/// Exposed separately from the lifecycle so tests can drive the router as
/// a tower service without binding a socket.
pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        directory: config.directory.clone(),
        page_size: config.page_size,
    });

    Router::new()
        .route("/", get(gallery))
        .route("/index.html", get(gallery))
        .fallback_service(ServeDir::new(&config.directory))
        .with_state(state)
}

async fn gallery(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let requested = page_param(uri.query());
    let files = list_images(&state.directory);
    let view = paginate(&files, requested, state.page_size);
    let body = gallery_page(&view).into_string();

    // Content-Length is declared up front; `Html` supplies the
    // `text/html; charset=utf-8` content type.
    let length = body.len();
    let mut response = Html(body).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}

/// Extract the `page` query parameter, defaulting to 1 on absence or parse
/// failure. Malformed query strings must never fail the request.
fn page_param(query: Option<&str>) -> i64 {
    query
        .into_iter()
        .flat_map(|q| q.split('&'))
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1)
}

/// The once-guarded background gallery server.
///
/// Hosts that may re-run their initialization path (plugin reloads,
/// re-registration) can call [`start_background`](Self::start_background)
/// as often as they like; only the first call starts anything.
pub struct GalleryServer {
    config: ServerConfig,
    started: AtomicBool,
}

impl GalleryServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            started: AtomicBool::new(false),
        }
    }

    /// Start the server on a dedicated background thread.
    ///
    /// Returns the thread's join handle on the first successful call and
    /// `None` on every subsequent one. The handle joins only when the
    /// server dies (bind failure or fatal serve error); callers that want
    /// to block on the server forever can join it, hosts embedding the
    /// gallery simply drop it.
    pub fn start_background(&self) -> Option<JoinHandle<()>> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }

        let config = self.config.clone();
        match std::thread::Builder::new()
            .name("gallery-http".into())
            .spawn(move || run(config))
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("failed to spawn gallery server thread: {e}");
                None
            }
        }
    }
}

/// Thread body: own a single-threaded runtime and serve until process exit.
fn run(config: ServerConfig) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to build gallery server runtime: {e}");
            return;
        }
    };

    runtime.block_on(async {
        if let Err(e) = serve(&config).await {
            error!(
                port = config.port,
                "gallery server failed, continuing without it: {e}"
            );
        }
    });
}

/// Bind and serve in the current task, returning only on failure.
///
/// This is the foreground variant; [`GalleryServer::start_background`] is
/// the once-guarded wrapper around it.
pub async fn serve(config: &ServerConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        "serving {} at http://127.0.0.1:{}",
        config.directory.display(),
        listener.local_addr().map(|a| a.port()).unwrap_or(config.port),
    );

    axum::serve(listener, router(config)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_param_defaults_to_one() {
        assert_eq!(page_param(None), 1);
        assert_eq!(page_param(Some("")), 1);
        assert_eq!(page_param(Some("other=3")), 1);
    }

    #[test]
    fn page_param_parses_integer() {
        assert_eq!(page_param(Some("page=7")), 7);
        assert_eq!(page_param(Some("page=-2")), -2);
    }

    #[test]
    fn page_param_ignores_garbage() {
        assert_eq!(page_param(Some("page=abc")), 1);
        assert_eq!(page_param(Some("page=")), 1);
        assert_eq!(page_param(Some("page=1.5")), 1);
    }

    #[test]
    fn page_param_found_among_other_params() {
        assert_eq!(page_param(Some("a=1&page=3&b=2")), 3);
    }

    #[test]
    fn second_start_is_refused() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        let server = GalleryServer::new(config);

        let first = server.start_background();
        assert!(first.is_some());
        assert!(server.start_background().is_none());
    }
}
