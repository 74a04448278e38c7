//! Static file server with the asset watcher alongside.
//!
//! Files under the serve root are sent as-is, with the content type chosen
//! by extension. `.js` and `.mjs` are forced to JavaScript so browsers
//! accept the generated manifest as an ES module.

mod lifecycle;
mod path;
mod response;

pub use lifecycle::{DevServer, setup_shutdown_handler};

use crate::{config::ServeConfig, debug, log, utils::mime::MimeMap};
use anyhow::{Context, Result};
use path::Resolved;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tiny_http::{Method, Request, Server};

/// Worker threads handling requests.
const REQUEST_THREADS: usize = 4;

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server without starting the request loop.
///
/// The port is used as configured; a port already in use is an error.
pub fn bind(config: &ServeConfig) -> Result<BoundServer> {
    let requested = SocketAddr::new(config.interface, config.port);
    let server = Server::http(requested)
        .map_err(|e| anyhow::anyhow!("failed to bind http://{requested}: {e}"))?;

    // Port 0 binds an ephemeral port; report the real one
    let addr = server.server_addr().to_ip().unwrap_or(requested);

    Ok(BoundServer {
        server: Arc::new(server),
        addr,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop on its own thread.
    pub fn spawn(self, root: &Path, mime: MimeMap) -> Result<FileServer> {
        let root = root
            .canonicalize()
            .with_context(|| format!("serve root `{}` not found", root.display()))?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(REQUEST_THREADS)
            .thread_name(|i| format!("http-worker-{i}"))
            .build()
            .context("failed to create request thread pool")?;

        let addr = self.addr();
        let server = Arc::clone(&self.server);
        let serve_root = Arc::new(root);
        let mime = Arc::new(mime);
        let thread = thread::Builder::new()
            .name("http-server".into())
            .spawn(move || run_request_loop(&server, &pool, &serve_root, &mime))
            .context("failed to spawn server thread")?;

        log!("serve"; "http://{}", addr);
        Ok(FileServer {
            server: self.server,
            addr,
            thread,
        })
    }
}

/// Owned handle to a running file server.
pub struct FileServer {
    server: Arc<Server>,
    addr: SocketAddr,
    thread: JoinHandle<()>,
}

impl FileServer {
    /// Address the server actually listens on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting requests and wait for the request loop to exit.
    pub fn stop(self) {
        self.server.unblock();
        if self.thread.join().is_err() {
            log!("error"; "server thread panicked");
        }
    }
}

fn run_request_loop(
    server: &Server,
    pool: &rayon::ThreadPool,
    root: &Arc<PathBuf>,
    mime: &Arc<MimeMap>,
) {
    for request in server.incoming_requests() {
        let root = Arc::clone(root);
        let mime = Arc::clone(mime);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &root, &mime) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, root: &Path, mime: &MimeMap) -> Result<()> {
    debug!("serve"; "{} {}", request.method(), request.url());

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let url = request.url().to_string();
    let url_path = path::url_path(&url);

    match path::resolve_path(&url, root) {
        Some(Resolved::File(file)) => {
            let content_type = mime.for_path(&file);
            response::respond_file(request, &file, content_type)
        }
        Some(Resolved::Index(_) | Resolved::Directory(_)) if !url_path.ends_with('/') => {
            // Relative links inside the page need the trailing slash
            let query = &url[url_path.len()..];
            response::respond_redirect_slash(request, url_path, query)
        }
        Some(Resolved::Index(index)) => {
            let content_type = mime.for_path(&index);
            response::respond_file(request, &index, content_type)
        }
        Some(Resolved::Directory(dir)) => response::respond_listing(request, &dir, url_path),
        None => response::respond_not_found(request),
    }
}
