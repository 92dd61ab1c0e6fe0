//! Shared fixtures for dev server tests: throwaway servers on ephemeral
//! ports and a temporary client bundle.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::state::AppState;

pub const INDEX_HTML: &str = "<!DOCTYPE html><title>hp</title>";
pub const APP_JS: &str = "console.log('hp');";

/// Serve `router` on `127.0.0.1:0` and return the bound address.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    addr
}

/// A dist directory holding `index.html` and `app.js`.
pub fn dist_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "index.html", INDEX_HTML);
    write(dir.path(), "app.js", APP_JS);
    dir
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write dist file");
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

/// Run the dev server against `backend` with `dist` as the bundle.
pub async fn spawn_dev_server(backend: SocketAddr, dist: &Path) -> SocketAddr {
    let config = Config {
        port: 0,
        api_origin: format!("http://{backend}"),
        dist_dir: dist.to_path_buf(),
        proxy_ws: true,
    };
    let state = AppState::new(config).expect("app state");
    spawn(crate::routes::app(state)).await
}
