use std::{
    net::TcpListener as StdTcpListener,
    path::{Path, PathBuf},
};

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::{net::TcpListener, sync::oneshot};
use tower_http::services::ServeDir;

use crate::{
    append_server_log,
    asset_server::{register_listener, AssetServer, ServerHandle, ServerKind},
    content_types::explicit_content_type,
};

pub(crate) struct StaticAssetServer;

impl AssetServer for StaticAssetServer {
    fn kind(&self) -> ServerKind {
        ServerKind::Static
    }

    fn start(&self, listener: StdTcpListener, root: PathBuf) -> Result<ServerHandle, String> {
        let (addr, listener) = register_listener(listener)
            .map_err(|error| format!("static server: {error}"))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = build_router(&root);

        tauri::async_runtime::spawn(async move {
            if let Err(error) = run_static_server(listener, router, shutdown_rx).await {
                append_server_log(&format!("static server stopped with error: {error}"));
            }
        });

        append_server_log(&format!(
            "static HTTP server started on http://{addr}/ serving {}",
            root.display()
        ));
        Ok(ServerHandle::new(ServerKind::Static, addr, shutdown_tx))
    }
}

async fn run_static_server(
    listener: TcpListener,
    router: Router,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), String> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await
        .map_err(|error| format!("static server failed: {error}"))?;

    append_server_log("static HTTP server closed");
    Ok(())
}

async fn pin_content_type(request: Request, next: Next) -> Response {
    let pinned = explicit_content_type(Path::new(request.uri().path()));
    let mut response = next.run(request).await;

    if let Some(content_type) = pinned {
        if response.status().is_success() {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
    }
    response
}

pub(crate) fn build_router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(middleware::from_fn(pin_content_type))
}
