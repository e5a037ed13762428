use std::{
    fmt,
    net::{Ipv4Addr, SocketAddr, TcpListener},
    path::PathBuf,
};

use tokio::sync::oneshot;

use crate::{basic_server::BasicAssetServer, shell_config::ServerPreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServerKind {
    Static,
    Basic,
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Basic => write!(f, "basic"),
        }
    }
}

pub(crate) trait AssetServer: Send + Sync {
    fn kind(&self) -> ServerKind;

    fn start(&self, listener: TcpListener, root: PathBuf) -> Result<ServerHandle, String>;
}

// Dropping the handle also stops the server.
pub(crate) struct ServerHandle {
    kind: ServerKind,
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerHandle")
            .field("kind", &self.kind)
            .field("addr", &self.addr)
            .field("open", &self.shutdown.is_some())
            .finish()
    }
}

impl ServerHandle {
    pub(crate) fn new(kind: ServerKind, addr: SocketAddr, shutdown: oneshot::Sender<()>) -> Self {
        Self {
            kind,
            addr,
            shutdown: Some(shutdown),
        }
    }

    pub(crate) fn kind(&self) -> ServerKind {
        self.kind
    }

    pub(crate) fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub(crate) fn close(&mut self) -> Result<(), String> {
        let Some(shutdown) = self.shutdown.take() else {
            return Ok(());
        };

        shutdown
            .send(())
            .map_err(|_| format!("{} server on {} had already stopped", self.kind, self.addr))
    }
}

pub(crate) fn bind_loopback() -> Result<TcpListener, String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .map_err(|error| format!("Failed to bind loopback listener: {error}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|error| format!("Failed to configure loopback listener: {error}"))?;
    Ok(listener)
}

// Registers the listener with the async runtime before the server task is
// spawned, so registration errors reach the caller of `start`.
pub(crate) fn register_listener(
    listener: TcpListener,
) -> Result<(SocketAddr, tokio::net::TcpListener), String> {
    let addr = listener
        .local_addr()
        .map_err(|error| format!("Failed to read listener address: {error}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|error| format!("Failed to configure listener on {addr}: {error}"))?;

    let runtime = tauri::async_runtime::handle();
    let _entered = runtime.inner().enter();
    let listener = tokio::net::TcpListener::from_std(listener)
        .map_err(|error| format!("Failed to register listener on {addr}: {error}"))?;
    Ok((addr, listener))
}

pub(crate) fn static_server_available() -> bool {
    cfg!(feature = "static-server")
}

pub(crate) fn resolve_server_kind(preference: ServerPreference, static_available: bool) -> ServerKind {
    match preference {
        ServerPreference::Basic => ServerKind::Basic,
        ServerPreference::Auto | ServerPreference::Static if static_available => ServerKind::Static,
        ServerPreference::Auto | ServerPreference::Static => ServerKind::Basic,
    }
}

pub(crate) fn server_for_kind(kind: ServerKind) -> Box<dyn AssetServer> {
    match kind {
        #[cfg(feature = "static-server")]
        ServerKind::Static => Box::new(crate::static_server::StaticAssetServer),
        #[cfg(not(feature = "static-server"))]
        ServerKind::Static => Box::new(BasicAssetServer),
        ServerKind::Basic => Box::new(BasicAssetServer),
    }
}

pub(crate) fn select_asset_server(preference: ServerPreference) -> Box<dyn AssetServer> {
    let kind = resolve_server_kind(preference, static_server_available());
    if preference == ServerPreference::Static && kind != ServerKind::Static {
        crate::append_server_log("static server requested but not compiled in; using basic server");
    }
    server_for_kind(kind)
}

// Retries once with the basic server when any other server fails to start.
pub(crate) fn start_with_fallback<F>(
    server: &dyn AssetServer,
    root: PathBuf,
    log: F,
) -> Result<ServerHandle, String>
where
    F: Fn(&str),
{
    let primary_error = match bind_loopback().and_then(|listener| server.start(listener, root.clone())) {
        Ok(handle) => return Ok(handle),
        Err(error) => error,
    };

    if server.kind() == ServerKind::Basic {
        return Err(primary_error);
    }

    log(&format!(
        "{} server failed to start ({primary_error}); falling back to basic server",
        server.kind()
    ));
    bind_loopback().and_then(|listener| BasicAssetServer.start(listener, root))
}
