use std::{
    net::TcpListener as StdTcpListener,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    sync::oneshot,
};

use crate::{
    append_server_log,
    asset_server::{register_listener, AssetServer, ServerHandle, ServerKind},
    basic_http::{decode_request_path, read_request, HttpRequest, HttpResponse, ReadOutcome, RequestLimits},
    content_types::basic_content_type,
    portable_api::{handle_api_request, is_api_path, ApiReply},
    ENTRY_DOCUMENT, REQUEST_BODY_LIMIT, REQUEST_HEAD_LIMIT,
};

const REQUEST_LIMITS: RequestLimits = RequestLimits {
    head_bytes: REQUEST_HEAD_LIMIT,
    body_bytes: REQUEST_BODY_LIMIT,
};

// Also answers the portable `/api/*` endpoints.
pub(crate) struct BasicAssetServer;

impl AssetServer for BasicAssetServer {
    fn kind(&self) -> ServerKind {
        ServerKind::Basic
    }

    fn start(&self, listener: StdTcpListener, root: PathBuf) -> Result<ServerHandle, String> {
        let (addr, listener) = register_listener(listener)
            .map_err(|error| format!("basic server: {error}"))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tauri::async_runtime::spawn(run_basic_server(listener, Arc::new(root), shutdown_rx));

        append_server_log(&format!("basic HTTP server started on http://{addr}/"));
        Ok(ServerHandle::new(ServerKind::Basic, addr, shutdown_tx))
    }
}

async fn run_basic_server(
    listener: TcpListener,
    root: Arc<PathBuf>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                append_server_log("basic HTTP server closed");
                return;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, _peer)) => {
                    let root = Arc::clone(&root);
                    tokio::spawn(async move {
                        if let Err(error) = handle_connection(stream, &root).await {
                            append_server_log(&format!("basic server connection error: {error}"));
                        }
                    });
                }
                Err(error) => {
                    append_server_log(&format!("basic server accept failed: {error}"));
                }
            },
        }
    }
}

async fn handle_connection(mut stream: TcpStream, root: &Path) -> Result<(), String> {
    let outcome = read_request(&mut stream, REQUEST_LIMITS)
        .await
        .map_err(|error| format!("Failed to read request: {error}"))?;

    let (response, include_body) = match outcome {
        ReadOutcome::Closed => return Ok(()),
        ReadOutcome::TooLarge => {
            append_server_log(&format!(
                "rejecting request body over {REQUEST_BODY_LIMIT} bytes; closing connection"
            ));
            (HttpResponse::text(413, "Payload Too Large"), true)
        }
        ReadOutcome::Malformed(reason) => {
            append_server_log(&format!("rejecting malformed request: {reason}"));
            (HttpResponse::text(400, "Bad Request"), true)
        }
        ReadOutcome::Request(request) => {
            let include_body = request.method != "HEAD";
            (route_request(&request, root).await, include_body)
        }
    };

    stream
        .write_all(&response.encode(include_body))
        .await
        .map_err(|error| format!("Failed to write response: {error}"))?;
    stream
        .shutdown()
        .await
        .map_err(|error| format!("Failed to close connection: {error}"))
}

// Anything that would leave `root` yields `None`.
pub(crate) fn resolve_asset_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = if request_path == "/" {
        ENTRY_DOCUMENT
    } else {
        request_path.trim_start_matches('/')
    };

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

async fn serve_file(root: &Path, request_path: &str) -> HttpResponse {
    let Some(file_path) = resolve_asset_path(root, request_path) else {
        append_server_log(&format!("refusing path outside asset root: {request_path}"));
        return HttpResponse::text(404, "File not found");
    };

    match tokio::fs::read(&file_path).await {
        Ok(bytes) => HttpResponse::bytes(200, basic_content_type(&file_path), bytes),
        Err(error) => {
            append_server_log(&format!(
                "error loading file {}: {}",
                file_path.display(),
                error
            ));
            HttpResponse::text(404, "File not found")
        }
    }
}

fn api_response(reply: ApiReply) -> HttpResponse {
    HttpResponse::json(reply.status, &reply.body)
}

pub(crate) async fn route_request(request: &HttpRequest, root: &Path) -> HttpResponse {
    if request.method == "OPTIONS" {
        return HttpResponse::empty(200);
    }

    let path = match decode_request_path(&request.target) {
        Ok(path) => path,
        Err(error) => {
            append_server_log(&format!("rejecting request target: {error}"));
            return HttpResponse::text(400, "Bad Request");
        }
    };

    if is_api_path(&path) {
        return api_response(handle_api_request(&request.method, &path, &request.body));
    }

    match request.method.as_str() {
        "GET" | "HEAD" => serve_file(root, &path).await,
        "POST" => api_response(ApiReply::failure(404, "Endpoint not found")),
        _ => HttpResponse::text(405, "Method Not Allowed"),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::{Read, Write},
        net::{SocketAddr, TcpStream as StdTcpStream},
        time::Duration,
    };

    use super::*;
    use crate::asset_server::bind_loopback;

    struct RawResponse {
        status: u16,
        head: String,
        body: Vec<u8>,
    }

    fn fixture_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("index.html"), "<html>map</html>").expect("index");
        fs::create_dir_all(dir.path().join("libs")).expect("libs dir");
        fs::write(dir.path().join("libs").join("d3.min.js"), "d3()").expect("script");
        dir
    }

    fn start(root: &Path) -> ServerHandle {
        let listener = bind_loopback().expect("bind");
        BasicAssetServer
            .start(listener, root.to_path_buf())
            .expect("start basic server")
    }

    fn exchange(addr: SocketAddr, request: &[u8]) -> RawResponse {
        let mut stream = StdTcpStream::connect(addr).expect("connect");
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .expect("timeout");
        stream.write_all(request).expect("write request");

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).expect("read response");

        let split = raw
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .expect("response head");
        let head = String::from_utf8_lossy(&raw[..split]).into_owned();
        let status = head
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
            .expect("status code");
        RawResponse {
            status,
            head,
            body: raw[split + 4..].to_vec(),
        }
    }

    fn get(addr: SocketAddr, path: &str) -> RawResponse {
        exchange(
            addr,
            format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n").as_bytes(),
        )
    }

    #[test]
    fn root_serves_the_entry_document() {
        let root = fixture_root();
        let mut server = start(root.path());

        let via_root = get(server.addr(), "/");
        let via_name = get(server.addr(), "/index.html");
        assert_eq!(via_root.status, 200);
        assert_eq!(via_root.body, via_name.body);
        assert!(via_root
            .head
            .contains("Content-Type: text/html; charset=utf-8"));

        server.close().expect("close");
    }

    #[test]
    fn static_files_use_table_content_type_and_missing_files_404() {
        let root = fixture_root();
        let mut server = start(root.path());

        let script = get(server.addr(), "/libs/d3.min.js?v=3");
        assert_eq!(script.status, 200);
        assert_eq!(script.body, b"d3()");
        assert!(script.head.contains("Content-Type: application/javascript"));

        let missing = get(server.addr(), "/missing.png");
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body, b"File not found");

        let escape = get(server.addr(), "/../../etc/passwd");
        assert_eq!(escape.status, 404);

        server.close().expect("close");
    }

    #[test]
    fn options_always_returns_cors_without_body() {
        let root = fixture_root();
        let mut server = start(root.path());

        for path in ["/", "/does/not/exist", "/api/anything"] {
            let response = exchange(
                server.addr(),
                format!("OPTIONS {path} HTTP/1.1\r\nHost: localhost\r\n\r\n").as_bytes(),
            );
            assert_eq!(response.status, 200, "{path}");
            assert!(response.body.is_empty());
            assert!(response.head.contains("Access-Control-Allow-Origin: *"));
            assert!(response
                .head
                .contains("Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS"));
        }

        server.close().expect("close");
    }

    #[test]
    fn api_endpoints_follow_portable_contract() {
        let root = fixture_root();
        let mut server = start(root.path());

        let first = get(server.addr(), "/api/version");
        let second = exchange(
            server.addr(),
            b"POST /api/version HTTP/1.1\r\nContent-Length: 0\r\n\r\n",
        );
        assert_eq!(first.status, 200);
        assert_eq!(first.body, second.body);
        let version: serde_json::Value = serde_json::from_slice(&first.body).expect("json");
        assert_eq!(version["version"], crate::PORTABLE_API_VERSION);

        let unknown = get(server.addr(), "/api/export");
        assert_eq!(unknown.status, 501);
        let body: serde_json::Value = serde_json::from_slice(&unknown.body).expect("json");
        assert_eq!(body["success"], false);

        server.close().expect("close");
    }

    #[test]
    fn body_at_limit_is_processed() {
        let root = fixture_root();
        let mut server = start(root.path());

        let mut request = format!(
            "POST /api/save HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: {REQUEST_BODY_LIMIT}\r\n\r\n"
        )
        .into_bytes();
        request.extend(std::iter::repeat(b'a').take(REQUEST_BODY_LIMIT));

        let response = exchange(server.addr(), &request);
        assert_eq!(response.status, 200);
        let body: serde_json::Value = serde_json::from_slice(&response.body).expect("json");
        assert_eq!(body["success"], true);

        server.close().expect("close");
    }

    #[test]
    fn body_over_limit_gets_413_and_connection_closes() {
        let root = fixture_root();
        let mut server = start(root.path());

        let response = exchange(
            server.addr(),
            format!(
                "POST /api/save HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
                REQUEST_BODY_LIMIT + 1
            )
            .as_bytes(),
        );
        assert_eq!(response.status, 413);
        assert!(response.head.contains("Connection: close"));

        let still_serving = get(server.addr(), "/api/version");
        assert_eq!(still_serving.status, 200);

        server.close().expect("close");
    }

    #[tokio::test]
    async fn route_request_rejects_non_api_posts_and_unknown_methods() {
        let root = fixture_root();
        let request = |method: &str| HttpRequest {
            method: method.to_string(),
            target: "/index.html".to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        };

        let post = route_request(&request("POST"), root.path()).await;
        assert_eq!(post.status, 404);
        let body: serde_json::Value = serde_json::from_slice(&post.body).expect("json");
        assert_eq!(body["success"], false);

        let put = route_request(&request("PUT"), root.path()).await;
        assert_eq!(put.status, 405);

        let head = route_request(&request("HEAD"), root.path()).await;
        assert_eq!(head.status, 200);
    }

    #[test]
    fn resolve_asset_path_stays_inside_root() {
        let root = Path::new("/srv/www");
        assert_eq!(
            resolve_asset_path(root, "/"),
            Some(PathBuf::from("/srv/www/index.html"))
        );
        assert_eq!(
            resolve_asset_path(root, "/images/./icon.svg"),
            Some(PathBuf::from("/srv/www/images/icon.svg"))
        );
        assert_eq!(
            resolve_asset_path(root, "//etc/hosts"),
            Some(PathBuf::from("/srv/www/etc/hosts"))
        );
        assert_eq!(resolve_asset_path(root, "/images/../../secret"), None);
    }
}
