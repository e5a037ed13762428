use serde::Serialize;
use serde_json::Value;

use crate::{append_server_log, PORTABLE_API_VERSION};

pub(crate) const API_PREFIX: &str = "/api/";

#[derive(Debug, Serialize)]
pub(crate) struct ApiResult {
    pub(crate) success: bool,
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiVersion {
    pub(crate) version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiDebugInfo {
    pub(crate) portable: bool,
    pub(crate) platform: &'static str,
    pub(crate) arch: &'static str,
    pub(crate) shell_version: &'static str,
    pub(crate) tauri_version: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ApiReply {
    pub(crate) status: u16,
    pub(crate) body: Value,
}

impl ApiReply {
    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        let body = serde_json::to_value(payload).unwrap_or(Value::Null);
        Self { status, body }
    }

    pub(crate) fn failure(status: u16, message: &str) -> Self {
        Self::json(
            status,
            &ApiResult {
                success: false,
                message: message.to_string(),
            },
        )
    }
}

pub(crate) fn is_api_path(path: &str) -> bool {
    path.starts_with(API_PREFIX)
}

pub(crate) fn debug_info() -> ApiDebugInfo {
    ApiDebugInfo {
        portable: true,
        platform: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        shell_version: env!("CARGO_PKG_VERSION"),
        tauri_version: tauri::VERSION,
    }
}

// `/api/save` reports success without persisting anything.
pub(crate) fn handle_api_request(method: &str, path: &str, body: &[u8]) -> ApiReply {
    append_server_log(&format!(
        "api request: {method} {path} ({} body bytes)",
        body.len()
    ));

    match (method, path) {
        ("POST", "/api/save") => ApiReply::json(
            200,
            &ApiResult {
                success: true,
                message: "Map saved locally".to_string(),
            },
        ),
        ("GET" | "POST", "/api/version") => ApiReply::json(
            200,
            &ApiVersion {
                version: PORTABLE_API_VERSION,
            },
        ),
        ("GET" | "POST", "/api/debug") => ApiReply::json(200, &debug_info()),
        _ => ApiReply::failure(501, "API not implemented in portable mode"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_reports_success_without_persisting() {
        let reply = handle_api_request("POST", "/api/save", br#"{"map":"..."}"#);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["success"], true);
        assert_eq!(reply.body["message"], "Map saved locally");
    }

    #[test]
    fn version_is_stable_across_calls_and_methods() {
        let first = handle_api_request("GET", "/api/version", b"");
        let second = handle_api_request("POST", "/api/version", b"");
        assert_eq!(first, second);
        assert_eq!(first.body["version"], PORTABLE_API_VERSION);
    }

    #[test]
    fn debug_reports_platform_fields() {
        let reply = handle_api_request("GET", "/api/debug", b"");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["portable"], true);
        assert_eq!(reply.body["platform"], std::env::consts::OS);
        assert_eq!(reply.body["arch"], std::env::consts::ARCH);
        assert!(reply.body["shellVersion"].is_string());
        assert!(reply.body["tauriVersion"].is_string());
    }

    #[test]
    fn unknown_api_paths_are_not_implemented() {
        for (method, path) in [
            ("GET", "/api/maps"),
            ("POST", "/api/load"),
            ("GET", "/api/save"),
            ("DELETE", "/api/version"),
        ] {
            let reply = handle_api_request(method, path, b"");
            assert_eq!(reply.status, 501, "{method} {path}");
            assert_eq!(reply.body["success"], false);
        }
    }

    #[test]
    fn is_api_path_requires_prefix() {
        assert!(is_api_path("/api/version"));
        assert!(!is_api_path("/apis/version"));
        assert!(!is_api_path("/index.html"));
    }
}
