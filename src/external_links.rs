use std::process::{Command, Stdio};

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigationDecision {
    Allow,
    OpenExternally,
    Deny,
}

pub(crate) fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

pub(crate) fn is_server_origin(target: &Url, server_url: Option<&str>) -> bool {
    server_url
        .and_then(|raw| Url::parse(raw).ok())
        .is_some_and(|server| server.origin() == target.origin())
}

pub(crate) fn navigation_decision(target: &Url, server_url: Option<&str>) -> NavigationDecision {
    if is_server_origin(target, server_url) || target.as_str() == "about:blank" {
        return NavigationDecision::Allow;
    }

    match target.scheme() {
        "http" | "https" => NavigationDecision::OpenExternally,
        _ => NavigationDecision::Deny,
    }
}

// Requests for a new window never get one; web links go to the system browser.
pub(crate) fn new_window_decision(target: &Url) -> NavigationDecision {
    match target.scheme() {
        "http" | "https" => NavigationDecision::OpenExternally,
        _ => NavigationDecision::Deny,
    }
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'open': {error}"))
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("rundll32")
        .args(["url.dll,FileProtocolHandler", url])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'rundll32': {error}"))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("xdg-open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'xdg-open': {error}"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

pub(crate) fn open_external_url(raw_url: &str) -> Result<(), String> {
    let url = parse_openable_url(raw_url)?;
    open_url_with_system_browser(url.as_str())
}
