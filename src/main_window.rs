use tauri::{
    webview::NewWindowResponse, AppHandle, Manager, Url, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};

use crate::{
    external_links::{self, NavigationDecision},
    MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_MIN_HEIGHT, MAIN_WINDOW_MIN_WIDTH,
    MAIN_WINDOW_WIDTH,
};

const MAIN_WINDOW_TITLE: &str = "Fantasy Map Generator";

pub(crate) fn get_main_window(app_handle: &AppHandle) -> Option<WebviewWindow> {
    app_handle.get_webview_window(MAIN_WINDOW_LABEL)
}

fn open_link_externally<F>(target: &Url, log: F)
where
    F: Fn(&str),
{
    log(&format!("opening external link: {target}"));
    if let Err(error) = external_links::open_external_url(target.as_str()) {
        log(&format!("failed to open external link: {error}"));
    }
}

pub(crate) fn create_main_window<F>(
    app_handle: &AppHandle,
    server_url: &str,
    dev_tools: bool,
    log: F,
) -> Result<WebviewWindow, String>
where
    F: Fn(&str) + Send + Sync + Copy + 'static,
{
    if let Some(existing) = get_main_window(app_handle) {
        log("main window already exists, reusing it");
        return Ok(existing);
    }

    let url: Url = server_url
        .parse()
        .map_err(|error| format!("Invalid server URL {server_url}: {error}"))?;
    let origin = server_url.to_string();

    let window = WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .min_inner_size(MAIN_WINDOW_MIN_WIDTH, MAIN_WINDOW_MIN_HEIGHT)
        .visible(false)
        .on_navigation(move |target| {
            match external_links::navigation_decision(target, Some(origin.as_str())) {
                NavigationDecision::Allow => true,
                NavigationDecision::OpenExternally => {
                    open_link_externally(target, log);
                    false
                }
                NavigationDecision::Deny => {
                    log(&format!("blocked navigation to {target}"));
                    false
                }
            }
        })
        .on_new_window(move |target, _features| {
            match external_links::new_window_decision(&target) {
                NavigationDecision::OpenExternally => open_link_externally(&target, log),
                NavigationDecision::Allow | NavigationDecision::Deny => {
                    log(&format!("blocked new window for {target}"));
                }
            }
            NewWindowResponse::Deny
        })
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;

    if dev_tools {
        window.open_devtools();
    }
    log(&format!("main window created for {server_url}"));
    Ok(window)
}

pub(crate) fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = get_main_window(app_handle) else {
        log("show_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}
