use tauri::{AppHandle, Manager};

use crate::{
    append_server_log, append_shutdown_log,
    asset_server::{self, ServerHandle},
    runtime_paths, ShellState,
};

pub(crate) fn start_asset_server(app_handle: &AppHandle) -> Result<String, String> {
    let state = app_handle.state::<ShellState>();
    let root = runtime_paths::resolve_asset_root(
        app_handle,
        state.config.asset_root_override.as_deref(),
    )?;
    append_server_log(&format!("serving web assets from {}", root.display()));

    let server = asset_server::select_asset_server(state.config.server_preference);
    let handle = asset_server::start_with_fallback(server.as_ref(), root, append_server_log)?;
    let url = handle.url();
    append_server_log(&format!("{} server listening on {url}", handle.kind()));

    if let Some(mut previous) = state.install_server(handle) {
        close_handle(&mut previous, "replaced by a new server");
    }
    Ok(url)
}

fn close_handle(handle: &mut ServerHandle, reason: &str) {
    match handle.close() {
        Ok(()) => append_shutdown_log(&format!(
            "{} server on {} closed: {reason}",
            handle.kind(),
            handle.addr()
        )),
        Err(error) => append_shutdown_log(&format!("failed to close asset server: {error}")),
    }
}

// Idempotent; close failures are logged only.
pub(crate) fn stop_asset_server(app_handle: &AppHandle, reason: &str) {
    let Some(state) = app_handle.try_state::<ShellState>() else {
        return;
    };

    match state.take_server() {
        Some(mut handle) => close_handle(&mut handle, reason),
        None => append_shutdown_log(&format!("no asset server running ({reason})")),
    }
}
