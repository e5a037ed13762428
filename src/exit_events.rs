use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{append_shutdown_log, lifecycle::LifecycleEvent, server_lifecycle, ShellState};

// No exit code means the last window closed.
pub(crate) fn should_stay_resident(exit_code: Option<i32>, resident_platform: bool) -> bool {
    resident_platform && exit_code.is_none()
}

pub(crate) fn handle_exit_requested(
    app_handle: &AppHandle,
    api: &ExitRequestApi,
    exit_code: Option<i32>,
) {
    server_lifecycle::stop_asset_server(app_handle, "exit requested");

    if should_stay_resident(exit_code, cfg!(target_os = "macos")) {
        append_shutdown_log("all windows closed; staying resident until explicit quit");
        api.prevent_exit();
        return;
    }

    if let Some(state) = app_handle.try_state::<ShellState>() {
        state.apply_event(LifecycleEvent::QuitRequested);
    }
    append_shutdown_log(&format!(
        "exit requested (code: {})",
        exit_code.map_or_else(|| "none".to_string(), |code| code.to_string())
    ));
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    server_lifecycle::stop_asset_server(app_handle, "process exit");
    if let Some(state) = app_handle.try_state::<ShellState>() {
        state.apply_event(LifecycleEvent::Exited);
    }
    append_shutdown_log("desktop process exiting");
}

#[cfg(test)]
mod tests {
    use super::should_stay_resident;

    #[test]
    fn should_stay_resident_only_for_implicit_exit_on_resident_platform() {
        assert!(should_stay_resident(None, true));
        assert!(!should_stay_resident(Some(0), true));
        assert!(!should_stay_resident(None, false));
        assert!(!should_stay_resident(Some(1), false));
    }
}
