use tauri::{AppHandle, Manager};

use crate::{main_window, ShellState, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomChange {
    In,
    Out,
    Reset,
}

// Snaps to tenths so repeated steps do not drift.
pub fn next_zoom(current: f64, change: ZoomChange) -> f64 {
    let next = match change {
        ZoomChange::In => current + ZOOM_STEP,
        ZoomChange::Out => current - ZOOM_STEP,
        ZoomChange::Reset => ZOOM_DEFAULT,
    };
    ((next * 10.0).round() / 10.0).clamp(ZOOM_MIN, ZOOM_MAX)
}

fn eval_in_main_window<F>(app_handle: &AppHandle, action: &str, script: &str, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window::get_main_window(app_handle) else {
        log(&format!("{action} skipped: main window not found"));
        return;
    };

    if let Err(error) = window.eval(script) {
        log(&format!("failed to {action}: {error}"));
    }
}

pub fn reload_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    eval_in_main_window(app_handle, "reload main window", "window.location.reload();", log);
}

pub fn force_reload_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(server_url) = app_handle.state::<ShellState>().server_url() else {
        log("force reload skipped: asset server is not running");
        return;
    };

    let js = format!(
        "window.location.replace({});",
        serde_json::to_string(&server_url).unwrap_or_else(|_| "\"/\"".to_string())
    );
    eval_in_main_window(app_handle, "force reload main window", &js, log);
}

pub fn zoom_main_window<F>(app_handle: &AppHandle, change: ZoomChange, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window::get_main_window(app_handle) else {
        log("zoom skipped: main window not found");
        return;
    };

    let state = app_handle.state::<ShellState>();
    let factor = next_zoom(state.zoom(), change);
    match window.set_zoom(factor) {
        Ok(()) => state.set_zoom(factor),
        Err(error) => log(&format!("failed to set zoom to {factor}: {error}")),
    }
}

pub fn toggle_fullscreen<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window::get_main_window(app_handle) else {
        log("toggle_fullscreen skipped: main window not found");
        return;
    };

    let result = window
        .is_fullscreen()
        .and_then(|fullscreen| window.set_fullscreen(!fullscreen));
    if let Err(error) = result {
        log(&format!("failed to toggle fullscreen: {error}"));
    }
}

pub fn toggle_devtools<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window::get_main_window(app_handle) else {
        log("toggle_devtools skipped: main window not found");
        return;
    };

    if window.is_devtools_open() {
        window.close_devtools();
    } else {
        window.open_devtools();
    }
}

pub fn minimize_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Some(window) = main_window::get_main_window(app_handle) {
        if let Err(error) = window.minimize() {
            log(&format!("failed to minimize main window: {error}"));
        }
    }
}

pub fn close_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Some(window) = main_window::get_main_window(app_handle) {
        if let Err(error) = window.close() {
            log(&format!("failed to close main window: {error}"));
        }
    }
}

pub fn toggle_maximize<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window::get_main_window(app_handle) else {
        return;
    };

    let result = window.is_maximized().and_then(|maximized| {
        if maximized {
            window.unmaximize()
        } else {
            window.maximize()
        }
    });
    if let Err(error) = result {
        log(&format!("failed to toggle maximize: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_zoom_steps_by_tenths() {
        assert_eq!(next_zoom(1.0, ZoomChange::In), 1.1);
        assert_eq!(next_zoom(1.0, ZoomChange::Out), 0.9);
        assert_eq!(next_zoom(2.4, ZoomChange::Reset), ZOOM_DEFAULT);
    }

    #[test]
    fn next_zoom_stays_within_bounds() {
        let mut factor = ZOOM_DEFAULT;
        for _ in 0..40 {
            factor = next_zoom(factor, ZoomChange::In);
        }
        assert_eq!(factor, ZOOM_MAX);

        for _ in 0..40 {
            factor = next_zoom(factor, ZoomChange::Out);
        }
        assert_eq!(factor, ZOOM_MIN);
    }

    #[test]
    fn next_zoom_does_not_drift() {
        let mut factor = ZOOM_DEFAULT;
        for _ in 0..7 {
            factor = next_zoom(factor, ZoomChange::In);
        }
        for _ in 0..7 {
            factor = next_zoom(factor, ZoomChange::Out);
        }
        assert_eq!(factor, ZOOM_DEFAULT);
    }
}
