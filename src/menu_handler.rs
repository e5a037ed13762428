use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::{
    append_desktop_log, append_shutdown_log, external_links,
    lifecycle::LifecycleEvent,
    main_window,
    menu_actions::{self, MenuAction},
    shell_locale::{self, MenuTexts},
    window_actions::{self, ZoomChange},
    ShellState, DEFAULT_SHELL_LOCALE, PROJECT_REPOSITORY_URL,
};

const MAP_FILE_EXTENSIONS: [&str; 2] = ["map", "gz"];

fn menu_texts(app_handle: &AppHandle) -> MenuTexts {
    let locale = app_handle
        .try_state::<ShellState>()
        .map(|state| state.locale)
        .unwrap_or(DEFAULT_SHELL_LOCALE);
    shell_locale::menu_texts_for_locale(locale)
}

fn show_open_map_dialog(app_handle: &AppHandle) {
    let texts = menu_texts(app_handle);
    app_handle
        .dialog()
        .file()
        .add_filter(texts.open_map_filter, &MAP_FILE_EXTENSIONS)
        .pick_file(|path| match path {
            Some(path) => append_desktop_log(&format!("map file selected: {path}")),
            None => append_desktop_log("open map cancelled"),
        });
}

fn show_about_dialog(app_handle: &AppHandle) {
    let texts = menu_texts(app_handle);
    let message = format!(
        "{}\n\nv{}",
        texts.about_message,
        app_handle.package_info().version
    );
    app_handle
        .dialog()
        .message(message)
        .title(texts.about)
        .kind(MessageDialogKind::Info)
        .show(|_| {});
}

pub fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    let Some(action) = menu_actions::action_from_menu_id(menu_id) else {
        return;
    };

    match action {
        MenuAction::NewMap | MenuAction::Reload => {
            window_actions::reload_main_window(app_handle, append_desktop_log)
        }
        MenuAction::OpenMap => show_open_map_dialog(app_handle),
        MenuAction::Quit => {
            let state = app_handle.state::<ShellState>();
            state.apply_event(LifecycleEvent::QuitRequested);
            append_shutdown_log("quit requested from menu, exiting desktop process");
            app_handle.exit(0);
        }
        MenuAction::ForceReload => {
            window_actions::force_reload_main_window(app_handle, append_desktop_log)
        }
        MenuAction::ToggleDevtools => window_actions::toggle_devtools(app_handle, append_desktop_log),
        MenuAction::ResetZoom => {
            window_actions::zoom_main_window(app_handle, ZoomChange::Reset, append_desktop_log)
        }
        MenuAction::ZoomIn => {
            window_actions::zoom_main_window(app_handle, ZoomChange::In, append_desktop_log)
        }
        MenuAction::ZoomOut => {
            window_actions::zoom_main_window(app_handle, ZoomChange::Out, append_desktop_log)
        }
        MenuAction::ToggleFullscreen => {
            window_actions::toggle_fullscreen(app_handle, append_desktop_log)
        }
        MenuAction::Minimize => window_actions::minimize_main_window(app_handle, append_desktop_log),
        MenuAction::Close => window_actions::close_main_window(app_handle, append_desktop_log),
        MenuAction::ZoomWindow => window_actions::toggle_maximize(app_handle, append_desktop_log),
        MenuAction::BringAllToFront => main_window::show_main_window(app_handle, append_desktop_log),
        MenuAction::About => show_about_dialog(app_handle),
        MenuAction::GitHub => {
            if let Err(error) = external_links::open_external_url(PROJECT_REPOSITORY_URL) {
                append_desktop_log(&format!("failed to open project page: {error}"));
            }
        }
    }
}
