use tauri::{webview::PageLoadEvent, AppHandle, Manager, RunEvent, WindowEvent};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::{
    append_desktop_log, append_shutdown_log, append_startup_log, exit_events,
    external_links,
    lifecycle::LifecycleEvent,
    main_window, menu_handler, menu_setup, server_lifecycle,
    shell_config::ShellConfig,
    shell_locale, ShellState, DEFAULT_SHELL_LOCALE, DESKTOP_LOG_FILE, MAIN_WINDOW_LABEL,
};

fn launch_shell(app_handle: &AppHandle) -> Result<(), String> {
    let state = app_handle.state::<ShellState>();
    if !state.can_launch_window() {
        append_startup_log(&format!(
            "launch skipped: shell is in phase {:?}",
            state.phase()
        ));
        return Ok(());
    }

    let server_url = server_lifecycle::start_asset_server(app_handle)?;
    state.apply_event(LifecycleEvent::ServerBound);
    append_startup_log(&format!("asset server bound at {server_url}"));

    main_window::create_main_window(
        app_handle,
        &server_url,
        state.config.dev_tools,
        append_desktop_log,
    )?;
    Ok(())
}

fn show_startup_error(app_handle: &AppHandle, message: &str) {
    append_startup_log(&format!("startup failed: {message}"));
    let exit_handle = app_handle.clone();
    app_handle
        .dialog()
        .message(message)
        .title("Fantasy Map Generator")
        .kind(MessageDialogKind::Error)
        .show(move |_| exit_handle.exit(1));
}

fn focus_existing_instance(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if state.apply_event(LifecycleEvent::SecondInstance).is_none() {
        append_desktop_log(&format!(
            "second instance ignored in phase {:?}",
            state.phase()
        ));
        return;
    }
    append_desktop_log("second instance started; focusing main window");
    main_window::show_main_window(app_handle, append_desktop_log);
}

#[cfg(target_os = "macos")]
fn reopen_shell(app_handle: &AppHandle) {
    if main_window::get_main_window(app_handle).is_some() {
        main_window::show_main_window(app_handle, append_desktop_log);
        return;
    }

    let state = app_handle.state::<ShellState>();
    if state.apply_event(LifecycleEvent::Activate).is_none() {
        return;
    }
    append_startup_log("application reactivated without windows; relaunching");
    if let Err(error) = launch_shell(app_handle) {
        append_startup_log(&format!("relaunch failed: {error}"));
    }
}

pub fn run() {
    let config = ShellConfig::from_process();
    let locale = shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE);

    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        crate::logging::resolve_desktop_log_path(
            crate::runtime_paths::default_packaged_root_dir(),
            DESKTOP_LOG_FILE,
        )
        .display()
    ));
    append_startup_log(&format!(
        "config: dev_tools={} server={:?} locale={locale}",
        config.dev_tools, config.server_preference
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            focus_existing_instance(app);
        }))
        .plugin(tauri_plugin_dialog::init())
        .manage(ShellState::new(config, locale))
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::Destroyed = event {
                let app_handle = window.app_handle();
                app_handle.state::<ShellState>().main_window_destroyed();
                append_shutdown_log("main window closed");
                server_lifecycle::stop_asset_server(app_handle, "main window closed");
            }
        })
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                append_desktop_log(&format!("page-load started: {}", payload.url()));
            }
            PageLoadEvent::Finished => {
                append_desktop_log(&format!("page-load finished: {}", payload.url()));
                if webview.window().label() != MAIN_WINDOW_LABEL {
                    return;
                }
                let server_url = webview.app_handle().state::<ShellState>().server_url();
                if external_links::is_server_origin(payload.url(), server_url.as_deref()) {
                    main_window::show_main_window(webview.app_handle(), append_desktop_log);
                }
            }
        })
        .on_menu_event(|app, event| menu_handler::handle_menu_event(app, event.id().as_ref()))
        .setup(|app| {
            let app_handle = app.handle().clone();
            let state = app_handle.state::<ShellState>();
            state.apply_event(LifecycleEvent::Ready);

            if let Err(error) = menu_setup::setup_app_menu(&app_handle) {
                append_startup_log(&format!("failed to initialize menu: {error}"));
            }

            if let Err(error) = launch_shell(&app_handle) {
                show_startup_error(&app_handle, &error);
            }
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(app_handle, &api, code);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                reopen_shell(app_handle);
            }
            _ => {}
        });
}
