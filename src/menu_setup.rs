use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Manager, Wry,
};

use crate::{menu_actions as ids, shell_locale::{self, MenuTexts}, ShellState};

fn menu_item(
    app_handle: &AppHandle,
    id: &str,
    text: &str,
    accelerator: Option<&str>,
) -> Result<MenuItem<Wry>, String> {
    MenuItem::with_id(app_handle, id, text, true, accelerator)
        .map_err(|error| format!("Failed to create menu item {id}: {error}"))
}

fn separator(app_handle: &AppHandle) -> Result<PredefinedMenuItem<Wry>, String> {
    PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create menu separator: {error}"))
}

fn view_menu(app_handle: &AppHandle, texts: &MenuTexts) -> Result<Submenu<Wry>, String> {
    let reload = menu_item(app_handle, ids::MENU_RELOAD, texts.reload, Some("CmdOrCtrl+R"))?;
    let force_reload = menu_item(
        app_handle,
        ids::MENU_FORCE_RELOAD,
        texts.force_reload,
        Some("CmdOrCtrl+Shift+R"),
    )?;
    let devtools = menu_item(
        app_handle,
        ids::MENU_TOGGLE_DEVTOOLS,
        texts.toggle_devtools,
        Some("CmdOrCtrl+Shift+I"),
    )?;
    let reset_zoom = menu_item(app_handle, ids::MENU_RESET_ZOOM, texts.reset_zoom, Some("CmdOrCtrl+0"))?;
    let zoom_in = menu_item(app_handle, ids::MENU_ZOOM_IN, texts.zoom_in, Some("CmdOrCtrl+Plus"))?;
    let zoom_out = menu_item(app_handle, ids::MENU_ZOOM_OUT, texts.zoom_out, Some("CmdOrCtrl+-"))?;
    let fullscreen = menu_item(
        app_handle,
        ids::MENU_TOGGLE_FULLSCREEN,
        texts.toggle_fullscreen,
        Some("F11"),
    )?;

    Submenu::with_items(
        app_handle,
        texts.view,
        true,
        &[
            &reload,
            &force_reload,
            &devtools,
            &separator(app_handle)?,
            &reset_zoom,
            &zoom_in,
            &zoom_out,
            &separator(app_handle)?,
            &fullscreen,
        ],
    )
    .map_err(|error| format!("Failed to build view menu: {error}"))
}

fn help_menu(app_handle: &AppHandle, texts: &MenuTexts) -> Result<Submenu<Wry>, String> {
    let about = menu_item(app_handle, ids::MENU_ABOUT, texts.about, None)?;
    let github = menu_item(app_handle, ids::MENU_GITHUB, texts.github, None)?;

    Submenu::with_items(app_handle, texts.help, true, &[&about, &github])
        .map_err(|error| format!("Failed to build help menu: {error}"))
}

#[cfg(not(target_os = "macos"))]
fn build_app_menu(app_handle: &AppHandle, texts: &MenuTexts) -> Result<Menu<Wry>, String> {
    let new_map = menu_item(app_handle, ids::MENU_NEW_MAP, texts.new_map, Some("CmdOrCtrl+N"))?;
    let open_map = menu_item(app_handle, ids::MENU_OPEN_MAP, texts.open_map, Some("CmdOrCtrl+O"))?;
    let quit = menu_item(app_handle, ids::MENU_QUIT, texts.quit, Some("CmdOrCtrl+Q"))?;
    let file = Submenu::with_items(
        app_handle,
        texts.file,
        true,
        &[&new_map, &open_map, &separator(app_handle)?, &quit],
    )
    .map_err(|error| format!("Failed to build file menu: {error}"))?;

    let minimize = menu_item(app_handle, ids::MENU_MINIMIZE, texts.minimize, Some("CmdOrCtrl+M"))?;
    let close = menu_item(app_handle, ids::MENU_CLOSE, texts.close, Some("CmdOrCtrl+W"))?;
    let window = Submenu::with_items(app_handle, texts.window, true, &[&minimize, &close])
        .map_err(|error| format!("Failed to build window menu: {error}"))?;

    Menu::with_items(
        app_handle,
        &[&file, &view_menu(app_handle, texts)?, &window, &help_menu(app_handle, texts)?],
    )
    .map_err(|error| format!("Failed to build application menu: {error}"))
}

#[cfg(target_os = "macos")]
fn build_app_menu(app_handle: &AppHandle, texts: &MenuTexts) -> Result<Menu<Wry>, String> {
    let predefined = |result: tauri::Result<PredefinedMenuItem<Wry>>| {
        result.map_err(|error| format!("Failed to create predefined menu item: {error}"))
    };

    let about = menu_item(app_handle, ids::MENU_ABOUT, texts.about, None)?;
    let quit = menu_item(app_handle, ids::MENU_QUIT, texts.quit, Some("CmdOrCtrl+Q"))?;
    let app_menu = Submenu::with_items(
        app_handle,
        "Fantasy Map Generator",
        true,
        &[
            &about,
            &separator(app_handle)?,
            &predefined(PredefinedMenuItem::services(app_handle, None))?,
            &separator(app_handle)?,
            &predefined(PredefinedMenuItem::hide(app_handle, None))?,
            &predefined(PredefinedMenuItem::hide_others(app_handle, None))?,
            &predefined(PredefinedMenuItem::show_all(app_handle, None))?,
            &separator(app_handle)?,
            &quit,
        ],
    )
    .map_err(|error| format!("Failed to build application menu: {error}"))?;

    let new_map = menu_item(app_handle, ids::MENU_NEW_MAP, texts.new_map, Some("CmdOrCtrl+N"))?;
    let open_map = menu_item(app_handle, ids::MENU_OPEN_MAP, texts.open_map, Some("CmdOrCtrl+O"))?;
    let file = Submenu::with_items(app_handle, texts.file, true, &[&new_map, &open_map])
        .map_err(|error| format!("Failed to build file menu: {error}"))?;

    let close = menu_item(app_handle, ids::MENU_CLOSE, texts.close, Some("CmdOrCtrl+W"))?;
    let minimize = menu_item(app_handle, ids::MENU_MINIMIZE, texts.minimize, Some("CmdOrCtrl+M"))?;
    let zoom = menu_item(app_handle, ids::MENU_ZOOM_WINDOW, texts.zoom_window, None)?;
    let bring_all_to_front = menu_item(
        app_handle,
        ids::MENU_BRING_ALL_TO_FRONT,
        texts.bring_all_to_front,
        None,
    )?;
    let window = Submenu::with_items(
        app_handle,
        texts.window,
        true,
        &[
            &close,
            &minimize,
            &zoom,
            &separator(app_handle)?,
            &bring_all_to_front,
        ],
    )
    .map_err(|error| format!("Failed to build window menu: {error}"))?;

    let help = help_menu(app_handle, texts)?;
    Menu::with_items(
        app_handle,
        &[&app_menu, &file, &view_menu(app_handle, texts)?, &window, &help],
    )
    .map_err(|error| format!("Failed to build application menu: {error}"))
}

pub fn setup_app_menu(app_handle: &AppHandle) -> Result<(), String> {
    let locale = app_handle
        .try_state::<ShellState>()
        .map(|state| state.locale)
        .unwrap_or(crate::DEFAULT_SHELL_LOCALE);
    let texts = shell_locale::menu_texts_for_locale(locale);

    let menu = build_app_menu(app_handle, &texts)?;
    app_handle
        .set_menu(menu)
        .map_err(|error| format!("Failed to install application menu: {error}"))?;
    Ok(())
}
