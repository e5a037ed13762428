use std::env;

use crate::SHELL_LOCALE_ENV;

#[derive(Debug, Clone, Copy)]
pub struct MenuTexts {
    pub file: &'static str,
    pub new_map: &'static str,
    pub open_map: &'static str,
    pub open_map_filter: &'static str,
    pub quit: &'static str,
    pub view: &'static str,
    pub reload: &'static str,
    pub force_reload: &'static str,
    pub toggle_devtools: &'static str,
    pub reset_zoom: &'static str,
    pub zoom_in: &'static str,
    pub zoom_out: &'static str,
    pub toggle_fullscreen: &'static str,
    pub window: &'static str,
    pub minimize: &'static str,
    pub close: &'static str,
    pub zoom_window: &'static str,
    pub bring_all_to_front: &'static str,
    pub help: &'static str,
    pub about: &'static str,
    pub about_message: &'static str,
    pub github: &'static str,
}

pub fn menu_texts_for_locale(locale: &str) -> MenuTexts {
    if locale == "en-US" {
        return MenuTexts {
            file: "File",
            new_map: "New Map",
            open_map: "Open Map...",
            open_map_filter: "Map files",
            quit: "Quit",
            view: "View",
            reload: "Reload",
            force_reload: "Force Reload",
            toggle_devtools: "Toggle Developer Tools",
            reset_zoom: "Reset Zoom",
            zoom_in: "Zoom In",
            zoom_out: "Zoom Out",
            toggle_fullscreen: "Toggle Full Screen",
            window: "Window",
            minimize: "Minimize",
            close: "Close",
            zoom_window: "Zoom",
            bring_all_to_front: "Bring All to Front",
            help: "Help",
            about: "About Fantasy Map Generator",
            about_message: "Fantasy Map Generator\nCreate interactive fantasy maps offline.",
            github: "GitHub",
        };
    }

    MenuTexts {
        file: "Archivo",
        new_map: "Nuevo mapa",
        open_map: "Abrir mapa...",
        open_map_filter: "Archivos de mapa",
        quit: "Salir",
        view: "Ver",
        reload: "Recargar",
        force_reload: "Forzar recarga",
        toggle_devtools: "Herramientas de desarrollo",
        reset_zoom: "Restablecer zoom",
        zoom_in: "Acercar",
        zoom_out: "Alejar",
        toggle_fullscreen: "Pantalla completa",
        window: "Ventana",
        minimize: "Minimizar",
        close: "Cerrar",
        zoom_window: "Zoom",
        bring_all_to_front: "Traer todo al frente",
        help: "Ayuda",
        about: "Acerca de Fantasy Map Generator",
        about_message: "Fantasy Map Generator\nCrea mapas de fantasía interactivos sin conexión.",
        github: "GitHub",
    }
}

pub(crate) fn resolve_shell_locale_from<F>(default_shell_locale: &'static str, lookup_env: F) -> &'static str
where
    F: Fn(&str) -> Option<String>,
{
    for env_key in [SHELL_LOCALE_ENV, "LC_ALL", "LANG"] {
        if let Some(value) = lookup_env(env_key) {
            if let Some(locale) = normalize_shell_locale(&value) {
                return locale;
            }
        }
    }

    default_shell_locale
}

pub fn resolve_shell_locale(default_shell_locale: &'static str) -> &'static str {
    resolve_shell_locale_from(default_shell_locale, |key| env::var(key).ok())
}

pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw == "es-ES" {
        return Some("es-ES");
    }
    if raw == "en-US" {
        return Some("en-US");
    }

    // POSIX values look like `en_GB.UTF-8`.
    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("es") {
        return Some("es-ES");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}
