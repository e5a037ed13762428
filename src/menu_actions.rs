pub const MENU_NEW_MAP: &str = "file_new_map";
pub const MENU_OPEN_MAP: &str = "file_open_map";
pub const MENU_QUIT: &str = "file_quit";
pub const MENU_RELOAD: &str = "view_reload";
pub const MENU_FORCE_RELOAD: &str = "view_force_reload";
pub const MENU_TOGGLE_DEVTOOLS: &str = "view_toggle_devtools";
pub const MENU_RESET_ZOOM: &str = "view_reset_zoom";
pub const MENU_ZOOM_IN: &str = "view_zoom_in";
pub const MENU_ZOOM_OUT: &str = "view_zoom_out";
pub const MENU_TOGGLE_FULLSCREEN: &str = "view_toggle_fullscreen";
pub const MENU_MINIMIZE: &str = "window_minimize";
pub const MENU_CLOSE: &str = "window_close";
pub const MENU_ZOOM_WINDOW: &str = "window_zoom";
pub const MENU_BRING_ALL_TO_FRONT: &str = "window_bring_all_to_front";
pub const MENU_ABOUT: &str = "help_about";
pub const MENU_GITHUB: &str = "help_github";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewMap,
    OpenMap,
    Quit,
    Reload,
    ForceReload,
    ToggleDevtools,
    ResetZoom,
    ZoomIn,
    ZoomOut,
    ToggleFullscreen,
    Minimize,
    Close,
    ZoomWindow,
    BringAllToFront,
    About,
    GitHub,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        MENU_NEW_MAP => Some(MenuAction::NewMap),
        MENU_OPEN_MAP => Some(MenuAction::OpenMap),
        MENU_QUIT => Some(MenuAction::Quit),
        MENU_RELOAD => Some(MenuAction::Reload),
        MENU_FORCE_RELOAD => Some(MenuAction::ForceReload),
        MENU_TOGGLE_DEVTOOLS => Some(MenuAction::ToggleDevtools),
        MENU_RESET_ZOOM => Some(MenuAction::ResetZoom),
        MENU_ZOOM_IN => Some(MenuAction::ZoomIn),
        MENU_ZOOM_OUT => Some(MenuAction::ZoomOut),
        MENU_TOGGLE_FULLSCREEN => Some(MenuAction::ToggleFullscreen),
        MENU_MINIMIZE => Some(MenuAction::Minimize),
        MENU_CLOSE => Some(MenuAction::Close),
        MENU_ZOOM_WINDOW => Some(MenuAction::ZoomWindow),
        MENU_BRING_ALL_TO_FRONT => Some(MenuAction::BringAllToFront),
        MENU_ABOUT => Some(MenuAction::About),
        MENU_GITHUB => Some(MenuAction::GitHub),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_file_and_view_actions() {
        assert_eq!(action_from_menu_id(MENU_NEW_MAP), Some(MenuAction::NewMap));
        assert_eq!(action_from_menu_id(MENU_OPEN_MAP), Some(MenuAction::OpenMap));
        assert_eq!(action_from_menu_id(MENU_QUIT), Some(MenuAction::Quit));
        assert_eq!(
            action_from_menu_id(MENU_FORCE_RELOAD),
            Some(MenuAction::ForceReload)
        );
        assert_eq!(action_from_menu_id(MENU_ZOOM_OUT), Some(MenuAction::ZoomOut));
        assert_eq!(action_from_menu_id(MENU_GITHUB), Some(MenuAction::GitHub));
    }

    #[test]
    fn action_from_menu_id_maps_window_actions() {
        assert_eq!(action_from_menu_id(MENU_MINIMIZE), Some(MenuAction::Minimize));
        assert_eq!(action_from_menu_id(MENU_ZOOM_WINDOW), Some(MenuAction::ZoomWindow));
        assert_eq!(
            action_from_menu_id(MENU_BRING_ALL_TO_FRONT),
            Some(MenuAction::BringAllToFront)
        );
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
        assert_eq!(action_from_menu_id(""), None);
    }
}
