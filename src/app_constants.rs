pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 1400.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 900.0;
pub(crate) const MAIN_WINDOW_MIN_WIDTH: f64 = 800.0;
pub(crate) const MAIN_WINDOW_MIN_HEIGHT: f64 = 600.0;

pub(crate) const DEFAULT_SHELL_LOCALE: &str = "es-ES";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub(crate) const PACKAGED_ROOT_DIR_NAME: &str = ".fantasy-map-generator";

pub(crate) const ASSET_DIR_NAME: &str = "www";
pub(crate) const ENTRY_DOCUMENT: &str = "index.html";

pub(crate) const PORTABLE_API_VERSION: &str = "2.1.0-portable";
pub(crate) const REQUEST_BODY_LIMIT: usize = 1_000_000;
pub(crate) const REQUEST_HEAD_LIMIT: usize = 64 * 1024;

pub(crate) const PROJECT_REPOSITORY_URL: &str = "https://github.com/Azgaar/Fantasy-Map-Generator";

pub(crate) const DEVTOOLS_FLAG: &str = "--dev";
pub(crate) const DEVTOOLS_ENV: &str = "FMG_DESKTOP_DEVTOOLS";
pub(crate) const SERVER_PREFERENCE_ENV: &str = "FMG_DESKTOP_SERVER";
pub(crate) const ASSET_ROOT_ENV: &str = "FMG_DESKTOP_ASSET_ROOT";
pub(crate) const SHELL_LOCALE_ENV: &str = "FMG_DESKTOP_LOCALE";

pub(crate) const ZOOM_DEFAULT: f64 = 1.0;
pub(crate) const ZOOM_STEP: f64 = 0.1;
pub(crate) const ZOOM_MIN: f64 = 0.3;
pub(crate) const ZOOM_MAX: f64 = 3.0;
