mod app_constants;
mod app_runtime;
mod app_types;
mod asset_server;
mod basic_http;
mod basic_server;
mod content_types;
mod exit_events;
mod external_links;
mod lifecycle;
mod logging;
mod main_window;
mod menu_actions;
mod menu_handler;
mod menu_setup;
mod portable_api;
mod runtime_paths;
mod server_lifecycle;
mod shell_config;
mod shell_locale;
#[cfg(feature = "static-server")]
mod static_server;
mod window_actions;

pub mod android_build;
pub mod build_artifact;
pub mod build_pipeline;

pub(crate) use app_constants::*;
pub(crate) use app_types::ShellState;
pub(crate) use logging::{
    append_desktop_log, append_server_log, append_shutdown_log, append_startup_log,
};

pub fn run() {
    app_runtime::run();
}
