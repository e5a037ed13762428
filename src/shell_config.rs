use std::{env, path::PathBuf};

use crate::{ASSET_ROOT_ENV, DEVTOOLS_ENV, DEVTOOLS_FLAG, SERVER_PREFERENCE_ENV};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServerPreference {
    Auto,
    Static,
    Basic,
}

impl ServerPreference {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Some(Self::Auto),
            "static" | "rich" => Some(Self::Static),
            "basic" | "portable" => Some(Self::Basic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ShellConfig {
    pub(crate) dev_tools: bool,
    pub(crate) server_preference: ServerPreference,
    pub(crate) asset_root_override: Option<PathBuf>,
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl ShellConfig {
    pub(crate) fn from_sources<I, S, F>(args: I, lookup_env: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let dev_flag = args.into_iter().any(|arg| arg.as_ref() == DEVTOOLS_FLAG);
        let dev_env = lookup_env(DEVTOOLS_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        let server_preference = match lookup_env(SERVER_PREFERENCE_ENV) {
            Some(raw) => ServerPreference::parse(&raw).unwrap_or_else(|| {
                crate::append_startup_log(&format!(
                    "unsupported {SERVER_PREFERENCE_ENV} value '{raw}', using auto"
                ));
                ServerPreference::Auto
            }),
            None => ServerPreference::Auto,
        };

        let asset_root_override = lookup_env(ASSET_ROOT_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            dev_tools: dev_flag || dev_env,
            server_preference,
            asset_root_override,
        }
    }

    pub(crate) fn from_process() -> Self {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }
}
