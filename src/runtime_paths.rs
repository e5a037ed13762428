use std::{
    env,
    path::{Path, PathBuf},
};

use tauri::{path::BaseDirectory, AppHandle, Manager};

use crate::{ASSET_DIR_NAME, ENTRY_DOCUMENT, PACKAGED_ROOT_DIR_NAME};

pub(crate) fn default_packaged_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(PACKAGED_ROOT_DIR_NAME))
}

pub(crate) fn is_asset_root(candidate: &Path) -> bool {
    candidate.join(ENTRY_DOCUMENT).is_file()
}

pub(crate) fn first_asset_root<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    candidates
        .into_iter()
        .find(|candidate| is_asset_root(candidate))
        .map(|root| root.canonicalize().unwrap_or(root))
}

fn resolve_resource_path(app: &AppHandle, relative_path: &str) -> Option<PathBuf> {
    app.path()
        .resolve(relative_path, BaseDirectory::Resource)
        .ok()
}

fn asset_root_candidates(app: &AppHandle, override_root: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(root) = override_root {
        candidates.push(root.to_path_buf());
    }
    if let Some(resource_root) = resolve_resource_path(app, ASSET_DIR_NAME) {
        candidates.push(resource_root);
    }
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(ASSET_DIR_NAME));
    }
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join(ASSET_DIR_NAME));
    }
    candidates
}

pub(crate) fn resolve_asset_root(
    app: &AppHandle,
    override_root: Option<&Path>,
) -> Result<PathBuf, String> {
    let candidates = asset_root_candidates(app, override_root);
    first_asset_root(candidates.clone()).ok_or_else(|| {
        let searched = candidates
            .iter()
            .map(|candidate| candidate.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Cannot locate web assets ({ENTRY_DOCUMENT} not found in: {searched})")
    })
}
