use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::build_pipeline::BuildError;

const DEBUG_APK_SEGMENTS: [&str; 7] = [
    "android",
    "app",
    "build",
    "outputs",
    "apk",
    "debug",
    "app-debug.apk",
];

pub fn debug_apk_path(root: &Path) -> PathBuf {
    DEBUG_APK_SEGMENTS
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}

pub fn size_mb_label(size_bytes: u64) -> String {
    format!("{:.2}", size_bytes as f64 / 1024.0 / 1024.0)
}

impl ArtifactReport {
    pub fn size_label(&self) -> String {
        size_mb_label(self.size_bytes)
    }

    pub fn modified_label(&self) -> String {
        self.modified.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

pub fn inspect_artifact(path: &Path) -> Result<ArtifactReport, BuildError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => {
            return Err(BuildError::MissingArtifact {
                path: path.to_path_buf(),
            })
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(BuildError::MissingArtifact {
                path: path.to_path_buf(),
            })
        }
        Err(error) => {
            return Err(BuildError::ArtifactUnreadable {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })
        }
    };

    let modified = metadata
        .modified()
        .map_err(|error| BuildError::ArtifactUnreadable {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

    Ok(ArtifactReport {
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        modified: DateTime::<Local>::from(modified),
    })
}
