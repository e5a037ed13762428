use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{runtime_paths, DESKTOP_LOG_FILE, DESKTOP_LOG_MAX_BYTES};

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => root.join("logs").join(file_name),
        None => std::env::temp_dir()
            .join("fantasy-map-generator")
            .join(file_name),
    }
}

fn rotated_log_path(log_path: &Path) -> PathBuf {
    let mut rotated = log_path.as_os_str().to_owned();
    rotated.push(".1");
    PathBuf::from(rotated)
}

fn rotate_if_oversized(log_path: &Path, max_bytes: u64) -> Result<(), String> {
    let Ok(metadata) = fs::metadata(log_path) else {
        return Ok(());
    };
    if metadata.len() < max_bytes {
        return Ok(());
    }

    let rotated = rotated_log_path(log_path);
    match fs::remove_file(&rotated) {
        Err(error) if error.kind() != io::ErrorKind::NotFound => {
            return Err(format!(
                "Failed to remove rotated log {}: {}",
                rotated.display(),
                error
            ));
        }
        _ => {}
    }
    fs::rename(log_path, &rotated).map_err(|error| {
        format!(
            "Failed to rotate log {} to {}: {}",
            log_path.display(),
            rotated.display(),
            error
        )
    })
}

pub(crate) fn format_log_line(scope: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        scope,
        message
    )
}

pub(crate) fn append_log_line(
    log_path: &Path,
    max_bytes: u64,
    scope: &str,
    message: &str,
) -> Result<(), String> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }

    if let Err(error) = rotate_if_oversized(log_path, max_bytes) {
        eprintln!("{error}");
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| format!("Failed to open log {}: {}", log_path.display(), error))?;
    writeln!(file, "{}", format_log_line(scope, message))
        .map_err(|error| format!("Failed to write log {}: {}", log_path.display(), error))
}

fn append_scoped_log(scope: &str, message: &str) {
    if cfg!(debug_assertions) {
        eprintln!("[{scope}] {message}");
    }

    let log_path = resolve_desktop_log_path(
        runtime_paths::default_packaged_root_dir(),
        DESKTOP_LOG_FILE,
    );
    if let Err(error) = append_log_line(&log_path, DESKTOP_LOG_MAX_BYTES, scope, message) {
        eprintln!("{error}");
    }
}

pub fn append_desktop_log(message: &str) {
    append_scoped_log("desktop", message);
}

pub fn append_startup_log(message: &str) {
    append_scoped_log("startup", message);
}

pub fn append_shutdown_log(message: &str) {
    append_scoped_log("shutdown", message);
}

pub fn append_server_log(message: &str) {
    append_scoped_log("server", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_desktop_log_path_uses_logs_dir_under_root() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/opt/fmg")), "desktop.log");
        assert_eq!(path, PathBuf::from("/opt/fmg/logs/desktop.log"));
    }

    #[test]
    fn resolve_desktop_log_path_falls_back_to_temp_dir() {
        let path = resolve_desktop_log_path(None, "desktop.log");
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with("desktop.log"));
    }

    #[test]
    fn append_log_line_creates_parent_and_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("logs").join("desktop.log");

        append_log_line(&log_path, 1024, "desktop", "first").expect("first write");
        append_log_line(&log_path, 1024, "server", "second").expect("second write");

        let content = fs::read_to_string(&log_path).expect("read log");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[desktop] first"));
        assert!(lines[1].ends_with("[server] second"));
    }

    #[test]
    fn append_log_line_rotates_oversized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("desktop.log");
        fs::write(&log_path, "x".repeat(64)).expect("seed log");

        append_log_line(&log_path, 32, "desktop", "after rotation").expect("write");

        let rotated = fs::read_to_string(rotated_log_path(&log_path)).expect("rotated log");
        assert_eq!(rotated.len(), 64);
        let current = fs::read_to_string(&log_path).expect("current log");
        assert!(current.trim_end().ends_with("after rotation"));
    }

    #[test]
    fn failed_rotation_is_reported_and_logging_continues() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("desktop.log");
        fs::write(&log_path, "x".repeat(64)).expect("seed log");
        let blocked = rotated_log_path(&log_path);
        fs::create_dir(&blocked).expect("rotated path taken by a directory");
        fs::write(blocked.join("keep"), "x").expect("non-empty directory");

        let error = rotate_if_oversized(&log_path, 32).expect_err("rotation blocked");
        assert!(error.contains("desktop.log.1"));

        append_log_line(&log_path, 32, "desktop", "still written").expect("write");
        let current = fs::read_to_string(&log_path).expect("current log");
        assert!(current.trim_end().ends_with("still written"));
    }

    #[test]
    fn small_log_is_not_rotated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("desktop.log");
        fs::write(&log_path, "short").expect("seed log");

        rotate_if_oversized(&log_path, 1024).expect("no rotation needed");
        assert!(!rotated_log_path(&log_path).exists());
    }
}
