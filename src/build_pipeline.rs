use std::{
    fmt,
    path::{Path, PathBuf},
    process::Command,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStep {
    pub description: &'static str,
    pub command: String,
    // relative to the project root
    pub working_dir: Option<PathBuf>,
}

impl BuildStep {
    pub fn new(description: &'static str, command: impl Into<String>) -> Self {
        Self {
            description,
            command: command.into(),
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn resolve_dir(&self, root: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }
}

#[derive(Debug)]
pub enum BuildError {
    MissingProjectMarker { marker: &'static str, root: PathBuf },
    StepFailed {
        index: usize,
        description: &'static str,
        reason: String,
    },
    MissingArtifact { path: PathBuf },
    ArtifactUnreadable { path: PathBuf, reason: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProjectMarker { marker, root } => write!(
                f,
                "this tool must be run from the project root ({marker} not found in {})",
                root.display()
            ),
            Self::StepFailed {
                description,
                reason,
                ..
            } => write!(f, "Error in: {description}\n{reason}"),
            Self::MissingArtifact { path } => {
                write!(f, "could not find the generated APK at {}", path.display())
            }
            Self::ArtifactUnreadable { path, reason } => {
                write!(f, "could not inspect {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for BuildError {}

// Child stdio is inherited, never captured.
pub trait StepRunner {
    fn run(&mut self, step: &BuildStep, root: &Path) -> Result<(), String>;
}

#[derive(Debug, Default)]
pub struct ShellStepRunner;

impl ShellStepRunner {
    fn shell_command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl StepRunner for ShellStepRunner {
    fn run(&mut self, step: &BuildStep, root: &Path) -> Result<(), String> {
        let status = Self::shell_command(&step.command)
            .current_dir(step.resolve_dir(root))
            .status()
            .map_err(|error| format!("failed to start `{}`: {error}", step.command))?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("`{}` exited with {status}", step.command))
        }
    }
}

pub const PACKAGE_MANIFEST: &str = "package.json";
pub const ANDROID_PROJECT_DIR: &str = "android";

pub fn check_project_markers(root: &Path) -> Result<(), BuildError> {
    if !root.join(PACKAGE_MANIFEST).is_file() {
        return Err(BuildError::MissingProjectMarker {
            marker: PACKAGE_MANIFEST,
            root: root.to_path_buf(),
        });
    }
    if !root.join(ANDROID_PROJECT_DIR).is_dir() {
        return Err(BuildError::MissingProjectMarker {
            marker: ANDROID_PROJECT_DIR,
            root: root.to_path_buf(),
        });
    }
    Ok(())
}

pub fn run_steps<R, F>(
    steps: &[BuildStep],
    root: &Path,
    runner: &mut R,
    report: F,
) -> Result<(), BuildError>
where
    R: StepRunner + ?Sized,
    F: Fn(&str),
{
    let total = steps.len();
    for (index, step) in steps.iter().enumerate() {
        report(&format!("[{}/{}] {}", index + 1, total, step.description));
        runner
            .run(step, root)
            .map_err(|reason| BuildError::StepFailed {
                index,
                description: step.description,
                reason,
            })?;
        report(&format!("{} completed", step.description));
    }
    Ok(())
}
