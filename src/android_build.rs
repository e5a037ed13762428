use std::{env, path::Path, process::ExitCode};

use crate::{
    build_artifact::{self, ArtifactReport},
    build_pipeline::{self, BuildError, BuildStep, ShellStepRunner, StepRunner},
};

pub const APK_FEATURES: [&str; 4] = [
    "GeckoView engine (Firefox)",
    "Mobile optimizations",
    "Improved dropdowns",
    "Native scrolling",
];

fn gradle_command() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat assembleDebug"
    } else {
        "./gradlew assembleDebug"
    }
}

pub fn android_steps() -> Vec<BuildStep> {
    vec![
        BuildStep::new("Copying web files to www/", "npm run copy-www"),
        BuildStep::new("Syncing Capacitor Android project", "npx cap sync android"),
        BuildStep::new("Building debug APK with GeckoView", gradle_command())
            .in_dir(build_pipeline::ANDROID_PROJECT_DIR),
    ]
}

// The APK must exist even when every step succeeded.
pub fn run<R, F>(root: &Path, runner: &mut R, report: F) -> Result<ArtifactReport, BuildError>
where
    R: StepRunner + ?Sized,
    F: Fn(&str),
{
    build_pipeline::check_project_markers(root)?;
    build_pipeline::run_steps(&android_steps(), root, runner, &report)?;
    build_artifact::inspect_artifact(&build_artifact::debug_apk_path(root))
}

pub fn success_summary(artifact: &ArtifactReport, root: &Path) -> Vec<String> {
    let display_path = artifact
        .path
        .strip_prefix(root)
        .unwrap_or(&artifact.path)
        .display()
        .to_string();

    let mut lines = vec![
        "Build succeeded".to_string(),
        "===============".to_string(),
        format!("APK: {display_path}"),
        format!("Size: {} MB", artifact.size_label()),
        format!("Modified: {}", artifact.modified_label()),
        String::new(),
        "Features:".to_string(),
    ];
    lines.extend(APK_FEATURES.iter().map(|feature| format!("  - {feature}")));
    lines
}

pub fn run_cli() -> ExitCode {
    println!("Fantasy Map Generator - Android build (GeckoView)");
    println!("=================================================");

    let root = match env::current_dir() {
        Ok(root) => root,
        Err(error) => {
            eprintln!("Error: cannot read the current directory: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut runner = ShellStepRunner;
    match run(&root, &mut runner, |line| println!("{line}")) {
        Ok(artifact) => {
            println!();
            for line in success_summary(&artifact, &root) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(error @ BuildError::StepFailed { .. }) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs};

    use super::*;

    struct FakeGradle {
        executed: Vec<String>,
        writes_apk: bool,
    }

    impl StepRunner for FakeGradle {
        fn run(&mut self, step: &BuildStep, root: &Path) -> Result<(), String> {
            self.executed.push(step.command.clone());
            if self.writes_apk && step.working_dir.is_some() {
                let apk = build_artifact::debug_apk_path(root);
                fs::create_dir_all(apk.parent().ok_or("apk has no parent")?)
                    .map_err(|error| error.to_string())?;
                fs::write(&apk, vec![1_u8; 2048]).map_err(|error| error.to_string())?;
            }
            Ok(())
        }
    }

    fn project_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().expect("tempdir");
        fs::write(root.path().join("package.json"), "{}").expect("manifest");
        fs::create_dir(root.path().join("android")).expect("android dir");
        root
    }

    #[test]
    fn android_steps_run_in_fixed_order() {
        let steps = android_steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].command, "npm run copy-www");
        assert_eq!(steps[1].command, "npx cap sync android");
        assert!(steps[2].command.contains("gradlew"));
        assert!(steps[2].command.ends_with("assembleDebug"));
        assert_eq!(
            steps[2].working_dir.as_deref(),
            Some(Path::new("android"))
        );
    }

    #[test]
    fn run_refuses_to_start_outside_project_root() {
        let root = tempfile::tempdir().expect("tempdir");
        let mut runner = FakeGradle {
            executed: Vec::new(),
            writes_apk: true,
        };

        let error = run(root.path(), &mut runner, |_| {}).expect_err("missing markers");
        assert!(matches!(error, BuildError::MissingProjectMarker { .. }));
        assert!(runner.executed.is_empty());
    }

    #[test]
    fn run_fails_when_apk_is_missing_after_successful_steps() {
        let root = project_root();
        let mut runner = FakeGradle {
            executed: Vec::new(),
            writes_apk: false,
        };

        let error = run(root.path(), &mut runner, |_| {}).expect_err("no apk");
        assert_eq!(runner.executed.len(), 3);
        assert!(matches!(error, BuildError::MissingArtifact { .. }));
    }

    #[test]
    fn run_reports_artifact_and_summary() {
        let root = project_root();
        let mut runner = FakeGradle {
            executed: Vec::new(),
            writes_apk: true,
        };
        let progress = RefCell::new(Vec::new());

        let artifact = run(root.path(), &mut runner, |line| {
            progress.borrow_mut().push(line.to_string())
        })
        .expect("build succeeds");

        assert_eq!(artifact.size_bytes, 2048);
        assert_eq!(progress.borrow()[0], "[1/3] Copying web files to www/");

        let summary = success_summary(&artifact, root.path());
        assert!(summary
            .iter()
            .any(|line| line.starts_with("APK: android") && line.ends_with("app-debug.apk")));
        assert!(summary.contains(&"Size: 0.00 MB".to_string()));
        assert!(summary.contains(&"  - Native scrolling".to_string()));
    }
}
