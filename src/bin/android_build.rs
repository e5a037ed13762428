use std::process::ExitCode;

fn main() -> ExitCode {
    fmg_desktop_lib::android_build::run_cli()
}
