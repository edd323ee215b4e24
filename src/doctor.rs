use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

use aifo_flow::Settings;

fn docker_version(runtime: &Path) -> Result<String> {
    let out = Command::new(runtime)
        .arg("--version")
        .output()
        .with_context(|| format!("failed to run {} --version", runtime.display()))?;
    if !out.status.success() {
        bail!("{} --version exited with {}", runtime.display(), out.status);
    }
    Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn highlight(s: &str) -> String {
    aifo_flow::paint(aifo_flow::color_enabled_stderr(), "\x1b[34;1m", s)
}

pub fn run_doctor(settings: &Settings) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("aifo-flow doctor");
    eprintln!();
    eprintln!("  version: v{}", version);
    eprintln!(
        "  host:    {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    eprintln!(
        "  build:   {} ({}, {})",
        env!("AIFO_FLOW_BUILD_TARGET"),
        env!("AIFO_FLOW_BUILD_PROFILE"),
        env!("AIFO_FLOW_BUILD_DATE")
    );
    eprintln!();

    let runtime = aifo_flow::container_runtime_path();
    match &runtime {
        Ok(p) => {
            eprintln!("  docker: {}", highlight(&p.display().to_string()));
            match docker_version(p) {
                Ok(v) if !v.is_empty() => eprintln!("  docker --version: {}", v),
                Ok(_) => {}
                Err(e) => eprintln!("  docker --version: unavailable ({e:#})"),
            }
        }
        Err(e) => {
            aifo_flow::log_warn_stderr(
                aifo_flow::color_enabled_stderr(),
                &format!("  docker: not found ({e})"),
            );
        }
    }
    eprintln!();

    eprintln!("  image:  {}", highlight(&settings.image));
    if let Ok(p) = &runtime {
        let present = if aifo_flow::image_exists(p, &settings.image) {
            "yes"
        } else {
            "no (will be pulled on first run)"
        };
        eprintln!("  image present locally: {}", present);
    }
    eprintln!();

    eprintln!("doctor: completed diagnostics.");
}
