use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // Re-run build script when this file changes
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=AIFO_FLOW_BUILD_IMAGE");
    println!("cargo:rerun-if-env-changed=AIFO_FLOW_BUILD_IMAGE_FILE");

    // Optional: bake in a default flow image reference from external configuration.
    // Priority:
    //   1) AIFO_FLOW_BUILD_IMAGE_FILE: first non-empty line = image reference
    //   2) AIFO_FLOW_BUILD_IMAGE (env value)
    if let Ok(path) = std::env::var("AIFO_FLOW_BUILD_IMAGE_FILE") {
        println!("cargo:rerun-if-changed={path}");
        if let Ok(contents) = std::fs::read_to_string(&path) {
            if let Some(image) = contents.lines().map(|l| l.trim()).find(|l| !l.is_empty()) {
                println!("cargo:rustc-env=AIFO_FLOW_DEFAULT_IMAGE={image}");
            }
        }
    } else if let Ok(val) = std::env::var("AIFO_FLOW_BUILD_IMAGE") {
        let trimmed = val.trim();
        if !trimmed.is_empty() {
            println!("cargo:rustc-env=AIFO_FLOW_DEFAULT_IMAGE={trimmed}");
        }
    }

    // Build date (UTC ISO-8601). Fallback to unix:<secs> if `date` is unavailable.
    let build_date = Command::new("date")
        .args(["-u", "+%Y-%m-%dT%H:%M:%SZ"])
        .output()
        .ok()
        .and_then(|o| {
            if o.status.success() {
                Some(String::from_utf8_lossy(&o.stdout).trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_else(|_| std::time::Duration::from_secs(0))
                .as_secs();
            format!("unix:{secs}")
        });
    println!("cargo:rustc-env=AIFO_FLOW_BUILD_DATE={build_date}");

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=AIFO_FLOW_BUILD_TARGET={target}");

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=AIFO_FLOW_BUILD_PROFILE={profile}");
}
