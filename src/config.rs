#![allow(clippy::module_name_repetitions)]
//! Launcher settings gathered from CLI overrides and the environment.
//!
//! Rules
//! - CLI overrides win over environment variables; environment wins over built-in defaults.
//! - Empty or whitespace-only environment values count as unset.
//! - Nothing here touches the network or the container runtime; values are plain strings.

use std::env;

/// Default image name (without registry prefix or tag).
pub const DEFAULT_IMAGE_PREFIX: &str = "aifo-flow-sql";

/// Trimmed env getter returning Some when non-empty.
pub(crate) fn env_trim(k: &str) -> Option<String> {
    env::var(k)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Normalize a registry prefix: "" stays empty, otherwise exactly one trailing '/'.
pub fn normalize_registry_prefix(raw: &str) -> String {
    let t = raw.trim();
    if t.is_empty() {
        String::new()
    } else {
        let mut s = t.trim_end_matches('/').to_string();
        s.push('/');
        s
    }
}

/// Effective image reference.
///
/// Precedence: explicit override, `AIFO_FLOW_IMAGE`, build-time default, then
/// `{AIFO_FLOW_REGISTRY}{AIFO_FLOW_IMAGE_PREFIX}:{AIFO_FLOW_IMAGE_TAG}`.
pub fn default_image(override_image: Option<&str>) -> String {
    if let Some(img) = override_image.map(str::trim).filter(|s| !s.is_empty()) {
        return img.to_string();
    }
    if let Some(img) = env_trim("AIFO_FLOW_IMAGE") {
        return img;
    }
    if let Some(img) = option_env!("AIFO_FLOW_DEFAULT_IMAGE") {
        if !img.trim().is_empty() {
            return img.trim().to_string();
        }
    }
    let name = env_trim("AIFO_FLOW_IMAGE_PREFIX").unwrap_or_else(|| DEFAULT_IMAGE_PREFIX.to_string());
    let tag = env_trim("AIFO_FLOW_IMAGE_TAG")
        .unwrap_or_else(|| format!("release-{}", env!("CARGO_PKG_VERSION")));
    let registry = normalize_registry_prefix(&env::var("AIFO_FLOW_REGISTRY").unwrap_or_default());
    format!("{registry}{name}:{tag}")
}

/// Per-invocation launcher settings. Read once in `main` and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub image: String,
    /// Preview streamed runs instead of executing them.
    pub dry_run: bool,
}

impl Settings {
    pub fn from_env(image_override: Option<&str>, dry_run: bool) -> Self {
        Self {
            image: default_image(image_override),
            dry_run,
        }
    }
}
