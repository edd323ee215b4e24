//! Host path resolution. Every directory that ends up in a mount list or a path flag
//! passes through [`PathResolver::resolve`].

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::errors::FlowError;

/// Resolves user-supplied paths against a base directory.
///
/// `PathResolver::current()` reads the process working directory on each call;
/// `PathResolver::rooted_at(dir)` pins the base (tests, or callers that captured the
/// working directory up front).
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    base: Option<PathBuf>,
}

impl PathResolver {
    pub fn current() -> Self {
        Self { base: None }
    }

    pub fn rooted_at(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn base_dir(&self) -> Result<PathBuf, FlowError> {
        match &self.base {
            Some(b) => Ok(b.clone()),
            None => env::current_dir().map_err(FlowError::PathResolution),
        }
    }

    /// Return `path` unchanged when it is absolute; otherwise join it onto the base
    /// directory. `""` and `"."` resolve to the base directory itself.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FlowError> {
        let p = Path::new(path);
        if p.is_absolute() && !path.is_empty() && path != "." {
            return Ok(p.to_path_buf());
        }
        let base = self.base_dir()?;
        Ok(clean_join(&base, p))
    }
}

/// Render a resolved path as a flag value. The value must name the same directory as the
/// mount, so paths that are not valid UTF-8 are rejected instead of lossily converted.
pub fn path_flag_value(p: &Path) -> Result<String, FlowError> {
    p.to_str()
        .map(str::to_string)
        .ok_or_else(|| FlowError::NonUtf8Path(p.to_path_buf()))
}

/// Join `rel` onto `base` and normalize lexically: `.` is dropped, `..` pops one
/// component (never above the root). Symlinks are not consulted.
fn clean_join(base: &Path, rel: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in base.components().chain(rel.components()) {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
