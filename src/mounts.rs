#![allow(clippy::module_name_repetitions)]
//! Base mount set for flow containers: the project directory always comes first.

use std::fs::DirBuilder;
use std::path::{Path, PathBuf};

use crate::errors::FlowError;
use crate::paths::PathResolver;

/// Create `dir` and any missing parents. Mode 0777 (subject to umask) on Unix.
pub fn ensure_dir_all(dir: &Path) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(dir)
}

/// Resolve the project directory, make sure it exists on the host, and return it.
pub fn create_project_dir(resolver: &PathResolver, project_dir: &str) -> Result<PathBuf, FlowError> {
    let dir = resolver.resolve(project_dir)?;
    ensure_dir_all(&dir).map_err(|source| FlowError::DirectoryCreation {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Initial mount list: exactly one element, the resolved project directory.
pub fn base_mounts(resolver: &PathResolver, project_dir: &str) -> Result<Vec<PathBuf>, FlowError> {
    let dir = create_project_dir(resolver, project_dir)?;
    Ok(vec![dir])
}
