//! Flag and mount composition for flow invocations.
//!
//! Order matters: the project directory is mounted first (and stays at index 0), the
//! `project-dir` flag is known before any nested `config` query runs, global directories
//! are discovered one key at a time, and explicitly supplied local directories go last.

use std::path::{Path, PathBuf};

use crate::errors::FlowError;
use crate::executor::{decode_output, ContainerExecutor, ContainerRequest, FlagMap};
use crate::mounts::base_mounts;
use crate::paths::{path_flag_value, PathResolver};

pub const FLAG_PROJECT_DIR: &str = "project-dir";
pub const FLAG_AIRFLOW_HOME: &str = "airflow-home";
pub const FLAG_AIRFLOW_DAGS_FOLDER: &str = "airflow-dags-folder";
pub const FLAG_DATA_DIR: &str = "data-dir";

/// Command used for nested configuration lookups.
pub const CONFIG_COMMAND: &str = "config";

/// Global config keys whose directories must be mounted, queried in this order.
pub const GLOBAL_CONFIG_KEYS: [&str; 3] = ["airflow_home", "airflow_dags_folder", "data_dir"];

/// Which directory categories an operation needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountPlan {
    pub project_dir_flag: bool,
    pub airflow_home: bool,
    pub airflow_dags_folder: bool,
    pub data_dir: bool,
    pub global_dirs: bool,
}

/// Directories given on the command line. Empty means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalDirs {
    pub airflow_home: String,
    pub airflow_dags_folder: String,
    pub data_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub flags: FlagMap,
    pub mounts: Vec<PathBuf>,
}

impl Composition {
    /// Resolved project directory (always the first mount).
    pub fn project_dir(&self) -> &Path {
        &self.mounts[0]
    }
}

/// Run `config <key>` inside the container and append the reported directory to `mounts`.
///
/// On error `mounts` may already hold earlier keys' directories; callers must discard it.
pub fn query_global_key(
    executor: &dyn ContainerExecutor,
    key: &str,
    flags: &FlagMap,
    mounts: &mut Vec<PathBuf>,
) -> Result<(), FlowError> {
    let command = vec![CONFIG_COMMAND.to_string()];
    let args = vec![key.to_string()];
    let outcome = executor
        .execute(&ContainerRequest {
            command: &command,
            args: &args,
            flags,
            mounts: mounts.as_slice(),
            capture_output: true,
        })
        .map_err(|source| FlowError::SubInvocation {
            command: command.clone(),
            source,
        })?;
    if outcome.exit_code != 0 {
        return Err(FlowError::NonZeroExit(outcome.exit_code));
    }
    let dir = decode_output(outcome.output)
        .map_err(|source| FlowError::OutputDecode { command, source })?;
    let dir = dir.trim();
    tracing::debug!(key, dir, "resolved global config directory");
    mounts.push(PathBuf::from(dir));
    Ok(())
}

pub struct Composer<'a> {
    executor: &'a dyn ContainerExecutor,
    resolver: &'a PathResolver,
}

impl<'a> Composer<'a> {
    pub fn new(executor: &'a dyn ContainerExecutor, resolver: &'a PathResolver) -> Self {
        Self { executor, resolver }
    }

    /// Build the flag map and mount list for one invocation.
    pub fn compose(
        &self,
        project_dir: &str,
        plan: MountPlan,
        local: &LocalDirs,
    ) -> Result<Composition, FlowError> {
        let mut flags = FlagMap::new();
        let mut mounts = base_mounts(self.resolver, project_dir)?;

        if plan.project_dir_flag {
            let resolved = self.resolver.resolve(project_dir)?;
            flags.insert(FLAG_PROJECT_DIR.to_string(), path_flag_value(&resolved)?);
        }

        if plan.global_dirs {
            let mut config_flags = FlagMap::new();
            config_flags.insert(FLAG_PROJECT_DIR.to_string(), path_flag_value(&mounts[0])?);
            for key in GLOBAL_CONFIG_KEYS {
                query_global_key(self.executor, key, &config_flags, &mut mounts).map_err(
                    |e| {
                        tracing::warn!(key, error = %e, "global config query failed");
                        FlowError::GlobalConfigKey {
                            key,
                            source: Box::new(e),
                        }
                    },
                )?;
            }
        }

        let optional = [
            (plan.airflow_home, local.airflow_home.as_str(), FLAG_AIRFLOW_HOME),
            (
                plan.airflow_dags_folder,
                local.airflow_dags_folder.as_str(),
                FLAG_AIRFLOW_DAGS_FOLDER,
            ),
            (plan.data_dir, local.data_dir.as_str(), FLAG_DATA_DIR),
        ];
        for (wanted, value, flag) in optional {
            if !wanted || value.is_empty() {
                continue;
            }
            let abs = self.resolver.resolve(value)?;
            flags.insert(flag.to_string(), path_flag_value(&abs)?);
            mounts.push(abs);
        }

        tracing::debug!(?flags, ?mounts, "composed flow invocation");
        Ok(Composition { flags, mounts })
    }
}
