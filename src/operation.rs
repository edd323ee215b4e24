#![allow(clippy::module_name_repetitions)]
//! Operation descriptors and per-command execution.
//!
//! An [`Operation`] is built once from the command line and never mutated; [`FlowRunner`]
//! turns it into a composition and a single dispatched container run.

use crate::compose::{Composer, LocalDirs, MountPlan};
use crate::dispatch::dispatch;
use crate::errors::FlowError;
use crate::executor::ContainerExecutor;
use crate::paths::{path_flag_value, PathResolver};

pub const FLAG_ENV: &str = "env";
pub const FLAG_CONNECTION: &str = "connection";

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FlowCommand {
    About,
    Version,
    Init,
    Config,
    Validate,
    Generate,
    Run,
}

impl FlowCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowCommand::About => "about",
            FlowCommand::Version => "version",
            FlowCommand::Init => "init",
            FlowCommand::Config => "config",
            FlowCommand::Validate => "validate",
            FlowCommand::Generate => "generate",
            FlowCommand::Run => "run",
        }
    }

    /// Directory requirements per command.
    pub fn mount_plan(&self) -> MountPlan {
        match self {
            FlowCommand::About | FlowCommand::Version | FlowCommand::Validate => {
                MountPlan::default()
            }
            FlowCommand::Init => MountPlan {
                airflow_home: true,
                airflow_dags_folder: true,
                data_dir: true,
                ..MountPlan::default()
            },
            FlowCommand::Config => MountPlan {
                project_dir_flag: true,
                ..MountPlan::default()
            },
            FlowCommand::Generate | FlowCommand::Run => MountPlan {
                project_dir_flag: true,
                global_dirs: true,
                ..MountPlan::default()
            },
        }
    }

    /// Name of the positional argument the command cannot run without.
    pub fn required_argument(&self) -> Option<&'static str> {
        match self {
            FlowCommand::Config => Some("key"),
            FlowCommand::Generate | FlowCommand::Run => Some("workflow_name"),
            _ => None,
        }
    }

    fn forwards_env(&self) -> bool {
        matches!(
            self,
            FlowCommand::Config | FlowCommand::Validate | FlowCommand::Generate | FlowCommand::Run
        )
    }

    /// Commands whose positional argument names the project directory.
    fn positional_is_project_dir(&self) -> bool {
        matches!(self, FlowCommand::Init | FlowCommand::Validate)
    }
}

/// `--generate-tasks` / `--no-generate-tasks`; at most one may be given.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TaskGeneration {
    #[default]
    Unset,
    Generate,
    Skip,
}

impl TaskGeneration {
    fn token(&self) -> Option<&'static str> {
        match self {
            TaskGeneration::Unset => None,
            TaskGeneration::Generate => Some("--generate-tasks"),
            TaskGeneration::Skip => Some("--no-generate-tasks"),
        }
    }
}

/// Everything one invocation needs, captured up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub command: FlowCommand,
    pub positional: Option<String>,
    pub project_dir: String,
    pub local_dirs: LocalDirs,
    pub env: Option<String>,
    pub connection: Option<String>,
    pub verbose: bool,
    pub task_generation: TaskGeneration,
    pub debug: bool,
}

impl Operation {
    pub fn new(command: FlowCommand) -> Self {
        Self {
            command,
            positional: None,
            project_dir: String::new(),
            local_dirs: LocalDirs::default(),
            env: None,
            connection: None,
            verbose: false,
            task_generation: TaskGeneration::Unset,
            debug: false,
        }
    }

    /// Project directory after applying a positional override (init, validate).
    fn effective_project_dir(&self) -> &str {
        match (&self.positional, self.command.positional_is_project_dir()) {
            (Some(p), true) => p,
            _ => &self.project_dir,
        }
    }
}

pub struct FlowRunner<'a> {
    executor: &'a dyn ContainerExecutor,
    resolver: PathResolver,
}

impl<'a> FlowRunner<'a> {
    pub fn new(executor: &'a dyn ContainerExecutor, resolver: PathResolver) -> Self {
        Self { executor, resolver }
    }

    /// Validate, compose, and dispatch one operation.
    pub fn execute(&self, op: &Operation) -> Result<(), FlowError> {
        if let Some(name) = op.command.required_argument() {
            if op.positional.as_deref().map_or(true, str::is_empty) {
                return Err(FlowError::MissingArgument(name));
            }
        }

        let composition = Composer::new(self.executor, &self.resolver).compose(
            op.effective_project_dir(),
            op.command.mount_plan(),
            &op.local_dirs,
        )?;
        let mut flags = composition.flags.clone();
        let project_dir = path_flag_value(composition.project_dir())?;

        let mut args: Vec<String> = if op.command.positional_is_project_dir() {
            vec![project_dir]
        } else {
            op.positional.iter().cloned().collect()
        };

        if op.command.forwards_env() {
            if let Some(env) = op.env.as_deref().filter(|e| !e.is_empty()) {
                flags.insert(FLAG_ENV.to_string(), env.to_string());
            }
        }

        match op.command {
            FlowCommand::Validate => {
                if let Some(conn) = op.connection.as_deref().filter(|c| !c.is_empty()) {
                    flags.insert(FLAG_CONNECTION.to_string(), conn.to_string());
                }
                if op.verbose {
                    args.push("--verbose".to_string());
                }
            }
            FlowCommand::Generate => {
                args.extend(op.task_generation.token().map(str::to_string));
                if op.verbose {
                    args.push("--verbose".to_string());
                }
            }
            FlowCommand::Run => {
                if op.verbose {
                    args.push("--verbose".to_string());
                }
                args.extend(op.task_generation.token().map(str::to_string));
            }
            _ => {}
        }

        dispatch(
            self.executor,
            op.command.as_str(),
            &args,
            &flags,
            &composition.mounts,
            op.debug,
        )
    }
}
