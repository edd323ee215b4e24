use clap::{Args, Parser, Subcommand};

use aifo_flow::{FlowCommand, LocalDirs, Operation, TaskGeneration};

/// Options shared by `generate` and `run`.
#[derive(Args, Debug, Clone)]
pub(crate) struct WorkflowArgs {
    /// Workflow to operate on
    pub(crate) workflow_name: Option<String>,
    /// Generate tasks for the workflow's SQL files
    #[arg(long = "generate-tasks", conflicts_with = "no_generate_tasks")]
    pub(crate) generate_tasks: bool,
    /// Do not generate tasks for the workflow's SQL files
    #[arg(long = "no-generate-tasks")]
    pub(crate) no_generate_tasks: bool,
    /// Environment (profile) of the project to use
    #[arg(long = "env", default_value = "default")]
    pub(crate) env: String,
    /// Project directory
    #[arg(long = "project-dir", default_value = ".")]
    pub(crate) project_dir: String,
    /// Print detailed output
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl WorkflowArgs {
    fn task_generation(&self) -> TaskGeneration {
        if self.generate_tasks {
            TaskGeneration::Generate
        } else if self.no_generate_tasks {
            TaskGeneration::Skip
        } else {
            TaskGeneration::Unset
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum FlowCmd {
    /// Show information about the flow tool
    About {
        #[arg(hide = true)]
        arg: Option<String>,
    },
    /// Show the flow tool version
    Version {
        #[arg(hide = true)]
        arg: Option<String>,
    },
    /// Initialize a flow project
    Init {
        /// Project directory (default: current directory)
        project_dir: Option<String>,
        /// Airflow home directory to mount and record
        #[arg(long = "airflow-home", default_value = "")]
        airflow_home: String,
        /// Airflow DAGs folder to mount and record
        #[arg(long = "airflow-dags-folder", default_value = "")]
        airflow_dags_folder: String,
        /// Data directory to mount and record
        #[arg(long = "data-dir", default_value = "")]
        data_dir: String,
    },
    /// Read a project configuration key
    Config {
        /// Configuration key
        key: Option<String>,
        /// Project directory
        #[arg(long = "project-dir", default_value = ".")]
        project_dir: String,
        /// Environment (profile) of the project to use
        #[arg(long = "env", default_value = "default")]
        env: String,
    },
    /// Validate project connections
    Validate {
        /// Project directory (default: current directory)
        project_dir: Option<String>,
        /// Environment (profile) of the project to use
        #[arg(long = "env", default_value = "default")]
        env: String,
        /// Only validate this connection
        #[arg(long = "connection", default_value = "")]
        connection: String,
        /// Print detailed output
        #[arg(long)]
        verbose: bool,
    },
    /// Generate an Airflow DAG from a workflow
    Generate(WorkflowArgs),
    /// Run a workflow locally
    Run(WorkflowArgs),
    /// Check docker and image setup without starting the flow tool
    Doctor,
    /// Show help for a flow command
    Help {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        args: Vec<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "aifo-flow",
    version,
    about = "Run the SQL flow CLI inside Docker with project, Airflow and data directories mounted.",
    disable_help_flag = true,
    disable_help_subcommand = true,
    after_help = "Help for flow commands is rendered by the flow tool itself.\n"
)]
pub(crate) struct Cli {
    /// Run the flow tool in debug mode
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Override the flow image (full ref)
    #[arg(long, global = true)]
    pub(crate) image: Option<String>,

    /// Print the docker command instead of running it
    #[arg(long = "dry-run", global = true)]
    pub(crate) dry_run: bool,

    /// Colorize launcher messages: auto|always|never
    #[arg(long = "color", value_enum, global = true)]
    pub(crate) color: Option<aifo_flow::ColorMode>,

    /// Show help from the flow tool
    #[arg(short = 'h', long = "help", global = true)]
    pub(crate) help: bool,

    #[command(subcommand)]
    pub(crate) command: Option<FlowCmd>,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Invocation {
    /// A flow command with a recoverable error path.
    Command(Operation),
    /// Help text rendered by the flow tool; failures are fatal.
    Help(Vec<String>),
    Doctor,
}

/// Launcher-only options that take a value; never forwarded to the flow tool.
const LAUNCHER_VALUE_OPTS: &[&str] = &["--image", "--color"];
const LAUNCHER_SWITCHES: &[&str] = &["--dry-run"];

/// Raw arguments minus launcher-only options, for forwarding to the flow tool's help.
pub(crate) fn help_tokens(raw: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(raw.len());
    let mut skip_value = false;
    for a in raw {
        if skip_value {
            skip_value = false;
            continue;
        }
        if LAUNCHER_SWITCHES.contains(&a.as_str()) {
            continue;
        }
        if LAUNCHER_VALUE_OPTS.contains(&a.as_str()) {
            skip_value = true;
            continue;
        }
        if LAUNCHER_VALUE_OPTS
            .iter()
            .any(|o| a.starts_with(&format!("{o}=")))
        {
            continue;
        }
        out.push(a.clone());
    }
    out
}

impl Cli {
    /// Build the invocation. `raw` is the argument list without the program name.
    pub(crate) fn invocation(&self, raw: &[String]) -> Invocation {
        let Some(command) = self.command.clone() else {
            return Invocation::Help(help_tokens(raw));
        };
        // doctor never reaches the flow tool, not even for help.
        let op = match command {
            FlowCmd::Doctor => return Invocation::Doctor,
            FlowCmd::Help { .. } => return Invocation::Help(help_tokens(raw)),
            _ if self.help => return Invocation::Help(help_tokens(raw)),
            FlowCmd::About { arg } => Operation {
                positional: arg,
                ..Operation::new(FlowCommand::About)
            },
            FlowCmd::Version { arg } => Operation {
                positional: arg,
                ..Operation::new(FlowCommand::Version)
            },
            FlowCmd::Init {
                project_dir,
                airflow_home,
                airflow_dags_folder,
                data_dir,
            } => Operation {
                positional: project_dir,
                local_dirs: LocalDirs {
                    airflow_home,
                    airflow_dags_folder,
                    data_dir,
                },
                ..Operation::new(FlowCommand::Init)
            },
            FlowCmd::Config {
                key,
                project_dir,
                env,
            } => Operation {
                positional: key,
                project_dir,
                env: Some(env),
                ..Operation::new(FlowCommand::Config)
            },
            FlowCmd::Validate {
                project_dir,
                env,
                connection,
                verbose,
            } => Operation {
                positional: project_dir,
                env: Some(env),
                connection: Some(connection),
                verbose,
                ..Operation::new(FlowCommand::Validate)
            },
            FlowCmd::Generate(w) => workflow_operation(FlowCommand::Generate, w),
            FlowCmd::Run(w) => workflow_operation(FlowCommand::Run, w),
        };
        Invocation::Command(Operation {
            debug: self.debug,
            ..op
        })
    }
}

fn workflow_operation(command: FlowCommand, w: WorkflowArgs) -> Operation {
    Operation {
        task_generation: w.task_generation(),
        positional: w.workflow_name,
        project_dir: w.project_dir,
        env: Some(w.env),
        verbose: w.verbose,
        ..Operation::new(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Invocation {
        let mut full = vec!["aifo-flow"];
        full.extend_from_slice(args);
        let cli = Cli::try_parse_from(full).expect("parse");
        let raw: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        cli.invocation(&raw)
    }

    #[test]
    fn test_no_subcommand_is_help_with_empty_tokens() {
        assert_eq!(parse(&[]), Invocation::Help(Vec::new()));
    }

    #[test]
    fn test_subcommand_help_forwards_tokens_without_launcher_options() {
        assert_eq!(
            parse(&["--dry-run", "--image", "x:1", "run", "--help"]),
            Invocation::Help(vec!["run".to_string(), "--help".to_string()])
        );
        assert_eq!(
            parse(&["--color=never", "--debug", "init", "-h"]),
            Invocation::Help(vec![
                "--debug".to_string(),
                "init".to_string(),
                "-h".to_string()
            ])
        );
    }

    #[test]
    fn test_init_with_flags() {
        let Invocation::Command(op) = parse(&[
            "init",
            "proj",
            "--airflow-home",
            "/h",
            "--data-dir",
            "/d",
        ]) else {
            panic!("expected command");
        };
        assert_eq!(op.command, FlowCommand::Init);
        assert_eq!(op.positional.as_deref(), Some("proj"));
        assert_eq!(op.local_dirs.airflow_home, "/h");
        assert_eq!(op.local_dirs.airflow_dags_folder, "");
        assert_eq!(op.local_dirs.data_dir, "/d");
        assert!(!op.debug);
    }

    #[test]
    fn test_config_defaults() {
        let Invocation::Command(op) = parse(&["config", "airflow_home"]) else {
            panic!("expected command");
        };
        assert_eq!(op.project_dir, ".");
        assert_eq!(op.env.as_deref(), Some("default"));
        assert_eq!(op.positional.as_deref(), Some("airflow_home"));
    }

    #[test]
    fn test_run_with_debug_and_task_generation() {
        let Invocation::Command(op) = parse(&[
            "--debug",
            "run",
            "example_templating",
            "--env",
            "dev",
            "--project-dir",
            "/p",
            "--no-generate-tasks",
            "--verbose",
        ]) else {
            panic!("expected command");
        };
        assert_eq!(op.command, FlowCommand::Run);
        assert!(op.debug);
        assert!(op.verbose);
        assert_eq!(op.task_generation, TaskGeneration::Skip);
        assert_eq!(op.env.as_deref(), Some("dev"));
        assert_eq!(op.project_dir, "/p");
    }

    #[test]
    fn test_generate_task_flags_are_exclusive() {
        let res = Cli::try_parse_from([
            "aifo-flow",
            "generate",
            "wf",
            "--generate-tasks",
            "--no-generate-tasks",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_generate_without_workflow_parses() {
        let Invocation::Command(op) = parse(&["generate", "--project-dir", "/p"]) else {
            panic!("expected command");
        };
        assert_eq!(op.positional, None);
    }

    #[test]
    fn test_doctor() {
        assert_eq!(parse(&["doctor"]), Invocation::Doctor);
    }

    #[test]
    fn test_doctor_help_stays_local() {
        assert_eq!(parse(&["doctor", "--help"]), Invocation::Doctor);
        assert_eq!(parse(&["-h", "doctor"]), Invocation::Doctor);
    }

    #[test]
    fn test_help_subcommand_forwards_tokens() {
        assert_eq!(
            parse(&["help", "run"]),
            Invocation::Help(vec!["help".to_string(), "run".to_string()])
        );
        assert_eq!(
            parse(&["--image", "x:1", "help"]),
            Invocation::Help(vec!["help".to_string()])
        );
    }
}
