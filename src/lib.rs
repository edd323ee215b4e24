//! aifo-flow: run the SQL flow CLI inside Docker with the right host directories mounted.
//!
//! The library owns the orchestration: resolve paths, build the mount set, discover global
//! directories through nested `config` queries, and dispatch the requested command. The
//! container runtime is reached only through [`ContainerExecutor`].

mod color;
pub mod compose;
mod config;
pub mod dispatch;
mod docker;
mod errors;
pub mod executor;
pub mod mounts;
pub mod operation;
pub mod paths;
mod telemetry;
mod util;

pub use color::*;
pub use compose::{
    query_global_key, Composer, Composition, LocalDirs, MountPlan, GLOBAL_CONFIG_KEYS,
};
pub use config::{default_image, normalize_registry_prefix, Settings};
pub use dispatch::{command_tokens, dispatch, dispatch_help, render_help_or_abort};
pub use docker::{bind_spec, container_runtime_path, image_exists, DockerExecutor};
pub use errors::{exit_code_for_flow_error, exit_code_for_io_error, FlowError};
pub use executor::{decode_output, ContainerExecutor, ContainerOutcome, ContainerRequest, FlagMap};
pub use operation::{FlowCommand, FlowRunner, Operation, TaskGeneration};
pub use paths::PathResolver;
pub use telemetry::telemetry_init;
pub use util::{shell_escape, shell_join};
