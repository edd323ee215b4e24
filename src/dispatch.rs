//! Dispatch of the user's operation into the flow container.

use std::path::PathBuf;

use crate::errors::FlowError;
use crate::executor::{ContainerExecutor, ContainerRequest, FlagMap};

/// Leading command tokens: `[name]`, or `["--debug", name]` in debug mode.
pub fn command_tokens(name: &str, debug: bool) -> Vec<String> {
    if debug {
        vec!["--debug".to_string(), name.to_string()]
    } else {
        vec![name.to_string()]
    }
}

/// Run `tokens args --flag value...` in the container with output streamed to the terminal.
pub fn run_streaming(
    executor: &dyn ContainerExecutor,
    tokens: Vec<String>,
    args: &[String],
    flags: &FlagMap,
    mounts: &[PathBuf],
) -> Result<(), FlowError> {
    tracing::debug!(command = ?tokens, ?args, mounts = mounts.len(), "dispatching flow command");
    let outcome = executor
        .execute(&ContainerRequest {
            command: &tokens,
            args,
            flags,
            mounts,
            capture_output: false,
        })
        .map_err(|source| FlowError::Dispatch {
            command: tokens.clone(),
            source,
        })?;
    if outcome.exit_code != 0 {
        return Err(FlowError::NonZeroExit(outcome.exit_code));
    }
    Ok(())
}

pub fn dispatch(
    executor: &dyn ContainerExecutor,
    name: &str,
    args: &[String],
    flags: &FlagMap,
    mounts: &[PathBuf],
    debug: bool,
) -> Result<(), FlowError> {
    run_streaming(executor, command_tokens(name, debug), args, flags, mounts)
}

/// Forward a help request (`tokens` as typed by the user) to the containerized tool,
/// which owns all help text. No flags, no mounts.
pub fn dispatch_help(executor: &dyn ContainerExecutor, tokens: &[String]) -> Result<(), FlowError> {
    run_streaming(executor, tokens.to_vec(), &[], &FlagMap::new(), &[])
}

/// Help rendering has no error channel: any failure here is fatal.
///
/// This is the only place a `FlowError` becomes a panic (an abort in release builds).
pub fn render_help_or_abort(executor: &dyn ContainerExecutor, tokens: &[String]) {
    if let Err(e) = dispatch_help(executor, tokens) {
        panic!("{e}");
    }
}
