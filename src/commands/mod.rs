use std::process::ExitCode;

use aifo_flow::{ContainerExecutor, FlowRunner, Operation, PathResolver, Settings};

use crate::doctor::run_doctor;

/// Ordinary command path: errors are reported and mapped to an exit status.
pub fn run_operation(executor: &dyn ContainerExecutor, op: &Operation) -> ExitCode {
    let runner = FlowRunner::new(executor, PathResolver::current());
    match runner.execute(op) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            let use_err = aifo_flow::color_enabled_stderr();
            tracing::debug!(command = op.command.as_str(), error = ?e, "flow command failed");
            aifo_flow::log_error_stderr(use_err, &format!("aifo-flow: {e}"));
            ExitCode::from(aifo_flow::exit_code_for_flow_error(&e))
        }
    }
}

/// Help path: rendered by the flow tool; any failure aborts.
pub fn run_help(executor: &dyn ContainerExecutor, tokens: &[String]) -> ExitCode {
    aifo_flow::render_help_or_abort(executor, tokens);
    ExitCode::from(0)
}

pub fn run_doctor_command(settings: &Settings) -> ExitCode {
    run_doctor(settings);
    ExitCode::from(0)
}
