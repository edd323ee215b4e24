use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod doctor;

use cli::{Cli, Invocation};

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let cli = Cli::parse();

    if let Some(mode) = cli.color {
        aifo_flow::set_color_mode(mode);
    }
    aifo_flow::telemetry_init();

    let settings = aifo_flow::Settings::from_env(cli.image.as_deref(), cli.dry_run);
    let executor = aifo_flow::DockerExecutor::new(&settings);

    match cli.invocation(&raw) {
        Invocation::Doctor => commands::run_doctor_command(&settings),
        Invocation::Help(tokens) => commands::run_help(&executor, &tokens),
        Invocation::Command(op) => commands::run_operation(&executor, &op),
    }
}
