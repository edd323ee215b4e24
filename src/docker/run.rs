#![allow(clippy::module_name_repetitions)]
//! Docker `run` command construction, preview rendering and execution for the flow tool.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[cfg(unix)]
use nix::unistd::{getgid, getuid};

use crate::config::Settings;
use crate::docker::env::collect_env_flags;
use crate::docker::runtime::container_runtime_path;
use crate::executor::{ContainerExecutor, ContainerOutcome, ContainerRequest};
use crate::util::shell_join;

/// Bind spec mounting a host directory at the same path inside the container.
pub fn bind_spec(dir: &Path) -> OsString {
    let mut s = dir.as_os_str().to_os_string();
    s.push(":");
    s.push(dir.as_os_str());
    s
}

fn collect_user_flags() -> Vec<OsString> {
    let mut user_flags: Vec<OsString> = Vec::new();
    #[cfg(unix)]
    {
        let uid = getuid().as_raw();
        let gid = getgid().as_raw();
        user_flags.push(OsString::from("--user"));
        user_flags.push(OsString::from(format!("{uid}:{gid}")));
    }
    user_flags
}

fn collect_tty_flags(capture_output: bool) -> Vec<OsString> {
    // Captured runs must not allocate a TTY: it would merge stderr into the captured stream.
    if capture_output {
        return Vec::new();
    }
    let mut flags = Vec::new();
    if atty::is(atty::Stream::Stdin) {
        flags.push(OsString::from("-i"));
        if atty::is(atty::Stream::Stdout) {
            flags.push(OsString::from("-t"));
        }
    }
    flags
}

/// Executes the flow tool through the `docker` CLI.
#[derive(Debug, Clone)]
pub struct DockerExecutor {
    image: String,
    dry_run: bool,
    runtime: Option<PathBuf>,
}

impl DockerExecutor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            image: settings.image.clone(),
            dry_run: settings.dry_run,
            runtime: None,
        }
    }

    /// Use a fixed docker binary instead of discovering one per run.
    pub fn with_runtime(mut self, runtime: impl Into<PathBuf>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    fn runtime(&self) -> io::Result<PathBuf> {
        match &self.runtime {
            Some(p) => Ok(p.clone()),
            None => container_runtime_path(),
        }
    }

    /// Arguments after the docker binary:
    /// `run --rm [--user] [-i -t] -v d:d... [-e ...] <image> <command> <args> --flag value...`
    pub fn build_run_args(&self, request: &ContainerRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![OsString::from("run"), OsString::from("--rm")];
        args.extend(collect_user_flags());
        args.extend(collect_tty_flags(request.capture_output));
        for dir in request.mounts {
            args.push(OsString::from("-v"));
            args.push(bind_spec(dir));
        }
        args.extend(collect_env_flags());
        args.push(OsString::from(&self.image));
        args.extend(request.command.iter().map(OsString::from));
        args.extend(request.args.iter().map(OsString::from));
        for (name, value) in request.flags {
            args.push(OsString::from(format!("--{name}")));
            args.push(OsString::from(value));
        }
        args
    }

    /// Build the docker command and a shell-escaped preview string.
    pub fn build_docker_cmd(&self, request: &ContainerRequest<'_>) -> io::Result<(Command, String)> {
        let runtime = self.runtime()?;
        let run_args = self.build_run_args(request);
        let mut cmd = Command::new(&runtime);
        cmd.args(&run_args);

        let mut words = vec![runtime.display().to_string()];
        words.extend(run_args.iter().map(|a| a.to_string_lossy().into_owned()));
        Ok((cmd, shell_join(&words)))
    }
}

impl ContainerExecutor for DockerExecutor {
    fn execute(&self, request: &ContainerRequest<'_>) -> io::Result<ContainerOutcome> {
        let (mut cmd, preview) = self.build_docker_cmd(request)?;
        tracing::debug!(%preview, capture = request.capture_output, "docker run");

        if self.dry_run && !request.capture_output {
            let use_err = crate::color_enabled_stderr();
            crate::log_info_stderr(use_err, &format!("aifo-flow: docker: {preview}"));
            crate::log_info_stderr(use_err, "aifo-flow: dry-run requested; not executing Docker.");
            return Ok(ContainerOutcome::exited(0));
        }

        if request.capture_output {
            let out = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .output()?;
            Ok(ContainerOutcome {
                exit_code: out.status.code().unwrap_or(1),
                output: out.stdout,
            })
        } else {
            let status = cmd.status()?;
            Ok(ContainerOutcome::exited(status.code().unwrap_or(1)))
        }
    }
}
