//! Seam between orchestration and the container runtime.
//!
//! The composer and dispatcher only ever talk to a `&dyn ContainerExecutor`. Production
//! code passes a [`crate::DockerExecutor`]; tests pass a recording double.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// Flag name (without leading dashes) to value; rendered as `--name value`.
pub type FlagMap = BTreeMap<String, String>;

/// One invocation of the containerized flow tool.
#[derive(Debug, Clone, Copy)]
pub struct ContainerRequest<'a> {
    /// Leading command tokens, e.g. `["config"]` or `["--debug", "run"]`.
    pub command: &'a [String],
    pub args: &'a [String],
    pub flags: &'a FlagMap,
    /// Host directories bound at the same path inside the container.
    pub mounts: &'a [PathBuf],
    /// Capture stdout instead of streaming it to the terminal.
    pub capture_output: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerOutcome {
    pub exit_code: i32,
    /// Captured stdout; empty unless the request asked for capture.
    pub output: Vec<u8>,
}

impl ContainerOutcome {
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: 0,
            output: output.into(),
        }
    }

    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: code,
            output: Vec::new(),
        }
    }
}

pub trait ContainerExecutor {
    /// Run the tool to completion. `Err` means the container could not be launched or
    /// awaited; a tool failure is a non-zero `exit_code` in `Ok`.
    fn execute(&self, request: &ContainerRequest<'_>) -> io::Result<ContainerOutcome>;
}

/// Decode captured container output.
pub fn decode_output(output: Vec<u8>) -> Result<String, FromUtf8Error> {
    String::from_utf8(output)
}
