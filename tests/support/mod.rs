#![allow(dead_code)]
//! Recording container executor shared by integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;

use aifo_flow::{ContainerExecutor, ContainerOutcome, ContainerRequest, FlagMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: Vec<String>,
    pub args: Vec<String>,
    pub flags: FlagMap,
    pub mounts: Vec<PathBuf>,
    pub capture_output: bool,
}

/// Replays scripted outcomes in order; once the script is exhausted every call succeeds
/// with empty output.
#[derive(Default)]
pub struct RecordingExecutor {
    script: RefCell<VecDeque<io::Result<ContainerOutcome>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<io::Result<ContainerOutcome>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Nested `config` answers for the three global keys, in order.
    pub fn with_global_dirs(dirs: [&str; 3]) -> Self {
        Self::with_script(
            dirs.iter()
                .map(|d| Ok(ContainerOutcome::success(format!("{d}\n"))))
                .collect(),
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .borrow()
            .last()
            .cloned()
            .expect("at least one container call")
    }
}

impl ContainerExecutor for RecordingExecutor {
    fn execute(&self, request: &ContainerRequest<'_>) -> io::Result<ContainerOutcome> {
        self.calls.borrow_mut().push(RecordedCall {
            command: request.command.to_vec(),
            args: request.args.to_vec(),
            flags: request.flags.clone(),
            mounts: request.mounts.to_vec(),
            capture_output: request.capture_output,
        });
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ContainerOutcome::default()))
    }
}

pub fn mock_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "mock error")
}

pub fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

pub fn flags(pairs: &[(&str, &str)]) -> FlagMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
