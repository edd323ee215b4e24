//! Error taxonomy for flag/mount composition and container dispatch.
//!
//! Mapping guide:
//! - Map io::ErrorKind::NotFound launch failures to exit code 127; all other launch failures to 1.
//! - A non-zero container exit is propagated as the launcher's own exit code when it fits in 1..=255.
//! - Keep message texts stable; tests and users match on them.
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Every failure the launcher core can produce. All variants are terminal for the invocation.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("error getting current directory: {0}")]
    PathResolution(#[source] io::Error),

    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("error creating project directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error running [{}]: {source}", .command.join(" "))]
    SubInvocation {
        command: Vec<String>,
        #[source]
        source: io::Error,
    },

    #[error("docker command has returned a non-zero exit code:{0}")]
    NonZeroExit(i32),

    #[error("error decoding output of [{}]: {source}", .command.join(" "))]
    OutputDecode {
        command: Vec<String>,
        #[source]
        source: FromUtf8Error,
    },

    #[error("error running [{}]: {source}", .command.join(" "))]
    Dispatch {
        command: Vec<String>,
        #[source]
        source: io::Error,
    },

    #[error("argument not set:{0}")]
    MissingArgument(&'static str),

    #[error("error reading global config key {key}: {source}")]
    GlobalConfigKey {
        key: &'static str,
        #[source]
        source: Box<FlowError>,
    },
}

impl FlowError {
    /// Container exit code carried by this error, looking through the global-key wrapper.
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            FlowError::NonZeroExit(code) => Some(*code),
            FlowError::GlobalConfigKey { source, .. } => source.exit_status(),
            _ => None,
        }
    }

    /// Global config key whose nested query failed, if any.
    pub fn global_key(&self) -> Option<&'static str> {
        match self {
            FlowError::GlobalConfigKey { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Convert FlowError to a process exit code (parity with io::Error mapping).
pub fn exit_code_for_flow_error(e: &FlowError) -> u8 {
    match e {
        FlowError::SubInvocation { source, .. } | FlowError::Dispatch { source, .. } => {
            exit_code_for_io_error(source)
        }
        FlowError::NonZeroExit(code) => u8::try_from(*code)
            .ok()
            .filter(|c| *c != 0)
            .unwrap_or(1),
        FlowError::GlobalConfigKey { source, .. } => exit_code_for_flow_error(source),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_message_keeps_code() {
        let e = FlowError::NonZeroExit(1);
        assert_eq!(
            e.to_string(),
            "docker command has returned a non-zero exit code:1"
        );
        assert_eq!(e.exit_status(), Some(1));
    }

    #[test]
    fn test_dispatch_message_lists_command_tokens() {
        let e = FlowError::Dispatch {
            command: vec!["--debug".to_string(), "run".to_string()],
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };
        assert_eq!(e.to_string(), "error running [--debug run]: boom");
    }

    #[test]
    fn test_global_key_wrapper_exposes_key_and_code() {
        let e = FlowError::GlobalConfigKey {
            key: "data_dir",
            source: Box::new(FlowError::NonZeroExit(3)),
        };
        assert_eq!(e.global_key(), Some("data_dir"));
        assert_eq!(e.exit_status(), Some(3));
        assert_eq!(exit_code_for_flow_error(&e), 3);
        assert!(e.to_string().contains("data_dir"));
    }

    #[test]
    fn test_exit_codes() {
        let nf = FlowError::Dispatch {
            command: vec!["run".to_string()],
            source: io::Error::new(io::ErrorKind::NotFound, "no docker"),
        };
        assert_eq!(exit_code_for_flow_error(&nf), 127);
        assert_eq!(exit_code_for_flow_error(&FlowError::NonZeroExit(2)), 2);
        assert_eq!(exit_code_for_flow_error(&FlowError::NonZeroExit(300)), 1);
        assert_eq!(exit_code_for_flow_error(&FlowError::NonZeroExit(-9)), 1);
        assert_eq!(
            exit_code_for_flow_error(&FlowError::MissingArgument("key")),
            1
        );
    }
}
