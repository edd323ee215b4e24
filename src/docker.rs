#![allow(clippy::module_name_repetitions)]
//! Docker runtime discovery, image checks and `docker run` construction for the flow tool.

pub(crate) mod env;
pub(crate) mod images;
pub(crate) mod run;
pub(crate) mod runtime;

pub use images::image_exists;
pub use run::{bind_spec, DockerExecutor};
pub use runtime::container_runtime_path;
