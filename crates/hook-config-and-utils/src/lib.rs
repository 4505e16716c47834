//! Paths, configuration, and logging for the permission hook.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, DEFAULT_SOCKET_PATH, DEFAULT_TIMEOUT_SECS};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use paths::Paths;
