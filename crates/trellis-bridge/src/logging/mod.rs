//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only uses the `log`
//! facade; `init_logging` installs `env_logger` behind it.

mod init;

pub use init::{init_logging, LoggingConfig};
