// inspector_core/src/logging/mod.rs
#[allow(clippy::module_inception)]
pub mod logging;

pub use logging::{init_file_logger, last_log};
