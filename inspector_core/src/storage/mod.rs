// inspector_core/src/storage/mod.rs
pub mod inspector_config;

pub use inspector_config::{InspectorConfig, LoggingConfig, app_dir, config_path};
