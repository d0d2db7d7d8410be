//! Configuration file loading for lisa
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LISA_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./lisa.toml` or `./.lisa.toml`
//! 4. Global: `<config dir>/lisa/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnthropicConfig, FileConfig, FileLoggingConfig, FileOpenAiConfig,
    FileOrchestrationConfig, FileProviderConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;
