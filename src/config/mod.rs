//! Configuration loading and parsing for tsfix.
//!
//! This module handles:
//! - The built-in rule set and defaults
//! - TOML config file parsing and discovery
//! - Merging with command-line overrides

pub mod builtin;
pub mod discovery;
pub mod parser;
pub mod template;
pub mod types;

pub use builtin::{DEFAULT_ROOT, DEFAULT_SUFFIX, builtin_rules};
pub use discovery::{CONFIG_FILE_NAME, discover_config, load_config, resolve_settings};
pub use parser::{parse_config_file, parse_config_str};
pub use template::generate_init_template;
pub use types::{
	Config, LoadedConfig, Overrides, RuleOrigin, RuleSpec, RuleWithOrigin, Settings,
};
