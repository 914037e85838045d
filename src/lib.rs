//! tsfix - CLI tool for applying ordered regex fix-up rules to a source tree.
//!
//! This library provides the core functionality for tsfix, including:
//! - Built-in rules for a schema rename, plus TOML config discovery
//! - Rule compilation and ordered, literal, whole-file substitution
//! - Sequential directory traversal with per-file error reporting
//!
//! # Example
//!
//! ```no_run
//! use tsfix_cli::config::{Overrides, load_config, resolve_settings};
//! use tsfix_cli::patcher::{PatchEvent, PatchOptions, Patcher};
//! use tsfix_cli::rules::compile_rules;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let loaded = load_config(None, &cwd).unwrap();
//! let settings = resolve_settings(loaded.as_ref(), &Overrides::default()).unwrap();
//! let rules = compile_rules(&settings.rules).unwrap();
//!
//! let options = PatchOptions {
//!     root: settings.root,
//!     suffix: settings.suffix,
//!     dry_run: true,
//! };
//! let summary = Patcher::new(options, rules).run(|event| {
//!     if let PatchEvent::WouldFix { path, .. } = event {
//!         println!("would fix {}", path.display());
//!     }
//! });
//! println!("{} file(s) would change", summary.fixed);
//! ```

pub mod config;
pub mod error;
pub mod patcher;
pub mod rules;

pub use error::{PatchError, Result};
