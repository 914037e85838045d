use crate::config::builtin::{DEFAULT_ROOT, DEFAULT_SUFFIX, builtin_rules};
use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, Overrides, RuleOrigin, RuleWithOrigin, Settings};
use crate::error::{PatchError, Result};
use crate::rules::Substitution;
use std::path::{Path, PathBuf};

/// File name searched for during config discovery.
pub const CONFIG_FILE_NAME: &str = ".tsfix.toml";

/// Find the nearest config file.
///
/// Starts in `start_dir` and walks up to the filesystem root. The first
/// `.tsfix.toml` found wins; there is no merging across directories.
pub fn discover_config(start_dir: &Path) -> Result<Option<LoadedConfig>> {
	for dir in start_dir.ancestors() {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			let config = parse_config_file(&config_path)?;
			return Ok(Some(LoadedConfig {
				config,
				path: config_path,
			}));
		}
	}

	Ok(None)
}

/// Load the config named on the command line, or discover one from `cwd`.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<LoadedConfig>> {
	match explicit {
		Some(path) => {
			if !path.exists() {
				return Err(PatchError::ConfigNotFound {
					path: path.to_path_buf(),
				});
			}
			let config = parse_config_file(path)?;
			Ok(Some(LoadedConfig {
				config,
				path: path.to_path_buf(),
			}))
		}
		None => discover_config(cwd),
	}
}

/// Merge built-in defaults, an optional config file and command-line overrides.
///
/// Precedence is command line, then config file, then built-in defaults.
/// Rules are ordered built-in first, then config file rules, then `--expr`
/// expressions.
pub fn resolve_settings(loaded: Option<&LoadedConfig>, overrides: &Overrides) -> Result<Settings> {
	let config = loaded.map(|l| &l.config);

	let root = if let Some(ref root) = overrides.root {
		root.clone()
	} else if let Some(loaded) = loaded
		&& let Some(ref dir) = loaded.config.root_dir
	{
		relative_to_config(&loaded.path, dir)
	} else {
		PathBuf::from(DEFAULT_ROOT)
	};

	let suffix = overrides
		.suffix
		.clone()
		.or_else(|| config.and_then(|c| c.suffix.clone()))
		.unwrap_or_else(|| DEFAULT_SUFFIX.to_string());
	if suffix.is_empty() {
		return Err(PatchError::EmptySuffix);
	}

	let mut rules = Vec::new();

	let use_builtin = !overrides.no_builtin && config.and_then(|c| c.builtin_rules).unwrap_or(true);
	if use_builtin {
		rules.extend(builtin_rules().into_iter().map(|rule| RuleWithOrigin {
			rule,
			origin: RuleOrigin::Builtin,
		}));
	}

	if let Some(loaded) = loaded {
		for rule in &loaded.config.rules {
			rules.push(RuleWithOrigin {
				rule: rule.clone(),
				origin: RuleOrigin::ConfigFile(loaded.path.clone()),
			});
		}
	}

	for expr in &overrides.expressions {
		let sub = Substitution::parse(expr)?;
		rules.push(RuleWithOrigin {
			rule: sub.into_rule_spec(),
			origin: RuleOrigin::Expression,
		});
	}

	Ok(Settings {
		root,
		suffix,
		rules,
		config_path: loaded.map(|l| l.path.clone()),
	})
}

fn relative_to_config(config_path: &Path, dir: &Path) -> PathBuf {
	if dir.is_absolute() {
		return dir.to_path_buf();
	}
	match config_path.parent() {
		Some(parent) => parent.join(dir),
		None => dir.to_path_buf(),
	}
}
