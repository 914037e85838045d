use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Top-level configuration from a `.tsfix.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Directory to patch. Relative paths resolve against the config file's directory.
	#[serde(default)]
	pub root_dir: Option<PathBuf>,

	/// File name suffix that makes a file eligible for patching.
	#[serde(default)]
	pub suffix: Option<String>,

	/// Whether the built-in rule set runs before the rules below. Defaults to true.
	#[serde(default)]
	pub builtin_rules: Option<bool>,

	/// Additional rules, applied in file order after the built-in rules.
	#[serde(default)]
	pub rules: Vec<RuleSpec>,
}

/// An uncompiled pattern/replacement pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct RuleSpec {
	/// Regex pattern to search for.
	pub pattern: String,

	/// Literal replacement text. Empty deletes the match.
	#[serde(default)]
	pub replacement: String,

	/// Free-form note shown by `config show`.
	#[serde(default)]
	pub description: Option<String>,
}

impl RuleSpec {
	pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
		RuleSpec {
			pattern: pattern.into(),
			replacement: replacement.into(),
			description: None,
		}
	}
}

/// Where a rule was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
	Builtin,
	ConfigFile(PathBuf),
	Expression,
}

impl fmt::Display for RuleOrigin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RuleOrigin::Builtin => f.write_str("builtin"),
			RuleOrigin::ConfigFile(path) => write!(f, "{}", path.display()),
			RuleOrigin::Expression => f.write_str("--expr"),
		}
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// A rule with its origin, in application order.
#[derive(Debug, Clone)]
pub struct RuleWithOrigin {
	/// The rule itself.
	pub rule: RuleSpec,

	/// Where the rule came from.
	pub origin: RuleOrigin,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub root: Option<PathBuf>,
	pub suffix: Option<String>,
	pub no_builtin: bool,
	pub expressions: Vec<String>,
}

/// Effective settings after merging defaults, config file and command line.
#[derive(Debug, Clone)]
pub struct Settings {
	/// Directory to walk.
	pub root: PathBuf,

	/// Eligible file name suffix.
	pub suffix: String,

	/// All rules in application order.
	pub rules: Vec<RuleWithOrigin>,

	/// Config file the settings were read from, if any.
	pub config_path: Option<PathBuf>,
}

impl Config {
	/// Validate field values that TOML typing alone cannot rule out.
	pub fn validate(&self) -> Result<(), crate::error::PatchError> {
		if self.suffix.as_deref() == Some("") {
			return Err(crate::error::PatchError::EmptySuffix);
		}
		for (i, rule) in self.rules.iter().enumerate() {
			if rule.pattern.is_empty() {
				return Err(crate::error::PatchError::EmptyPattern { index: i + 1 });
			}
		}
		Ok(())
	}
}
