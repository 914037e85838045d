use std::path::PathBuf;

/// Library-level structured errors for tsfix.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid substitution expression `{expr}`: {reason}")]
	InvalidSubstitution { expr: String, reason: String },

	#[error("Rule {index} has an empty pattern")]
	EmptyPattern { index: usize },

	#[error("File suffix must not be empty")]
	EmptySuffix,

	#[error("Failed to read file: {path}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	FileWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to walk directory: {path}")]
	Walk {
		path: PathBuf,
		#[source]
		source: walkdir::Error,
	},
}

impl PatchError {
	/// Human-readable detail for the per-file report line.
	///
	/// Per-file errors print the underlying cause, since the path is already
	/// part of the report line.
	pub fn detail(&self) -> String {
		match self {
			PatchError::FileRead { source, .. } | PatchError::FileWrite { source, .. } => {
				source.to_string()
			}
			PatchError::Walk { source, .. } => match source.io_error() {
				Some(io) => io.to_string(),
				None => source.to_string(),
			},
			other => other.to_string(),
		}
	}
}

/// Result type alias using PatchError.
pub type Result<T> = std::result::Result<T, PatchError>;
