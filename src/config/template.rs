use crate::config::builtin::{DEFAULT_ROOT, DEFAULT_SUFFIX};

/// Contents of the `.tsfix.toml` written by `tsfix --init`.
pub fn generate_init_template() -> String {
	format!(
		r#"# tsfix configuration
#
# Rules run in order: built-in rules first (unless disabled), then the
# [[rules]] below, then any -e/--expr expressions from the command line.
# Each rule replaces every match of its regex with a literal replacement.

# Directory to patch, relative to this file.
root-dir = "{DEFAULT_ROOT}"

# Only files whose names end with this suffix are patched.
suffix = "{DEFAULT_SUFFIX}"

# Set to false to run only the rules listed here.
builtin-rules = true

# [[rules]]
# pattern = '\boldFieldName\b'
# replacement = "newFieldName"
# description = "oldFieldName was renamed"
"#
	)
}
