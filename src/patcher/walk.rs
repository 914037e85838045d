use std::path::Path;
use walkdir::DirEntry;

/// Whether a file name ends with `suffix`. Matching is by name only.
pub fn has_suffix(name: &str, suffix: &str) -> bool {
	name.ends_with(suffix)
}

/// Whether a walked entry should be patched.
///
/// Regular files qualify, as do symlinks that resolve to regular files.
/// Directories never do, even if their name ends with the suffix.
pub fn is_eligible(entry: &DirEntry, suffix: &str) -> bool {
	let file_type = entry.file_type();
	let is_file = file_type.is_file() || (file_type.is_symlink() && resolves_to_file(entry.path()));

	is_file && has_suffix(&entry.file_name().to_string_lossy(), suffix)
}

fn resolves_to_file(path: &Path) -> bool {
	std::fs::metadata(path).is_ok_and(|m| m.is_file())
}
