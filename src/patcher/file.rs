use crate::error::{PatchError, Result};
use crate::rules::{CompiledRule, apply_rules};
use std::path::Path;

/// What happened to one eligible file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
	/// No rule changed the content; the file was not written.
	Unchanged,

	/// The content changed and was written back (or would be, in a dry run).
	Changed { replacements: usize },
}

/// Read a file, apply `rules` in order and write it back if the content changed.
///
/// The file is only opened for writing when the content differs. A failed
/// write leaves the original bytes on disk, since nothing has been truncated
/// before the write call.
pub fn patch_file(path: &Path, rules: &[CompiledRule], dry_run: bool) -> Result<FileOutcome> {
	let original = std::fs::read_to_string(path).map_err(|source| PatchError::FileRead {
		path: path.to_path_buf(),
		source,
	})?;

	let rewrite = apply_rules(&original, rules);
	if !rewrite.is_changed(&original) {
		return Ok(FileOutcome::Unchanged);
	}

	log::info!(
		"{}: {} replacement(s)",
		path.display(),
		rewrite.replacements
	);

	if !dry_run {
		std::fs::write(path, rewrite.content.as_bytes()).map_err(|source| {
			PatchError::FileWrite {
				path: path.to_path_buf(),
				source,
			}
		})?;
	}

	Ok(FileOutcome::Changed {
		replacements: rewrite.replacements,
	})
}
