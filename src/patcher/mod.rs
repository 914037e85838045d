//! Directory traversal and in-place patching.
//!
//! Files are visited in file-name order and processed one at a time: each
//! eligible file is read, rewritten and written back before the walk moves
//! on. Per-file failures are reported as events and never stop the walk.

pub mod file;
pub mod walk;

pub use file::{FileOutcome, patch_file};
pub use walk::{has_suffix, is_eligible};

use crate::error::PatchError;
use crate::rules::RuleSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where and how to patch.
#[derive(Debug, Clone)]
pub struct PatchOptions {
	/// Directory to walk recursively.
	pub root: PathBuf,

	/// File name suffix that makes a file eligible.
	pub suffix: String,

	/// Report what would change without writing anything.
	pub dry_run: bool,
}

/// A reportable per-file result. Unchanged files produce no event.
#[derive(Debug)]
pub enum PatchEvent {
	Fixed { path: PathBuf, replacements: usize },
	WouldFix { path: PathBuf, replacements: usize },
	Failed { path: PathBuf, error: PatchError },
}

impl PatchEvent {
	pub fn path(&self) -> &Path {
		match self {
			PatchEvent::Fixed { path, .. }
			| PatchEvent::WouldFix { path, .. }
			| PatchEvent::Failed { path, .. } => path,
		}
	}
}

/// Totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchSummary {
	/// Eligible files visited, including ones that failed to read.
	pub scanned: usize,

	/// Files whose content changed.
	pub fixed: usize,

	/// Eligible files left untouched.
	pub unchanged: usize,

	/// Files or directories that produced an error.
	pub failed: usize,
}

/// Applies a rule set to every eligible file under a root directory.
#[derive(Debug)]
pub struct Patcher {
	options: PatchOptions,
	rules: RuleSet,
}

impl Patcher {
	pub fn new(options: PatchOptions, rules: RuleSet) -> Self {
		Patcher { options, rules }
	}

	/// Walk the root and patch every eligible file, calling `on_event` for
	/// each change and each error as it happens.
	pub fn run(&self, mut on_event: impl FnMut(&PatchEvent)) -> PatchSummary {
		let mut summary = PatchSummary::default();
		let walker = WalkDir::new(&self.options.root)
			.follow_links(false)
			.sort_by_file_name();

		for entry in walker {
			let entry = match entry {
				Ok(entry) => entry,
				Err(source) => {
					let path = source
						.path()
						.unwrap_or(self.options.root.as_path())
						.to_path_buf();
					log::debug!("cannot walk {}", path.display());
					summary.failed += 1;
					on_event(&PatchEvent::Failed {
						path: path.clone(),
						error: PatchError::Walk { path, source },
					});
					continue;
				}
			};

			if !is_eligible(&entry, &self.options.suffix) {
				log::trace!("skipping {}", entry.path().display());
				continue;
			}

			summary.scanned += 1;
			let path = entry.path();

			match patch_file(path, &self.rules, self.options.dry_run) {
				Ok(FileOutcome::Unchanged) => summary.unchanged += 1,
				Ok(FileOutcome::Changed { replacements }) => {
					summary.fixed += 1;
					let path = path.to_path_buf();
					let event = if self.options.dry_run {
						PatchEvent::WouldFix { path, replacements }
					} else {
						PatchEvent::Fixed { path, replacements }
					};
					on_event(&event);
				}
				Err(error) => {
					summary.failed += 1;
					on_event(&PatchEvent::Failed {
						path: path.to_path_buf(),
						error,
					});
				}
			}
		}

		log::info!(
			"scanned {} file(s): {} fixed, {} unchanged, {} failed",
			summary.scanned,
			summary.fixed,
			summary.unchanged,
			summary.failed
		);

		summary
	}
}
