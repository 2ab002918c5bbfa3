use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::DocsyncResult;
use crate::config::SyncContext;
use crate::paths;

/// Run-scoped mutable state threaded through every transform and sync call.
/// Batch mode creates one per run; watch mode keeps one alive for the
/// process. Ordered sets keep reporting deterministic.
#[derive(Debug, Default)]
pub struct SyncState {
	/// Destination paths whose content differed from the freshly computed
	/// transform during this run.
	pub files_transformed: BTreeSet<PathBuf>,
	/// Destination paths of files pulled in purely as include dependencies.
	/// Consumed once at the end of the markdown phase.
	pub included_files: BTreeSet<PathBuf>,
}

impl SyncState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether any file was found to differ during this run.
	pub fn has_changes(&self) -> bool {
		!self.files_transformed.is_empty()
	}
}

/// The decision taken for one file by [`sync_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
	/// Destination already holds the transformed content. No side effects.
	Unchanged,
	/// Destination differed and was overwritten.
	Written { dest: PathBuf },
	/// Destination differs but nothing was written (verify mode).
	Stale { dest: PathBuf },
}

/// The central gate between transforms and the destination tree. Computes
/// the destination path, byte-compares existing content against the freshly
/// transformed content, records the difference, and conditionally performs
/// the write. `content` of `None` means the raw source bytes are synced
/// unchanged (passthrough files).
///
/// Re-running with unchanged inputs is a guaranteed no-op: equal bytes mean
/// no record, no log, no write.
pub fn sync_file(
	ctx: &SyncContext,
	state: &mut SyncState,
	source_path: &Path,
	content: Option<Vec<u8>>,
	write: bool,
) -> DocsyncResult<SyncOutcome> {
	let dest = paths::map_to_destination(ctx, source_path)?;
	let new_bytes = match content {
		Some(bytes) => bytes,
		None => std::fs::read(source_path)?,
	};

	// A missing destination is the "new file" sentinel, not an error: it can
	// never compare equal to real content.
	let existing = match std::fs::read(&dest) {
		Ok(bytes) => Some(bytes),
		Err(e) if e.kind() == ErrorKind::NotFound => None,
		Err(e) => return Err(e.into()),
	};

	if existing.as_deref() == Some(new_bytes.as_slice()) {
		debug!(source = %source_path.display(), "destination up to date");
		return Ok(SyncOutcome::Unchanged);
	}

	state.files_transformed.insert(dest.clone());

	if write {
		paths::ensure_dest_dir(&dest)?;
		std::fs::write(&dest, &new_bytes)?;
		debug!(dest = %dest.display(), "destination written");
		Ok(SyncOutcome::Written { dest })
	} else {
		debug!(dest = %dest.display(), "destination stale");
		Ok(SyncOutcome::Stale { dest })
	}
}

/// Consume the include-dependency set collected during the markdown phase.
/// An included file must never remain published as a standalone page: its
/// content has already been inlined into its parents. Each target is dropped
/// from the change set and, in write mode, its destination copy is deleted.
/// Returns the processed targets in order for per-file reporting.
pub fn remove_included_files(
	state: &mut SyncState,
	write: bool,
) -> DocsyncResult<Vec<PathBuf>> {
	let targets: Vec<PathBuf> = std::mem::take(&mut state.included_files)
		.into_iter()
		.collect();

	for dest in &targets {
		state.files_transformed.remove(dest);
		if write && dest.is_file() {
			std::fs::remove_file(dest)?;
			debug!(dest = %dest.display(), "removed include-only destination file");
		}
	}

	Ok(targets)
}

/// Propagate a source deletion to the destination tree: unconditional and
/// immediate, independent of the diff logic. `is_dir` of `None` probes the
/// mapped destination (the source is already gone by the time the event
/// arrives). Missing destinations are fine; the trees were already in sync.
pub fn propagate_removal(
	ctx: &SyncContext,
	source_path: &Path,
	is_dir: Option<bool>,
) -> DocsyncResult<PathBuf> {
	let dest = paths::map_to_destination(ctx, source_path)?;
	let treat_as_dir = is_dir.unwrap_or_else(|| dest.is_dir());

	let removal = if treat_as_dir {
		std::fs::remove_dir_all(&dest)
	} else {
		std::fs::remove_file(&dest)
	};

	match removal {
		Ok(()) => debug!(dest = %dest.display(), "propagated deletion"),
		Err(e) if e.kind() == ErrorKind::NotFound => {}
		Err(e) => return Err(e.into()),
	}

	Ok(dest)
}
