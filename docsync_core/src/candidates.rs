use std::path::Path;
use std::path::PathBuf;

use crate::DocsyncResult;
use crate::config::SyncContext;
use crate::paths;

/// Which transform a candidate file receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
	Markdown,
	Html,
	Other,
}

/// The full candidate set for one run, grouped by transform. Enumeration is
/// materialized and sorted before any file is processed.
#[derive(Debug, Default)]
pub struct Candidates {
	pub markdown: Vec<PathBuf>,
	pub html: Vec<PathBuf>,
	pub other: Vec<PathBuf>,
}

/// Classify a source file by its path relative to the source root. Markdown
/// and HTML patterns are checked first; anything else falls through to
/// passthrough copy. `None` means the file is excluded in the active mode.
pub fn classify(ctx: &SyncContext, rel: &Path) -> Option<FileKind> {
	if ctx.is_excluded(rel) {
		return None;
	}
	if ctx.markdown_set.is_match(rel) {
		return Some(FileKind::Markdown);
	}
	if ctx.html_set.is_match(rel) {
		return Some(FileKind::Html);
	}
	Some(FileKind::Other)
}

/// Walk the source root and classify every file. Results are sorted for
/// deterministic processing order.
pub fn collect_candidates(ctx: &SyncContext) -> DocsyncResult<Candidates> {
	let mut files = Vec::new();
	walk_dir(&ctx.source_root, &mut files)?;
	files.sort();

	let mut candidates = Candidates::default();
	for file in files {
		let rel = paths::source_relative(ctx, &file)?.to_path_buf();
		match classify(ctx, &rel) {
			Some(FileKind::Markdown) => candidates.markdown.push(file),
			Some(FileKind::Html) => candidates.html.push(file),
			Some(FileKind::Other) => candidates.other.push(file),
			None => {}
		}
	}

	Ok(candidates)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> DocsyncResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	for entry in std::fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		// Dot-directories stay in the walk: vitepress mode publishes build
		// config that lives under one. Only version control metadata is
		// skipped.
		if path.file_name().and_then(|n| n.to_str()) == Some(".git") {
			continue;
		}

		if path.is_dir() {
			walk_dir(&path, files)?;
		} else {
			files.push(path);
		}
	}

	Ok(())
}
