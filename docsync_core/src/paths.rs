use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::DocsyncError;
use crate::DocsyncResult;
use crate::config::SyncContext;

/// Strip the source root prefix from a source path. Every path handed to the
/// engine comes from globbing the source root, so failure here means the
/// caller is holding a path from somewhere else entirely.
pub fn source_relative<'a>(ctx: &SyncContext, source_path: &'a Path) -> DocsyncResult<&'a Path> {
	source_path.strip_prefix(&ctx.source_root).map_err(|_| {
		DocsyncError::OutsideSourceRoot {
			path: source_path.display().to_string(),
			root: ctx.source_root.display().to_string(),
		}
	})
}

/// Map a source path to its destination path by substituting the source root
/// prefix with the active destination root. Pure: directory creation happens
/// on the write path, never during verification.
pub fn map_to_destination(ctx: &SyncContext, source_path: &Path) -> DocsyncResult<PathBuf> {
	let rel = source_relative(ctx, source_path)?;
	Ok(ctx.dest_root.join(rel))
}

/// Create the parent directory chain for a destination path. Idempotent;
/// `create_dir_all` succeeds when the chain already exists and any other
/// failure propagates as a fatal I/O error.
pub fn ensure_dest_dir(dest_path: &Path) -> DocsyncResult<()> {
	if let Some(parent) = dest_path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	Ok(())
}

/// Compute the link from a destination file back to its source file: one
/// `..` per component of the destination file's directory, then the source
/// path relative to the project root. Always uses forward slashes.
pub fn header_source_link(ctx: &SyncContext, rel: &Path) -> String {
	let dest_dir = ctx.dest_rel.join(rel);
	let updirs = dest_dir.parent().map_or(0, |dir| {
		dir.components()
			.filter(|c| matches!(c, Component::Normal(_)))
			.count()
	});

	let mut link = String::new();
	for _ in 0..updirs {
		link.push_str("../");
	}
	link.push_str(&slash_path(&ctx.source_rel.join(rel)));
	link
}

/// Render a path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
	let parts: Vec<String> = path
		.components()
		.filter_map(|c| {
			match c {
				Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
				_ => None,
			}
		})
		.collect();
	parts.join("/")
}
