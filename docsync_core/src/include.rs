use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::DocsyncError;
use crate::DocsyncResult;
use crate::config::SyncContext;
use crate::paths;
use crate::sync::SyncState;

/// `<!-- @include: relative/path.md -->`
static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"<!--\s*@include:\s*(\S+)\s*-->").expect("include directive pattern is valid")
});

/// Substitute every include directive in `text` with the raw content of the
/// referenced file, resolved relative to `file_path`'s directory. Each
/// resolved file's destination path is recorded in `state.included_files` so
/// the sync phase can drop its standalone published copy.
///
/// Resolution is single level: directives are scanned in the original text
/// only, so an included file's own directives are inlined verbatim rather
/// than expanded.
pub fn resolve_includes(
	ctx: &SyncContext,
	state: &mut SyncState,
	file_path: &Path,
	text: &str,
) -> DocsyncResult<String> {
	if !INCLUDE_DIRECTIVE.is_match(text) {
		return Ok(text.to_string());
	}

	let base = file_path.parent().unwrap_or_else(|| Path::new(""));
	let mut result = String::with_capacity(text.len());
	let mut last_end = 0;

	for captures in INCLUDE_DIRECTIVE.captures_iter(text) {
		let Some(whole) = captures.get(0) else {
			continue;
		};
		let target = &captures[1];
		let included_path = lexical_normalize(&base.join(target));

		let content = std::fs::read_to_string(&included_path).map_err(|e| {
			DocsyncError::IncludeResolution {
				directive: whole.as_str().to_string(),
				file: file_path.display().to_string(),
				source: e,
			}
		})?;

		let dest = paths::map_to_destination(ctx, &included_path)?;
		debug!(
			included = %included_path.display(),
			into = %file_path.display(),
			"resolved include directive"
		);
		state.included_files.insert(dest);

		result.push_str(&text[last_end..whole.start()]);
		result.push_str(&content);
		last_end = whole.end();
	}

	result.push_str(&text[last_end..]);
	Ok(result)
}

/// Collapse `.` and `..` components without touching the filesystem, so an
/// include target like `../shared/note.md` maps to a destination path that
/// still carries the source root prefix.
fn lexical_normalize(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				if !normalized.pop() {
					normalized.push(Component::ParentDir);
				}
			}
			other => normalized.push(other),
		}
	}
	normalized
}
