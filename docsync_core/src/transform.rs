use std::path::Path;

use tracing::debug;

use crate::DocsyncResult;
use crate::blocks;
use crate::blocks::AdmonitionStyle;
use crate::config::CDN_PLACEHOLDER;
use crate::config::SyncContext;
use crate::config::VERSION_PLACEHOLDER;
use crate::header;
use crate::include;
use crate::paths;
use crate::sync::SyncState;

/// Replace the build-time placeholder tokens with their configured values.
pub fn inject_placeholders(ctx: &SyncContext, text: &str) -> String {
	text.replace(VERSION_PLACEHOLDER, &ctx.version)
		.replace(CDN_PLACEHOLDER, &ctx.cdn_url)
}

/// Full markdown transform for one source file: include resolution, then
/// placeholder injection, then block rewriting, then the provenance header.
/// Files matching the configured skip predicate are returned verbatim.
pub fn transform_markdown(
	ctx: &SyncContext,
	state: &mut SyncState,
	source_path: &Path,
) -> DocsyncResult<String> {
	let raw = std::fs::read_to_string(source_path)?;

	let rel = paths::source_relative(ctx, source_path)?;
	if ctx.should_skip_transform(rel) {
		debug!(source = %source_path.display(), "skip-transform entry, copied verbatim");
		return Ok(raw);
	}

	let text = include::resolve_includes(ctx, state, source_path, &raw)?;
	let text = inject_placeholders(ctx, &text);
	let style = AdmonitionStyle::for_mode(ctx.mode);
	let text = blocks::transform_blocks(source_path, &text, style)?;

	if ctx.mode.emits_header() {
		let header = header::generate_header(ctx, source_path)?;
		Ok(format!("{header}{text}"))
	} else {
		Ok(text)
	}
}

/// HTML transform for one source file: placeholder injection plus the
/// provenance comment as the first child of the document's root element.
pub fn transform_html(ctx: &SyncContext, source_path: &Path) -> DocsyncResult<String> {
	let raw = std::fs::read_to_string(source_path)?;
	let text = inject_placeholders(ctx, &raw);

	if ctx.mode.emits_header() {
		header::inject_html_header(ctx, source_path, &text)
	} else {
		Ok(text)
	}
}
