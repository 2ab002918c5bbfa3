use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::BytesText;
use quick_xml::events::Event;

use crate::DocsyncError;
use crate::DocsyncResult;
use crate::config::SyncContext;
use crate::paths;

/// Generate the markdown provenance notice for a transformed file. The link
/// points from the destination file's location back to its source.
pub fn generate_header(ctx: &SyncContext, source_path: &Path) -> DocsyncResult<String> {
	let rel = paths::source_relative(ctx, source_path)?;
	let link = paths::header_source_link(ctx, rel);

	Ok(format!(
		"> **Warning**\n>\n> ## This file is auto-generated\n>\n> Do not edit it directly. \
		 Change [{link}]({link}) instead.\n\n"
	))
}

/// Insert the provenance notice into an HTML document as a comment node,
/// placed as the first child of the document's root element. The rest of the
/// document is re-serialized unchanged.
pub fn inject_html_header(
	ctx: &SyncContext,
	source_path: &Path,
	text: &str,
) -> DocsyncResult<String> {
	let rel = paths::source_relative(ctx, source_path)?;
	let link = paths::header_source_link(ctx, rel);
	let comment = format!(
		" This file is auto-generated. Do not edit it directly; change {link} instead. "
	);

	let mut reader = Reader::from_str(text);
	reader.config_mut().check_end_names = false;
	let mut writer = Writer::new(Vec::new());
	let mut injected = false;

	loop {
		let event = reader
			.read_event()
			.map_err(|e| html_error(source_path, &e))?;
		match event {
			Event::Eof => break,
			event => {
				let at_root_start = !injected && matches!(event, Event::Start(_));
				writer
					.write_event(event)
					.map_err(|e| html_error(source_path, &e))?;
				if at_root_start {
					writer
						.write_event(Event::Comment(BytesText::new(&comment)))
						.map_err(|e| html_error(source_path, &e))?;
					injected = true;
				}
			}
		}
	}

	String::from_utf8(writer.into_inner()).map_err(|e| html_error(source_path, &e))
}

fn html_error(source_path: &Path, error: &dyn std::fmt::Display) -> DocsyncError {
	DocsyncError::Html {
		file: source_path.display().to_string(),
		message: error.to_string(),
	}
}
