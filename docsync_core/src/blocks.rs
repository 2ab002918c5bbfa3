use std::path::Path;

use markdown::ParseOptions;
use markdown::mdast::Code;
use markdown::mdast::Node;
use markdown::to_mdast;

use crate::DocsyncError;
use crate::DocsyncResult;
use crate::config::OutputMode;

/// Fence tags recognized as diagram source. All aliases normalize to the
/// same canonical render tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramAlias {
	Mermaid,
	Mmd,
	MermaidExample,
}

impl DiagramAlias {
	/// Canonical tag for the copy the site renders as a diagram.
	pub const RENDER_TAG: &'static str = "mermaid";
	/// Tag for the copy displayed as diagram source.
	pub const DISPLAY_TAG: &'static str = "mermaid-example";

	pub fn from_lang(lang: &str) -> Option<Self> {
		match lang {
			"mermaid" => Some(Self::Mermaid),
			"mmd" => Some(Self::Mmd),
			"mermaid-example" => Some(Self::MermaidExample),
			_ => None,
		}
	}
}

/// Fence tags rewritten into callout markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
	Note,
	Tip,
	Warning,
	Danger,
}

impl CalloutKind {
	pub fn from_lang(lang: &str) -> Option<Self> {
		match lang {
			"note" => Some(Self::Note),
			"tip" => Some(Self::Tip),
			"warning" => Some(Self::Warning),
			"danger" => Some(Self::Danger),
			_ => None,
		}
	}

	/// Default title when the fence carries no caption.
	pub fn title(self) -> &'static str {
		match self {
			Self::Note => "Note",
			Self::Tip => "Tip",
			Self::Warning => "Warning",
			Self::Danger => "Danger",
		}
	}

	/// Icon prefix for the blockquote title line. Only tip and danger carry
	/// one.
	pub fn icon(self) -> &'static str {
		match self {
			Self::Tip => "\u{1f4a1} ",
			Self::Danger => "\u{203c}\u{fe0f} ",
			Self::Note | Self::Warning => "",
		}
	}

	/// Container name for admonition syntax. `note` maps to `info`; the rest
	/// map to themselves.
	pub fn container_name(self) -> &'static str {
		match self {
			Self::Note => "info",
			Self::Tip => "tip",
			Self::Warning => "warning",
			Self::Danger => "danger",
		}
	}
}

/// How callout blocks are rendered. A build-mode switch, never a per-file
/// choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmonitionStyle {
	/// Blockquote with a bolded, icon-prefixed title line.
	Blockquote,
	/// `::: kind` container wrapping the unmodified content.
	Container,
}

impl AdmonitionStyle {
	pub fn for_mode(mode: OutputMode) -> Self {
		match mode {
			OutputMode::Standard => Self::Blockquote,
			OutputMode::Vitepress => Self::Container,
		}
	}
}

/// Rewrite diagram and callout code blocks in a markdown document.
///
/// The document is parsed to an mdast tree only to locate and classify
/// fenced code blocks; rewrites are applied by splicing replacement text
/// into the original source in reverse offset order, so untouched content
/// survives byte-for-byte. Non-matching blocks pass through unchanged.
pub fn transform_blocks(
	file_path: &Path,
	text: &str,
	style: AdmonitionStyle,
) -> DocsyncResult<String> {
	let tree = to_mdast(text, &ParseOptions::default()).map_err(|message| {
		DocsyncError::Markdown {
			file: file_path.display().to_string(),
			message: message.to_string(),
		}
	})?;

	let mut edits: Vec<Edit> = Vec::new();
	collect_code_edits(&tree, style, &mut edits);
	edits.sort_by_key(|edit| edit.start);

	let mut result = text.to_string();
	for edit in edits.iter().rev() {
		if edit.end <= result.len() {
			result.replace_range(edit.start..edit.end, &edit.replacement);
		}
	}

	Ok(result)
}

struct Edit {
	start: usize,
	end: usize,
	replacement: String,
}

/// Walk the tree in document order and record a replacement for every code
/// block with a recognized language tag.
fn collect_code_edits(node: &Node, style: AdmonitionStyle, edits: &mut Vec<Edit>) {
	if let Node::Code(code) = node {
		if let Some(edit) = code_block_edit(code, style) {
			edits.push(edit);
		}
		return;
	}

	if let Some(children) = node.children() {
		for child in children {
			collect_code_edits(child, style, edits);
		}
	}
}

fn code_block_edit(code: &Code, style: AdmonitionStyle) -> Option<Edit> {
	let lang = code.lang.as_deref()?;
	let position = code.position.as_ref()?;

	let replacement = if DiagramAlias::from_lang(lang).is_some() {
		render_diagram(&code.value)
	} else if let Some(kind) = CalloutKind::from_lang(lang) {
		render_callout(kind, code.meta.as_deref(), &code.value, style)
	} else {
		return None;
	};

	Some(Edit {
		start: position.start.offset,
		end: position.end.offset,
		replacement,
	})
}

/// Duplicate a diagram block: first the copy the site renders, then the
/// copy shown as source, both with identical content.
fn render_diagram(content: &str) -> String {
	format!(
		"```{render}\n{content}\n```\n\n```{display}\n{content}\n```",
		render = DiagramAlias::RENDER_TAG,
		display = DiagramAlias::DISPLAY_TAG,
	)
}

/// Render a callout block in the active admonition style. The caption from
/// the fence's meta string overrides the default title.
fn render_callout(
	kind: CalloutKind,
	caption: Option<&str>,
	content: &str,
	style: AdmonitionStyle,
) -> String {
	let caption = caption.map(str::trim).filter(|c| !c.is_empty());

	match style {
		AdmonitionStyle::Blockquote => {
			let title = caption.unwrap_or_else(|| kind.title());
			let mut out = format!("> **{}{title}**", kind.icon());
			for line in content.lines() {
				out.push('\n');
				if line.is_empty() {
					out.push('>');
				} else {
					out.push_str("> ");
					out.push_str(line);
				}
			}
			out
		}
		AdmonitionStyle::Container => {
			let name = kind.container_name();
			match caption {
				Some(title) => format!("::: {name} {title}\n{content}\n:::"),
				None => format!("::: {name}\n{content}\n:::"),
			}
		}
	}
}
