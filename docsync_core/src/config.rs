use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use serde::Deserialize;

use crate::DocsyncError;
use crate::DocsyncResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["docsync.toml", ".docsync.toml"];

/// Token substituted with the configured major version string.
pub const VERSION_PLACEHOLDER: &str = "<DOCS_VERSION>";

/// Token substituted with the configured CDN base URL.
pub const CDN_PLACEHOLDER: &str = "<CDN_URL>";

/// Which destination tree and transform behaviors are active.
///
/// `Vitepress` output goes to a separate destination root, skips the
/// provenance header, renders callouts as `::: kind` containers, copies the
/// configured entry files verbatim, and lifts the standard-mode exclusion
/// patterns so the site entry file and its build config are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
	#[default]
	Standard,
	Vitepress,
}

impl OutputMode {
	/// Whether the machine-generated provenance header is emitted.
	pub fn emits_header(self) -> bool {
		matches!(self, Self::Standard)
	}
}

/// Configuration loaded from a `docsync.toml` file.
///
/// ```toml
/// [paths]
/// source = "docs-src"
/// dest = "docs"
/// vitepress_dest = "site/docs"
///
/// [placeholders]
/// version = "11"
/// cdn_url = "https://cdn.example.com"
///
/// [patterns]
/// markdown = ["**/*.md"]
/// html = ["**/*.html"]
/// exclude = ["index.md", ".vitepress/**"]
/// skip_transform = ["index.md"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct SyncConfig {
	/// Source and destination roots, relative to the project root.
	#[serde(default)]
	pub paths: PathsConfig,
	/// Values for the build-time placeholder tokens.
	#[serde(default)]
	pub placeholders: PlaceholderConfig,
	/// Glob pattern sets classifying candidate files.
	#[serde(default)]
	pub patterns: PatternConfig,
}

impl SyncConfig {
	/// Load configuration from the project root. Returns `None` when no
	/// config file exists; any candidate that exists but fails to parse is an
	/// error.
	pub fn load(root: &Path) -> DocsyncResult<Option<Self>> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if !path.is_file() {
				continue;
			}

			let content = std::fs::read_to_string(&path)?;
			let config = toml::from_str(&content)
				.map_err(|e| DocsyncError::ConfigParse(format!("{}: {e}", path.display())))?;
			return Ok(Some(config));
		}

		Ok(None)
	}
}

/// `[paths]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
	/// The authored documentation tree.
	#[serde(default = "default_source")]
	pub source: PathBuf,
	/// The published tree kept in sync in standard mode.
	#[serde(default = "default_dest")]
	pub dest: PathBuf,
	/// The published tree kept in sync in vitepress mode.
	#[serde(default = "default_vitepress_dest")]
	pub vitepress_dest: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			source: default_source(),
			dest: default_dest(),
			vitepress_dest: default_vitepress_dest(),
		}
	}
}

/// `[placeholders]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceholderConfig {
	/// Replacement for the `<DOCS_VERSION>` token.
	#[serde(default)]
	pub version: String,
	/// Replacement for the `<CDN_URL>` token.
	#[serde(default)]
	pub cdn_url: String,
}

/// `[patterns]` section. All patterns match paths relative to the source
/// root using globset syntax.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
	/// Files transformed as markdown.
	#[serde(default = "default_markdown_patterns")]
	pub markdown: Vec<String>,
	/// Files transformed as HTML.
	#[serde(default = "default_html_patterns")]
	pub html: Vec<String>,
	/// Files left out of the candidate set in standard mode. Vitepress mode
	/// publishes these as well (the site entry file and its build config).
	#[serde(default)]
	pub exclude: Vec<String>,
	/// Files copied verbatim (no markdown transform) in vitepress mode.
	#[serde(default)]
	pub skip_transform: Vec<String>,
}

impl Default for PatternConfig {
	fn default() -> Self {
		Self {
			markdown: default_markdown_patterns(),
			html: default_html_patterns(),
			exclude: Vec::new(),
			skip_transform: Vec::new(),
		}
	}
}

fn default_source() -> PathBuf {
	PathBuf::from("docs-src")
}

fn default_dest() -> PathBuf {
	PathBuf::from("docs")
}

fn default_vitepress_dest() -> PathBuf {
	PathBuf::from("site/docs")
}

fn default_markdown_patterns() -> Vec<String> {
	vec!["**/*.md".to_string()]
}

fn default_html_patterns() -> Vec<String> {
	vec!["**/*.html".to_string()]
}

/// A [`SyncConfig`] resolved against a project root and output mode. This is
/// what the transform and sync engines consume: absolute roots and compiled
/// glob sets.
#[derive(Debug)]
pub struct SyncContext {
	/// Project root the config was loaded from.
	pub root: PathBuf,
	/// Active output mode.
	pub mode: OutputMode,
	/// Absolute source root.
	pub source_root: PathBuf,
	/// Absolute destination root for the active mode.
	pub dest_root: PathBuf,
	/// Source root relative to the project root, for header link arithmetic.
	pub source_rel: PathBuf,
	/// Destination root relative to the project root.
	pub dest_rel: PathBuf,
	/// Replacement for [`VERSION_PLACEHOLDER`].
	pub version: String,
	/// Replacement for [`CDN_PLACEHOLDER`].
	pub cdn_url: String,
	/// Markdown candidate patterns.
	pub markdown_set: GlobSet,
	/// HTML candidate patterns.
	pub html_set: GlobSet,
	/// Standard-mode exclusions.
	pub exclude_set: GlobSet,
	/// Vitepress-mode verbatim entries.
	pub skip_set: GlobSet,
}

impl SyncContext {
	/// Resolve a config against a project root for the given output mode.
	pub fn new(root: &Path, config: &SyncConfig, mode: OutputMode) -> DocsyncResult<Self> {
		let dest_rel = match mode {
			OutputMode::Standard => config.paths.dest.clone(),
			OutputMode::Vitepress => config.paths.vitepress_dest.clone(),
		};

		Ok(Self {
			root: root.to_path_buf(),
			mode,
			source_root: root.join(&config.paths.source),
			dest_root: root.join(&dest_rel),
			source_rel: config.paths.source.clone(),
			dest_rel,
			version: config.placeholders.version.clone(),
			cdn_url: config.placeholders.cdn_url.clone(),
			markdown_set: build_glob_set(&config.patterns.markdown)?,
			html_set: build_glob_set(&config.patterns.html)?,
			exclude_set: build_glob_set(&config.patterns.exclude)?,
			skip_set: build_glob_set(&config.patterns.skip_transform)?,
		})
	}

	/// Whether a source file (given relative to the source root) is copied
	/// verbatim instead of transformed. This is the injected skip predicate:
	/// the engine never hard-codes entry file names.
	pub fn should_skip_transform(&self, rel: &Path) -> bool {
		self.mode == OutputMode::Vitepress && self.skip_set.is_match(rel)
	}

	/// Whether a source file (relative to the source root) is excluded from
	/// the candidate set. Exclusions only apply in standard mode; vitepress
	/// mode publishes the full tree.
	pub fn is_excluded(&self, rel: &Path) -> bool {
		self.mode == OutputMode::Standard && self.exclude_set.is_match(rel)
	}
}

/// Build a `GlobSet` from pattern strings, failing on the first invalid
/// pattern.
fn build_glob_set(patterns: &[String]) -> DocsyncResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|e| {
			DocsyncError::Pattern {
				pattern: pattern.clone(),
				message: e.to_string(),
			}
		})?;
		builder.add(glob);
	}
	builder.build().map_err(|e| {
		DocsyncError::Pattern {
			pattern: String::new(),
			message: e.to_string(),
		}
	})
}
