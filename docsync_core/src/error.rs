use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocsyncError {
	#[error(transparent)]
	#[diagnostic(code(docsync::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse markdown in `{file}`: {message}")]
	#[diagnostic(code(docsync::markdown))]
	Markdown { file: String, message: String },

	#[error("failed to rewrite html in `{file}`: {message}")]
	#[diagnostic(code(docsync::html))]
	Html { file: String, message: String },

	#[error("cannot resolve include `{directive}` in `{file}`")]
	#[diagnostic(
		code(docsync::include_resolution),
		help("check that the include path exists relative to the including file")
	)]
	IncludeResolution {
		directive: String,
		file: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docsync::config_parse),
		help(
			"check that docsync.toml is valid TOML with [paths], [placeholders] and [patterns] \
			 sections"
		)
	)]
	ConfigParse(String),

	#[error("invalid glob pattern `{pattern}`: {message}")]
	#[diagnostic(
		code(docsync::pattern),
		help("patterns use globset syntax, e.g. `**/*.md`")
	)]
	Pattern { pattern: String, message: String },

	#[error("source path `{path}` is outside the source root `{root}`")]
	#[diagnostic(code(docsync::outside_source_root))]
	OutsideSourceRoot { path: String, root: String },
}

pub type DocsyncResult<T> = Result<T, DocsyncError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
