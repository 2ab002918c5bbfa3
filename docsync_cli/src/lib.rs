use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Transform authored documentation and keep the published copy in sync.",
	long_about = "docsync transforms an authored documentation tree (diagram blocks, callouts, \
	              includes, placeholders) and mirrors the result into the published tree, touching \
	              only files whose content actually changed.\n\nQuick start:\n  docsync            \
	              Transform and sync the published docs\n  docsync --verify   Check the published \
	              docs are up to date (CI)\n  docsync --watch    Re-sync on every source change\n  \
	              docsync --vitepress  Build the vitepress variant of the site"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct DocsyncCli {
	/// Verify that the published docs are up to date without writing
	/// anything. Exits with a non-zero status code when any file is stale.
	///
	/// Ideal for CI pipelines to enforce that generated docs are committed.
	#[arg(long, default_value_t = false)]
	pub verify: bool,

	/// Stage the destination tree with `git add` after a run that changed
	/// files. Skipped in verify mode and when nothing changed.
	#[arg(long, default_value_t = false)]
	pub git: bool,

	/// Watch the source tree and re-sync automatically on every change.
	/// Deletions in the source tree are propagated to the destination.
	#[arg(long, default_value_t = false)]
	pub watch: bool,

	/// Build for vitepress: output goes to the vitepress destination tree,
	/// callouts render as `::: kind` containers, no provenance headers are
	/// emitted, and standard-mode exclusions are lifted.
	#[arg(long, default_value_t = false)]
	pub vitepress: bool,

	/// Path to the project root directory.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Enable verbose output. In verify mode, prints a unified diff for each
	/// stale file.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
