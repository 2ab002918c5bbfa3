use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use docsync_cli::DocsyncCli;
use docsync_core::AnyEmptyResult;
use docsync_core::DocsyncError;
use docsync_core::OutputMode;
use docsync_core::SyncConfig;
use docsync_core::SyncContext;
use docsync_core::SyncOutcome;
use docsync_core::SyncState;
use docsync_core::candidates::FileKind;
use docsync_core::candidates::classify;
use docsync_core::candidates::collect_candidates;
use docsync_core::paths::source_relative;
use docsync_core::sync::propagate_removal;
use docsync_core::sync::remove_included_files;
use docsync_core::sync::sync_file;
use docsync_core::transform::transform_html;
use docsync_core::transform::transform_markdown;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = DocsyncCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	// Engine tracing goes to stderr, enabled via RUST_LOG.
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.try_init()
		.ok();

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<DocsyncError>() {
			Ok(err) => {
				let report: miette::Report = (*err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn run(args: &DocsyncCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = SyncConfig::load(&root)?.unwrap_or_default();
	let mode = if args.vitepress {
		OutputMode::Vitepress
	} else {
		OutputMode::Standard
	};
	let ctx = SyncContext::new(&root, &config, mode)?;

	let stale_count = run_sync_once(args, &ctx)?;

	if args.verify {
		if stale_count > 0 {
			eprintln!();
			eprintln!(
				"Verification failed: {stale_count} published file(s) are out of date."
			);
			eprintln!(
				"Run `docsync{}` to regenerate the published docs, then commit the result.",
				if args.vitepress { " --vitepress" } else { "" }
			);
			if !args.watch {
				process::exit(1);
			}
		} else {
			println!("Check passed: published docs are up to date.");
		}
		if !args.watch {
			return Ok(());
		}
		return run_watch_verify(args, &ctx);
	}

	if !args.watch {
		return Ok(());
	}

	run_watch(args, &ctx)
}

fn resolve_root(args: &DocsyncCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Run one full sync pass over the source tree. Returns the number of files
/// whose published copy differed (written in sync mode, merely reported in
/// verify mode).
fn run_sync_once(args: &DocsyncCli, ctx: &SyncContext) -> Result<usize, Box<dyn std::error::Error>> {
	let write = !args.verify;
	let verb = if write { "Transforming" } else { "Verifying" };
	let mut state = SyncState::new();

	let candidates = collect_candidates(ctx)?;

	if !candidates.markdown.is_empty() {
		println!("{verb} {} markdown files...", candidates.markdown.len());
	}
	for file in &candidates.markdown {
		let content = transform_markdown(ctx, &mut state, file)?;
		sync_one(args, ctx, &mut state, file, Some(content), write)?;
	}

	for dest in remove_included_files(&mut state, write)? {
		if write {
			println!(
				"Removed includable file: {}",
				make_relative(&dest, &ctx.root)
			);
		}
	}

	if !candidates.html.is_empty() {
		println!("{verb} {} html files...", candidates.html.len());
	}
	for file in &candidates.html {
		let content = transform_html(ctx, file)?;
		sync_one(args, ctx, &mut state, file, Some(content), write)?;
	}

	if !candidates.other.is_empty() {
		println!("Copying {} other files...", candidates.other.len());
	}
	for file in &candidates.other {
		sync_one(args, ctx, &mut state, file, None, write)?;
	}

	if write && args.git && state.has_changes() {
		stage_destination(ctx);
	}

	Ok(state.files_transformed.len())
}

/// Sync a single file and report the outcome. `content` of `None` means the
/// raw source bytes are copied unchanged.
fn sync_one(
	args: &DocsyncCli,
	ctx: &SyncContext,
	state: &mut SyncState,
	source_path: &Path,
	content: Option<String>,
	write: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let bytes = content.as_ref().map(|c| c.clone().into_bytes());
	let outcome = sync_file(ctx, state, source_path, bytes, write)?;
	let src = make_relative(source_path, &ctx.root);

	match outcome {
		SyncOutcome::Unchanged => {}
		SyncOutcome::Written { dest } => {
			if content.is_some() {
				println!(
					"File transformed: {src}, and copied to {}",
					make_relative(&dest, &ctx.root)
				);
			} else {
				println!("File copied: {src} to {}", make_relative(&dest, &ctx.root));
			}
		}
		SyncOutcome::Stale { dest } => {
			if content.is_some() {
				println!("File to be transformed: {src}");
			} else {
				println!("File to be copied: {src}");
			}
			if args.verbose {
				if let Some(updated) = &content {
					let existing = std::fs::read_to_string(&dest).unwrap_or_default();
					print_diff(&existing, updated);
				}
			}
		}
	}

	Ok(())
}

/// Stage the destination tree so a sync followed by a commit is one step.
/// Fire and forget: a missing `git` binary or a failed add never fails the
/// sync itself.
fn stage_destination(ctx: &SyncContext) {
	let result = process::Command::new("git")
		.arg("add")
		.arg(&ctx.dest_root)
		.current_dir(&ctx.root)
		.spawn();
	if let Err(e) = result {
		eprintln!("{} failed to run git add: {e}", colored!("warning:", yellow));
	}
}

/// Re-run the full verification pass on every batch of source changes.
/// Never exits on staleness; the operator is watching the output.
fn run_watch_verify(args: &DocsyncCli, ctx: &SyncContext) -> Result<(), Box<dyn std::error::Error>> {
	println!();
	println!(
		"{}",
		colored!("Watching for file changes... (press Ctrl+C to stop)", bold)
	);

	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				if matches!(
					event.kind,
					notify::EventKind::Create(_)
						| notify::EventKind::Modify(_)
						| notify::EventKind::Remove(_)
				) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&ctx.source_root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, verifying...");
		match run_sync_once(args, ctx) {
			Ok(0) => println!("Check passed: published docs are up to date."),
			Ok(count) => eprintln!("{count} published file(s) are out of date."),
			Err(e) => eprintln!("{} {e}", colored!("error:", red)),
		}
	}
}

fn run_watch(args: &DocsyncCli, ctx: &SyncContext) -> Result<(), Box<dyn std::error::Error>> {
	println!();
	println!(
		"{}",
		colored!("Watching for file changes... (press Ctrl+C to stop)", bold)
	);

	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				let _ = tx.send(event);
			}
		})?;

	use notify::Watcher;
	watcher.watch(&ctx.source_root, notify::RecursiveMode::Recursive)?;

	// One long-lived state so include bookkeeping spans events.
	let mut state = SyncState::new();

	loop {
		let event = rx.recv()?;
		if let Err(e) = handle_watch_event(args, ctx, &mut state, &event) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

/// Dispatch a single filesystem event. Deletions propagate to the
/// destination; creations and modifications re-transform the affected file.
/// Watch mode always writes.
fn handle_watch_event(
	args: &DocsyncCli,
	ctx: &SyncContext,
	state: &mut SyncState,
	event: &notify::Event,
) -> AnyEmptyResult {
	match event.kind {
		notify::EventKind::Remove(kind) => {
			let is_dir = match kind {
				notify::event::RemoveKind::File => Some(false),
				notify::event::RemoveKind::Folder => Some(true),
				_ => None,
			};
			for path in &event.paths {
				if !path.starts_with(&ctx.source_root) {
					continue;
				}
				let dest = propagate_removal(ctx, path, is_dir)?;
				println!("Removed: {}", make_relative(&dest, &ctx.root));
			}
		}
		notify::EventKind::Create(_) | notify::EventKind::Modify(_) => {
			for path in &event.paths {
				if !path.starts_with(&ctx.source_root) || !path.is_file() {
					continue;
				}
				sync_watched_file(args, ctx, state, path)?;
			}
		}
		_ => {}
	}

	Ok(())
}

fn sync_watched_file(
	args: &DocsyncCli,
	ctx: &SyncContext,
	state: &mut SyncState,
	path: &Path,
) -> AnyEmptyResult {
	let rel = source_relative(ctx, path)?;

	match classify(ctx, rel) {
		Some(FileKind::Markdown) => {
			let content = transform_markdown(ctx, state, path)?;
			sync_one(args, ctx, state, path, Some(content), true)?;
			for dest in remove_included_files(state, true)? {
				println!(
					"Removed includable file: {}",
					make_relative(&dest, &ctx.root)
				);
			}
		}
		Some(FileKind::Html) => {
			let content = transform_html(ctx, path)?;
			sync_one(args, ctx, state, path, Some(content), true)?;
		}
		Some(FileKind::Other) => {
			sync_one(args, ctx, state, path, None, true)?;
		}
		None => {}
	}

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
