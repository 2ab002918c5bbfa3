//! `docsync_core` is the core library for the docsync documentation
//! publishing tool. It keeps a published documentation tree in sync with its
//! authored sources by applying deterministic content transforms and copying
//! only files whose transformed content differs from what already exists at
//! the destination.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Authored source file
//!   → Include resolver (inlines `<!-- @include: … -->` targets, records dependencies)
//!   → Placeholder injector (substitutes <DOCS_VERSION> and <CDN_URL> tokens)
//!   → Block transform engine (duplicates diagram fences, rewrites callout fences)
//!   → Header injector (prepends the machine-generated provenance notice)
//!   → Diff & sync engine (byte-compares against the destination, writes on change)
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading from `docsync.toml`: roots, glob
//!   pattern sets, placeholder values, and the output mode switch.
//! - [`candidates`] - Source tree enumeration and file classification
//!   (markdown, HTML, passthrough).
//! - [`transform`] - Per-file-kind transform drivers.
//! - [`blocks`] - Diagram duplication and callout rewriting over the parsed
//!   markdown tree.
//! - [`include`] - Single-level include directive resolution with dependency
//!   tracking.
//! - [`header`] - Provenance notice generation for markdown and HTML output.
//! - [`sync`] - The diff-and-write gate, run state, include-file removal,
//!   and deletion propagation for watch mode.
//! - [`paths`] - Source-to-destination path mapping and header link
//!   arithmetic.
//!
//! ## Key Types
//!
//! - [`SyncConfig`] / [`SyncContext`] - raw configuration and its resolved
//!   form (absolute roots, compiled glob sets).
//! - [`SyncState`] - the run-scoped change set and include-dependency set,
//!   threaded explicitly through every transform call.
//! - [`SyncOutcome`] - the per-file decision: unchanged, written, or stale.
//! - [`DocsyncError`] - all failure modes, rendered through miette.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use docsync_core::OutputMode;
//! use docsync_core::SyncConfig;
//! use docsync_core::SyncContext;
//! use docsync_core::SyncState;
//! use docsync_core::candidates::collect_candidates;
//! use docsync_core::sync::sync_file;
//! use docsync_core::transform::transform_markdown;
//!
//! let root = Path::new(".");
//! let config = SyncConfig::load(root).unwrap().unwrap_or_default();
//! let ctx = SyncContext::new(root, &config, OutputMode::Standard).unwrap();
//! let mut state = SyncState::new();
//!
//! let candidates = collect_candidates(&ctx).unwrap();
//! for file in &candidates.markdown {
//! 	let content = transform_markdown(&ctx, &mut state, file).unwrap();
//! 	sync_file(&ctx, &mut state, file, Some(content.into_bytes()), true).unwrap();
//! }
//! ```

pub use blocks::*;
pub use config::*;
pub use error::*;
pub use sync::*;

pub mod blocks;
pub mod candidates;
pub mod config;
mod error;
pub mod header;
pub mod include;
pub mod paths;
pub mod sync;
pub mod transform;
