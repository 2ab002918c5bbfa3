mod common;

use docsync_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

use crate::common::docsync_cmd;
use crate::common::write_source;

#[test]
fn verify_passes_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_source(tmp.path(), "guide.md", "# Guide\n");

	let mut sync = docsync_cmd();
	sync.arg("--path").arg(tmp.path()).assert().success();

	let mut verify = docsync_cmd();
	verify
		.arg("--verify")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn verify_fails_when_stale_and_explains_the_fix() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_source(tmp.path(), "guide.md", "# Guide\n");

	let mut verify = docsync_cmd();
	verify
		.arg("--verify")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(1)
		.stdout(predicates::str::contains(
			"File to be transformed: docs-src/guide.md",
		))
		.stderr(
			predicates::str::contains("out of date")
				.and(predicates::str::contains("Run `docsync`")),
		);

	Ok(())
}

#[test]
fn verify_never_touches_the_destination() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_source(tmp.path(), "guide.md", "# Guide\n");

	let mut verify = docsync_cmd();
	verify
		.arg("--verify")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure();

	// No destination tree, no side effects at all.
	assert!(!tmp.path().join("docs").exists());

	Ok(())
}

#[test]
fn verify_keeps_a_stale_included_copy_on_disk() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_source(tmp.path(), "a.md", "<!-- @include: b.md -->\n");
	write_source(tmp.path(), "b.md", "Child body\n");

	let mut sync = docsync_cmd();
	sync.arg("--path").arg(tmp.path()).assert().success();

	// Stale on purpose: the source changed after the last sync.
	write_source(tmp.path(), "a.md", "Changed\n\n<!-- @include: b.md -->\n");

	let mut verify = docsync_cmd();
	verify
		.arg("--verify")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stdout(predicates::str::contains("Removed includable file").not());

	Ok(())
}

#[test]
fn verify_verbose_prints_a_diff() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_source(tmp.path(), "note.md", "Old line\n");

	let mut sync = docsync_cmd();
	sync.arg("--path").arg(tmp.path()).assert().success();

	write_source(tmp.path(), "note.md", "New line\n");

	let mut verify = docsync_cmd();
	verify
		.arg("--verify")
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(
			predicates::str::contains("-Old line")
				.and(predicates::str::contains("+New line")),
		);

	Ok(())
}
