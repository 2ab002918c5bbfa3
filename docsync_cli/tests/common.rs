use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn docsync_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("docsync"));
	cmd.env("NO_COLOR", "1");
	cmd
}

#[allow(dead_code)]
pub fn write_source(root: &Path, rel: &str, content: &str) {
	let path = root.join("docs-src").join(rel);
	std::fs::create_dir_all(path.parent().unwrap()).unwrap();
	std::fs::write(&path, content).unwrap();
}
