#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn empty_config() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    CONFIG_DIR
        .get_or_init(|| {
            let dir = tempfile::tempdir().expect("failed to create config dir for tests");
            std::fs::write(dir.path().join("config.toml"), "")
                .expect("failed to write empty config");
            dir
        })
        .path()
}

/// Create a `csrender` command isolated from the user's config and environment.
#[allow(dead_code)]
pub fn csrender_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("csrender"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("CSRENDER_CONFIG", empty_config().join("config.toml"));
    cmd.env_remove("CSRENDER_MARKUP");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
