use assert_cmd::Command;
use std::path::Path;

/// `hippocampus` pointed at `db`, isolated from the caller's environment.
pub fn hippocampus_cmd(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hippocampus").unwrap();
    cmd.env_remove("HIPPOCAMPUS_DB");
    cmd.arg("--db").arg(db);
    cmd
}
