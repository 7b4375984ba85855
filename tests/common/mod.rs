//! Common test utilities and helpers
//!
//! Fixtures shared by the integration tests: temporary projects, manifests,
//! git repositories and a preconfigured `chronos` command.

#![allow(dead_code)]

use assert_cmd::Command;
use git2::{Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEST_NAME: &str = "Chronos Test";
pub const TEST_EMAIL: &str = "chronos@example.com";

/// `chronos -C <dir>` isolated from the user's home, config and API keys
pub fn chronos_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chronos").unwrap();
    cmd.arg("-C")
        .arg(dir)
        .arg("--no-update-check")
        .arg("--no-color")
        .env("HOME", dir)
        .env("GIT_AUTHOR_NAME", TEST_NAME)
        .env("GIT_AUTHOR_EMAIL", TEST_EMAIL)
        .env("GIT_COMMITTER_NAME", TEST_NAME)
        .env("GIT_COMMITTER_EMAIL", TEST_EMAIL)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_API_BASE")
        .env_remove("RUST_LOG")
        .env_remove("CHRONOS_DEBUG")
        .env_remove("DEBUG");
    cmd
}

/// Write `instruct.json` into `dir`
pub fn write_manifest(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("instruct.json");
    fs::write(&path, json).unwrap();
    path
}

/// Write a file, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Unix permission bits of a path
#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).unwrap().permissions().mode() & 0o7777
}

/// Empty temporary directory with a named project directory inside
pub fn project(name: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join(name);
    fs::create_dir_all(&root).unwrap();
    (temp, root)
}

/// Initialize a repository and commit every file currently in `dir`
pub fn init_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();
    commit_all(&repo, "initial");
    repo
}

/// Stage the whole work tree and commit it on HEAD
pub fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now(TEST_NAME, TEST_EMAIL).unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}
