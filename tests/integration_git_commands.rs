//! Git関連コマンドの統合テスト
//!
//! 実際のgitリポジトリ（git2で作成）に対してCLIを実行する

mod common;

use common::{chronos_cmd, commit_all, init_repo, write_file};
use git2::Repository;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn repo_with_remote() -> (TempDir, TempDir, Repository) {
    let remote = TempDir::new().unwrap();
    Repository::init_bare(remote.path()).unwrap();

    let work = TempDir::new().unwrap();
    write_file(work.path(), "README.md", "# chronos test\n");
    let repo = init_repo(work.path());
    repo.remote("origin", remote.path().to_str().unwrap()).unwrap();

    (work, remote, repo)
}

#[test]
fn tag_push_creates_annotated_tag_and_pushes_it() {
    let (work, remote, repo) = repo_with_remote();

    chronos_cmd(work.path())
        .args(["tag-push", "v1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "git tag -a v1.0.0 -m 'Release version v1.0.0'",
        ))
        .stdout(predicate::str::contains("git push origin v1.0.0"))
        .stdout(predicate::str::contains(
            "Tag 'v1.0.0' created and pushed successfully.",
        ));

    let tag = repo
        .find_reference("refs/tags/v1.0.0")
        .unwrap()
        .peel_to_tag()
        .unwrap();
    assert_eq!(tag.message().unwrap().trim(), "Release version v1.0.0");

    let remote_repo = Repository::open_bare(remote.path()).unwrap();
    assert!(remote_repo.find_reference("refs/tags/v1.0.0").is_ok());
}

#[test]
fn tag_push_uses_custom_message() {
    let (work, _remote, repo) = repo_with_remote();

    chronos_cmd(work.path())
        .args(["git:tag-push", "v2.0.0", "Big release"])
        .assert()
        .success();

    let tag = repo
        .find_reference("refs/tags/v2.0.0")
        .unwrap()
        .peel_to_tag()
        .unwrap();
    assert_eq!(tag.message().unwrap().trim(), "Big release v2.0.0");
}

#[test]
fn tag_push_refuses_existing_tag_without_force() {
    let (work, _remote, _repo) = repo_with_remote();
    chronos_cmd(work.path())
        .args(["tag-push", "v1.0.0"])
        .assert()
        .success();

    chronos_cmd(work.path())
        .args(["tag-push", "v1.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Tag 'v1.0.0' already exists. Use --force to overwrite.",
        ));

    chronos_cmd(work.path())
        .args(["tag-push", "v1.0.0", "Re-release", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git push origin --force v1.0.0"));
}

#[test]
fn diff_writes_patch_between_revisions() {
    let work = TempDir::new().unwrap();
    write_file(work.path(), "notes.txt", "one\n");
    let repo = init_repo(work.path());
    write_file(work.path(), "notes.txt", "two\n");
    commit_all(&repo, "second");

    chronos_cmd(work.path())
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("git diff HEAD~1 HEAD"))
        .stdout(predicate::str::contains(
            "Diff file created successfully: project_diff.patch",
        ));

    let patch = fs::read_to_string(work.path().join("project_diff.patch")).unwrap();
    assert!(patch.contains("diff --git a/notes.txt b/notes.txt"));
    assert!(patch.contains("-one"));
    assert!(patch.contains("+two"));
}

#[test]
fn diff_with_unknown_revision_fails() {
    let work = TempDir::new().unwrap();
    write_file(work.path(), "notes.txt", "one\n");
    init_repo(work.path());

    chronos_cmd(work.path())
        .args(["git:diff", "no-such-rev", "HEAD", "-o", "out.patch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error creating diff file"));

    assert!(!work.path().join("out.patch").exists());
}

#[test]
fn commit_message_outside_repository_fails() {
    let dir = TempDir::new().unwrap();

    chronos_cmd(dir.path())
        .arg("commit-message")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository."));
}

#[test]
fn commit_message_without_changes_succeeds() {
    let work = TempDir::new().unwrap();
    write_file(work.path(), "README.md", "hello\n");
    init_repo(work.path());

    chronos_cmd(work.path())
        .arg("git:commit-message")
        .assert()
        .success()
        .stdout(predicate::str::contains("No uncommitted changes found."));
}

#[test]
fn commit_message_requires_api_key_and_leaves_index_alone() {
    let work = TempDir::new().unwrap();
    write_file(work.path(), "README.md", "hello\n");
    init_repo(work.path());
    write_file(work.path(), "new.txt", "untracked\n");

    chronos_cmd(work.path())
        .arg("commit-message")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is not set"));

    let index = Repository::open(work.path()).unwrap().index().unwrap();
    assert!(index.get_path(Path::new("new.txt"), 0).is_none());
}

#[test]
fn commit_message_with_unknown_provider_fails() {
    let work = TempDir::new().unwrap();
    write_file(work.path(), "README.md", "hello\n");
    init_repo(work.path());
    write_file(work.path(), "README.md", "changed\n");

    chronos_cmd(work.path())
        .args(["commit-message", "--provider", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provider 'nowhere' not configured."));
}

#[test]
fn commit_with_local_message() {
    let work = TempDir::new().unwrap();
    write_file(work.path(), "README.md", "hello\n");
    let repo = init_repo(work.path());
    write_file(work.path(), "new.txt", "fresh\n");

    chronos_cmd(work.path())
        .args(["commit", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Commit Message"))
        .stdout(predicate::str::contains("Changes to be committed:"))
        .stdout(predicate::str::contains("Commit created successfully:"));

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.summary(), Some("Added new.txt"));
    assert!(head.message().unwrap().contains("Details:\nAdded new.txt"));
}

#[test]
fn commit_declined_changes_nothing() {
    let work = TempDir::new().unwrap();
    write_file(work.path(), "README.md", "hello\n");
    let repo = init_repo(work.path());
    let before = repo.head().unwrap().target().unwrap();
    write_file(work.path(), "README.md", "edited\n");

    chronos_cmd(work.path())
        .arg("git:commit")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Do you want to create this commit? (y/N)",
        ))
        .stdout(predicate::str::contains("Commit aborted."));

    assert_eq!(repo.head().unwrap().target().unwrap(), before);
}
