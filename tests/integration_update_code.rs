//! update-code の統合テスト
//!
//! instruct.json の検証と適用を、ライブラリAPIとCLIの両方から確認する

mod common;

use common::{chronos_cmd, write_file, write_manifest};
use chronos::application::use_cases::apply_manifest::{ApplyManifestError, ApplyManifestUseCase};
use chronos::domain::entities::operation::Operation;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BASIC_MANIFEST: &str = r##"[
    {"path": "src/new.rs", "action": "create", "type": "file", "content": "pub fn answer() -> u32 { 42 }\n"},
    {"path": "bin", "action": "create", "type": "directory", "permissions": "0750"},
    {"path": "scripts/run.sh", "action": "create", "type": "file", "content": "#!/bin/sh\n", "permissions": "755"},
    {"path": "old.txt", "action": "delete", "type": "file"}
]"##;

#[test]
fn update_code_applies_every_operation() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "old.txt", "stale");
    write_manifest(dir.path(), BASIC_MANIFEST);

    chronos_cmd(dir.path())
        .arg("update-code")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created file: src/new.rs with permissions 644"))
        .stdout(predicate::str::contains("Created directory: bin with permissions 750"))
        .stdout(predicate::str::contains("Removing existing file at path old.txt."))
        .stdout(predicate::str::contains("Deleted file: old.txt"))
        .stdout(predicate::str::contains("File system updated successfully."));

    assert_eq!(
        fs::read_to_string(dir.path().join("src/new.rs")).unwrap(),
        "pub fn answer() -> u32 { 42 }\n"
    );
    assert!(dir.path().join("bin").is_dir());
    assert!(!dir.path().join("old.txt").exists());
}

#[cfg(unix)]
#[test]
fn update_code_sets_permissions() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), BASIC_MANIFEST);

    chronos_cmd(dir.path()).arg("update-code").assert().success();

    assert_eq!(common::mode_of(&dir.path().join("src/new.rs")), 0o644);
    assert_eq!(common::mode_of(&dir.path().join("bin")), 0o750);
    assert_eq!(common::mode_of(&dir.path().join("scripts/run.sh")), 0o755);
}

#[cfg(unix)]
#[test]
fn default_permissions_ignore_previous_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "tool.sh", "old");
    fs::set_permissions(dir.path().join("tool.sh"), fs::Permissions::from_mode(0o700)).unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::set_permissions(dir.path().join("data"), fs::Permissions::from_mode(0o700)).unwrap();
    write_manifest(
        dir.path(),
        r#"[
            {"path": "tool.sh", "action": "create", "type": "file", "content": "new"},
            {"path": "data", "action": "create", "type": "directory"}
        ]"#,
    );

    chronos_cmd(dir.path()).arg("update-code").assert().success();

    assert_eq!(common::mode_of(&dir.path().join("tool.sh")), 0o644);
    assert_eq!(common::mode_of(&dir.path().join("data")), 0o755);
}

#[test]
fn applying_twice_gives_the_same_tree() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "old.txt", "stale");
    write_manifest(dir.path(), BASIC_MANIFEST);
    let use_case = ApplyManifestUseCase::new(dir.path());

    assert!(use_case.execute().unwrap().is_success());
    let first = fs::read_to_string(dir.path().join("src/new.rs")).unwrap();
    #[cfg(unix)]
    let first_modes: Vec<u32> = ["src/new.rs", "bin", "scripts/run.sh"]
        .iter()
        .map(|path| common::mode_of(&dir.path().join(path)))
        .collect();

    let second_report = use_case.execute().unwrap();
    assert!(second_report.is_success());
    assert_eq!(fs::read_to_string(dir.path().join("src/new.rs")).unwrap(), first);
    #[cfg(unix)]
    {
        let second_modes: Vec<u32> = ["src/new.rs", "bin", "scripts/run.sh"]
            .iter()
            .map(|path| common::mode_of(&dir.path().join(path)))
            .collect();
        assert_eq!(second_modes, first_modes);
        assert_eq!(second_modes, vec![0o644, 0o750, 0o755]);
    }
    assert!(dir.path().join("bin").is_dir());
    assert!(!dir.path().join("old.txt").exists());

    // the second run replaces what the first one created
    let replaced: Vec<_> = second_report
        .outcomes
        .iter()
        .filter(|outcome| outcome.removed_existing)
        .map(|outcome| outcome.index)
        .collect();
    assert_eq!(replaced, vec![0, 1, 2]);
}

#[test]
fn create_then_delete_leaves_only_the_parent() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"[
            {"path": "a/b.txt", "action": "create", "type": "file", "content": "temporary"},
            {"path": "a/b.txt", "action": "delete", "type": "file"}
        ]"#,
    );

    chronos_cmd(dir.path())
        .arg("update-code")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Created file: a/b.txt with permissions 644"))
        .stdout(predicate::str::contains("Removing existing file at path a/b.txt."))
        .stdout(predicate::str::contains("Deleted file: a/b.txt"))
        .stdout(predicate::str::contains("File system updated successfully."));

    assert!(dir.path().join("a").is_dir());
    assert!(!dir.path().join("a/b.txt").exists());
}

#[test]
fn schema_violation_applies_nothing() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"[
            {"path": "valid.txt", "action": "create", "type": "file", "content": "ok"},
            {"path": "bad.txt", "action": "update", "type": "file"},
            {"path": "perm.txt", "action": "create", "type": "file", "content": "", "permissions": "999"}
        ]"#,
    );

    chronos_cmd(dir.path())
        .arg("update-code")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            r#"Missing or invalid "action" at index 1. Allowed actions are "create" and "delete"."#,
        ))
        .stderr(predicate::str::contains(
            r#"Invalid "permissions" format at index 2. Expected format is a three or four digit octal number."#,
        ))
        .stderr(predicate::str::contains(
            "Invalid instruct.json structure according to FileSystemOps standard.",
        ));

    assert!(!dir.path().join("valid.txt").exists());
}

#[test]
fn every_violation_is_reported() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"[
            "not an object",
            {"path": "a", "action": "create", "type": "file"},
            {"path": "b", "action": "create", "type": "link"}
        ]"#,
    );

    match ApplyManifestUseCase::new(dir.path()).execute() {
        Err(ApplyManifestError::SchemaViolation(report)) => assert_eq!(
            report.messages(),
            vec![
                r#"Missing or invalid "path" at index 0."#.to_string(),
                r#"Missing or invalid "content" for "create" action of type "file" at index 1."#
                    .to_string(),
                r#"Missing or invalid "type" at index 2. Allowed types are "file" and "directory"."#
                    .to_string(),
            ]
        ),
        other => panic!("expected schema violation, got {:?}", other.map(|r| r.outcomes.len())),
    }
}

#[test]
fn failed_operation_does_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"[
            {"path": "blocker", "action": "create", "type": "file", "content": "plain file"},
            {"path": "blocker/child.txt", "action": "create", "type": "file", "content": "x"},
            {"path": "after.txt", "action": "create", "type": "file", "content": "still here"}
        ]"#,
    );

    chronos_cmd(dir.path())
        .arg("update-code")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Created file: blocker with permissions 644"))
        .stdout(predicate::str::contains("Created file: after.txt with permissions 644"))
        .stderr(predicate::str::contains(
            "An error occurred during create operation at index 1",
        ))
        .stderr(predicate::str::contains("1 of 3 operation(s) failed"));

    assert_eq!(
        fs::read_to_string(dir.path().join("after.txt")).unwrap(),
        "still here"
    );
}

#[test]
fn delete_removes_whatever_is_there() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "cache/a/b.txt", "nested");
    write_manifest(
        dir.path(),
        r#"[
            {"path": "cache", "action": "delete", "type": "file"},
            {"path": "ghost.txt", "action": "delete", "type": "file"}
        ]"#,
    );

    let report = ApplyManifestUseCase::new(dir.path()).execute().unwrap();

    assert!(report.is_success());
    assert!(!dir.path().join("cache").exists());
    assert!(report.outcomes[0].removed_existing);
    assert!(!report.outcomes[1].removed_existing);
    assert!(matches!(report.outcomes[1].operation, Operation::Delete { .. }));
}

#[test]
fn missing_manifest_is_reported() {
    let dir = TempDir::new().unwrap();

    chronos_cmd(dir.path())
        .arg("update-code")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File instruct.json not found in"));
}

#[test]
fn malformed_json_is_reported() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "[{\"path\": ");

    chronos_cmd(dir.path())
        .arg("gpt:update-code")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON:"));
}
