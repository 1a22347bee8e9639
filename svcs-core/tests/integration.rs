//! Integration tests for svcs-core

use std::fs;
use svcs_core::{CommitOutcome, Error, Repository};
use tempfile::TempDir;

fn committed_id(outcome: CommitOutcome) -> String {
    match outcome {
        CommitOutcome::Committed(id) => id,
        CommitOutcome::NothingToCommit => panic!("expected a commit"),
    }
}

fn assert_log_matches_store(repo: &Repository) -> anyhow::Result<()> {
    let mut logged: Vec<_> = repo.log().all()?.into_iter().map(|e| e.id).collect();
    logged.sort();
    assert_eq!(logged, repo.snapshots().ids()?);
    Ok(())
}

#[test]
fn test_edit_commit_cycle() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    let file = temp_dir.path().join("a.txt");

    fs::write(&file, "hello")?;
    repo.track("a.txt")?;

    let first = committed_id(repo.commit("first", "alice")?);
    assert_eq!(repo.log().len()?, 1);

    fs::write(&file, "world")?;
    let second = committed_id(repo.commit("first", "alice")?);
    assert_ne!(first, second);
    assert_eq!(repo.log().len()?, 2);

    assert_eq!(repo.commit("second", "alice")?, CommitOutcome::NothingToCommit);
    assert_eq!(repo.log().len()?, 2);
    assert_eq!(repo.snapshots().ids()?.len(), 2);

    assert_log_matches_store(&repo)
}

#[test]
fn test_empty_index_commits_nothing() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;

    assert_eq!(repo.commit("msg", "alice")?, CommitOutcome::NothingToCommit);
    assert!(repo.log().all()?.is_empty());
    assert!(repo.snapshots().ids()?.is_empty());
    Ok(())
}

#[test]
fn test_checkout_round_trip() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    let binary: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    fs::create_dir(temp_dir.path().join("src"))?;
    fs::write(temp_dir.path().join("README"), "readme v1")?;
    fs::write(temp_dir.path().join("src/data.bin"), &binary)?;
    repo.track("README")?;
    repo.track("src/data.bin")?;

    let v1 = committed_id(repo.commit("v1", "alice")?);

    fs::write(temp_dir.path().join("README"), "readme v2")?;
    fs::write(temp_dir.path().join("src/data.bin"), b"truncated")?;
    let v2 = committed_id(repo.commit("v2", "alice")?);

    repo.checkout(&v1)?;
    assert_eq!(fs::read_to_string(temp_dir.path().join("README"))?, "readme v1");
    assert_eq!(fs::read(temp_dir.path().join("src/data.bin"))?, binary);

    // Working copy now matches v1, which is not the latest commit.
    assert!(repo.commit("back to v1", "alice")?.is_committed());

    repo.checkout(&v2)?;
    assert_eq!(fs::read_to_string(temp_dir.path().join("README"))?, "readme v2");
    assert_eq!(fs::read(temp_dir.path().join("src/data.bin"))?, b"truncated");

    assert_log_matches_store(&repo)
}

#[test]
fn test_checkout_unknown_id_touches_nothing() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;
    repo.track("a.txt")?;
    repo.commit("first", "alice")?;
    fs::write(temp_dir.path().join("a.txt"), "local edits")?;

    for id in ["unknown", "../vcs", ""] {
        assert!(matches!(repo.checkout(id), Err(Error::CommitNotFound(_))));
    }
    assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt"))?, "local edits");
    Ok(())
}

#[test]
fn test_tracking_missing_file_never_mutates_index() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;
    repo.track("a.txt")?;

    assert!(matches!(repo.track("ghost.txt"), Err(Error::FileNotFound(_))));
    assert!(matches!(repo.track("../outside.txt"), Err(Error::InvalidPath(_))));
    assert_eq!(repo.index().list()?, vec!["a.txt"]);
    Ok(())
}

#[test]
fn test_history_reverses_creation_order() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    let file = temp_dir.path().join("a.txt");
    fs::write(&file, "0")?;
    repo.track("a.txt")?;

    let mut created = Vec::new();
    for i in 1..=5 {
        fs::write(&file, i.to_string())?;
        created.push(committed_id(repo.commit(&format!("commit {}", i), "alice")?));
    }

    let shown: Vec<_> = repo.history()?.into_iter().map(|e| e.id).collect();
    created.reverse();
    assert_eq!(shown, created);

    assert_log_matches_store(&repo)
}

#[test]
fn test_newly_tracked_file_triggers_commit() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    fs::write(temp_dir.path().join("a.txt"), "a")?;
    fs::write(temp_dir.path().join("b.txt"), "b")?;
    repo.track("a.txt")?;
    repo.commit("only a", "alice")?;

    repo.track("b.txt")?;
    let id = committed_id(repo.commit("a and b", "alice")?);

    let files = repo.snapshots().read_snapshot(&id)?;
    assert_eq!(files.keys().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_failed_log_append_rolls_back_snapshot() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;
    repo.track("a.txt")?;

    // A log that reads as empty but cannot be opened for writing.
    let log_path = repo.control_dir().join("log.txt");
    fs::remove_file(&log_path)?;
    std::os::unix::fs::symlink(temp_dir.path().join("missing/log.txt"), &log_path)?;

    assert!(matches!(repo.commit("first", "alice"), Err(Error::Io(_))));
    assert!(repo.snapshots().ids()?.is_empty());
    assert_eq!(fs::read_dir(repo.snapshots().root())?.count(), 0);
    Ok(())
}
