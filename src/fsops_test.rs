use crate::fsops::{make_symlink, mkdir_p, move_file, FsError};
use std::fs;

#[test]
pub fn mkdir_p_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("work/ice");

    mkdir_p(&nested).unwrap();
    mkdir_p(&nested).unwrap();

    assert!(nested.is_dir());
}

#[test]
pub fn make_symlink_creates_and_repeats() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("namcouple");
    let link = dir.path().join("link");
    fs::write(&target, "x").unwrap();

    make_symlink(&target, &link).unwrap();
    make_symlink(&target, &link).unwrap();

    assert_eq!(fs::read_link(&link).unwrap(), target);
}

#[test]
pub fn make_symlink_replaces_a_stale_link() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old");
    let new = dir.path().join("new");
    let link = dir.path().join("link");
    fs::write(&old, "old").unwrap();
    fs::write(&new, "new").unwrap();

    make_symlink(&old, &link).unwrap();
    make_symlink(&new, &link).unwrap();

    assert_eq!(fs::read_link(&link).unwrap(), new);
}

#[test]
pub fn move_file_moves_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a2i.nc");
    let dst = dir.path().join("restart/a2i.nc");
    fs::write(&src, "exchange").unwrap();
    mkdir_p(dst.parent().unwrap()).unwrap();

    move_file(&src, &dst).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "exchange");
}

#[test]
pub fn move_missing_file_fails_with_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("absent.nc");

    match move_file(&src, &dir.path().join("restart/absent.nc")) {
        Err(FsError::Move { src: reported, .. }) => assert_eq!(reported, src),
        other => panic!("expected a move error, got {other:?}"),
    }
}
