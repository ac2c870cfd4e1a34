use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to enumerate directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to link {target} as {link}")]
    Symlink {
        target: PathBuf,
        link: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to move {src} to {dst}")]
    Move {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// create a directory and any missing parents, succeeding if it already exists
pub fn mkdir_p(path: &Path) -> Result<(), FsError> {
    fs::create_dir_all(path).map_err(|source| FsError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// create a symbolic link at `link` pointing to `target`
///
/// Idempotent: a link already pointing at `target` is left alone, anything
/// else at `link` is replaced.
pub fn make_symlink(target: &Path, link: &Path) -> Result<(), FsError> {
    let symlink_error = |source| FsError::Symlink {
        target: target.to_path_buf(),
        link: link.to_path_buf(),
        source,
    };

    if let Ok(existing) = fs::read_link(link) {
        if existing == target {
            debug!(link = ?link, "Link already in place");
            return Ok(());
        }
    }

    if link.symlink_metadata().is_ok() {
        fs::remove_file(link).map_err(symlink_error)?;
    }

    std::os::unix::fs::symlink(target, link).map_err(symlink_error)
}

/// move a file verbatim, no renaming
///
/// Work and restart directories live on the same filesystem, so a rename
/// is sufficient here.
pub fn move_file(src: &Path, dst: &Path) -> Result<(), FsError> {
    fs::rename(src, dst).map_err(|source| FsError::Move {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })
}
