use std::fs;

use tracing::debug;
use walkdir::WalkDir;

use super::{MAX_PATH_LENGTH, MAX_PATH_LENGTH_WITH_TERMINATOR, absolute_path, is_dir_path, sys};
use crate::error::{Error, Result};

/// Creates every missing directory along `path`.
///
/// Only components followed by a separator are created, so a trailing file
/// name is ignored. Directories that already exist are accepted and runs of
/// repeated separators are skipped.
pub fn recursive_mkdir(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidArgument("directory path is empty"));
    }

    let target = absolute_path(path, MAX_PATH_LENGTH_WITH_TERMINATOR)?;
    let root_len = sys::root_len(&target)
        .ok_or(Error::InvalidArgument("directory path has no root"))?;

    let bytes = target.as_bytes();
    for index in root_len..bytes.len() {
        if !sys::is_dir_separator(bytes[index]) {
            continue;
        }
        // Empty segment, e.g. "a//b".
        if sys::is_dir_separator(bytes[index - 1]) {
            continue;
        }

        let partial = &target[..=index];
        sys::create_dir(partial).map_err(|source| Error::DirectoryCreationFailed {
            path: partial.to_owned(),
            source,
        })?;
    }

    debug!(path = %target, "directories ensured");
    Ok(())
}

/// Deletes the directory tree rooted at `path`, which must end in `/` or `\`.
///
/// The walk is post-order and never follows symbolic links: a link is
/// removed, not its target.
pub fn recursive_rmdir(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidArgument("directory path is empty"));
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(Error::PathTooLong {
            path: path.to_owned(),
            max: MAX_PATH_LENGTH,
        });
    }
    if !is_dir_path(path) {
        return Err(Error::InvalidArgument(
            "directory path must end in a separator",
        ));
    }

    let walker = WalkDir::new(path).follow_links(false).contents_first(true);
    for entry in walker {
        let entry = entry?;
        let removed = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };
        removed.map_err(|source| Error::RemovalFailed {
            path: entry.path().to_path_buf(),
            source,
        })?;
    }

    debug!(path, "directory tree removed");
    Ok(())
}
