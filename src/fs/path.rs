use std::env;
use std::fs;
use std::path::PathBuf;

use super::{MAX_PATH_LENGTH, MAX_PATH_LENGTH_WITH_TERMINATOR, is_separator};
use crate::error::{Error, Result};

/// Returns `true` if `path` starts with `/` or with a single drive letter
/// followed by `:`. Both forms are recognised on every platform.
pub fn is_absolute_path(path: &str) -> bool {
    match path.as_bytes() {
        [] => false,
        [b'/', ..] => true,
        [drive, b':', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Returns the process working directory, always ending in `/`.
///
/// `capacity` is the space the caller is prepared to hold, terminator
/// included. The call fails if the directory (plus separator and terminator)
/// does not fit.
pub fn current_working_directory(capacity: usize) -> Result<String> {
    if capacity == 0 {
        return Err(Error::InvalidArgument("buffer capacity must be non-zero"));
    }

    let mut cwd = env::current_dir()?
        .into_os_string()
        .into_string()
        .map_err(|raw| Error::NonUtf8Path(PathBuf::from(raw)))?;
    if !cwd.ends_with('/') {
        cwd.push('/');
    }

    let required = cwd.len() + 1;
    if capacity < required {
        return Err(Error::BufferTooSmall { required, capacity });
    }
    Ok(cwd)
}

/// Resolves `path` against the working directory unless it is already
/// absolute, in which case it is returned verbatim.
pub fn absolute_path(path: &str, capacity: usize) -> Result<String> {
    if capacity == 0 {
        return Err(Error::InvalidArgument("buffer capacity must be non-zero"));
    }
    if path.is_empty() {
        return Err(Error::InvalidArgument("path is empty"));
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(Error::PathTooLong {
            path: path.to_owned(),
            max: MAX_PATH_LENGTH,
        });
    }
    if capacity < path.len() + 1 {
        return Err(Error::BufferTooSmall {
            required: path.len() + 1,
            capacity,
        });
    }

    if is_absolute_path(path) {
        return Ok(path.to_owned());
    }

    let mut absolute = current_working_directory(capacity)?;
    absolute.push_str(path);
    if capacity < absolute.len() + 1 {
        return Err(Error::BufferTooSmall {
            required: absolute.len() + 1,
            capacity,
        });
    }
    Ok(absolute)
}

/// Checks whether a file or directory exists at `path`, relative or absolute.
pub fn path_exists(path: &str) -> bool {
    absolute_path(path, MAX_PATH_LENGTH_WITH_TERMINATOR)
        .map(|absolute| fs::metadata(absolute).is_ok())
        .unwrap_or(false)
}

/// The final segment of a path and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastPart<'a> {
    /// Byte offset of the segment within the original path.
    pub start: usize,
    /// File name, or directory name followed by one separator.
    pub name: &'a str,
}

/// Extracts the last segment of `path`.
///
/// For a directory path (trailing separator) the segment is the directory
/// name plus its separator; trailing runs of separators are ignored. For a
/// file path it is the file name with extension.
///
/// Returns `None` when `path` is empty, longer than [`MAX_PATH_LENGTH`],
/// only a separator, or when the segment plus a terminator does not fit in
/// `capacity` bytes.
pub fn extract_last_part_of_path(path: &str, capacity: usize) -> Option<LastPart<'_>> {
    let bytes = path.as_bytes();
    if capacity == 0 || bytes.is_empty() || bytes.len() > MAX_PATH_LENGTH {
        return None;
    }
    if bytes.len() == 1 && is_separator(bytes[0]) {
        return None;
    }

    let is_dir = is_separator(bytes[bytes.len() - 1]);
    let mut end = bytes.len();
    if is_dir {
        while end > 2 && is_separator(bytes[end - 2]) {
            end -= 1;
        }
    }

    let stem = if is_dir { &bytes[..end - 1] } else { &bytes[..end] };
    let start = stem
        .iter()
        .rposition(|&b| is_separator(b))
        .map_or(0, |pos| pos + 1);

    let name = &path[start..end];
    if name.len() + 1 > capacity {
        return None;
    }
    Some(LastPart { start, name })
}
