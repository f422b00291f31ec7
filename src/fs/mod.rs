//! Path and directory utilities.
//!
//! Paths are plain strings following one convention: a directory path ends
//! in a separator (`/` or `\`), a file path never does. Both separators may
//! be mixed freely and repeated separators are treated as empty segments.
//! Every path handled here is limited to [`MAX_PATH_LENGTH`] bytes.

mod dir;
mod path;
mod sys;

pub use dir::{recursive_mkdir, recursive_rmdir};
pub use path::{
    LastPart, absolute_path, current_working_directory, extract_last_part_of_path,
    is_absolute_path, path_exists,
};

/// Maximum length of a path in bytes, not counting a terminator.
pub const MAX_PATH_LENGTH: usize = 256;

/// Capacity needed to hold any valid path plus a terminator.
pub const MAX_PATH_LENGTH_WITH_TERMINATOR: usize = MAX_PATH_LENGTH + 1;

/// Returns `true` for both `/` and `\`.
pub fn is_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

/// Returns `true` when `path` names a directory, i.e. ends in a separator.
pub fn is_dir_path(path: &str) -> bool {
    path.as_bytes().last().copied().is_some_and(is_separator)
}
