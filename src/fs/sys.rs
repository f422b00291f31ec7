//! Platform rules for directory creation.
//!
//! Path classification ([`super::is_absolute_path`], segment extraction) is
//! identical everywhere. Only the root prefix that directory creation must
//! skip and the separators it splits on differ per target.

use std::fs;
use std::io;

#[cfg(windows)]
pub(super) fn is_dir_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

#[cfg(not(windows))]
pub(super) fn is_dir_separator(byte: u8) -> bool {
    byte == b'/'
}

/// Length of the root prefix of an absolute path (`C:\` or `/`).
#[cfg(windows)]
pub(super) fn root_len(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    if bytes.len() < 3 || !bytes[0].is_ascii_alphabetic() || bytes[1] != b':' {
        return None;
    }
    if is_dir_separator(bytes[2]) {
        Some(3)
    } else {
        Some(2)
    }
}

#[cfg(not(windows))]
pub(super) fn root_len(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'/' {
        return None;
    }
    Some(1)
}

/// Creates a single directory, treating an existing one as success.
pub(super) fn create_dir(path: &str) -> io::Result<()> {
    match fs::create_dir(path) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        other => other,
    }
}
