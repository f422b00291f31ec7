use std::fs::File;

use super::{COPY_BUFFER_SIZE, read_chunk};
use crate::error::{Error, Result};

/// Opens an existing file for binary reading.
pub fn open_file(path: &str) -> Result<File> {
    File::open(path).map_err(|source| Error::PathIo {
        path: path.to_owned(),
        source,
    })
}

/// Creates (or truncates) a file for binary writing.
pub fn create_file(path: &str) -> Result<File> {
    File::create(path).map_err(|source| Error::PathIo {
        path: path.to_owned(),
        source,
    })
}

pub fn file_size(file: &File) -> Result<u64> {
    Ok(file.metadata()?.len())
}

/// Compares two files byte for byte. Files of different sizes are unequal
/// without reading their contents.
pub fn files_are_equal(left: &str, right: &str) -> Result<bool> {
    let mut left = open_file(left)?;
    let mut right = open_file(right)?;

    if file_size(&left)? != file_size(&right)? {
        return Ok(false);
    }

    let mut left_buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut right_buf = vec![0u8; COPY_BUFFER_SIZE];
    loop {
        let left_read = read_chunk(&mut left, &mut left_buf)?;
        let right_read = read_chunk(&mut right, &mut right_buf)?;
        if left_read != right_read || left_buf[..left_read] != right_buf[..right_read] {
            return Ok(false);
        }
        if left_read == 0 {
            return Ok(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn equal_and_unequal_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_owned();

        let content: Vec<u8> = (0..COPY_BUFFER_SIZE * 2 + 5).map(|i| (i % 7) as u8).collect();
        fs::write(path("a"), &content).unwrap();
        fs::write(path("b"), &content).unwrap();
        let mut changed = content.clone();
        *changed.last_mut().unwrap() ^= 0xff;
        fs::write(path("c"), &changed).unwrap();
        fs::write(path("d"), &content[..10]).unwrap();

        assert!(files_are_equal(&path("a"), &path("b")).unwrap());
        assert!(!files_are_equal(&path("a"), &path("c")).unwrap());
        assert!(!files_are_equal(&path("a"), &path("d")).unwrap());
    }

    #[test]
    fn empty_files_are_equal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a").to_str().unwrap().to_owned();
        let b = dir.path().join("b").to_str().unwrap().to_owned();
        fs::write(&a, b"").unwrap();
        fs::write(&b, b"").unwrap();
        assert!(files_are_equal(&a, &b).unwrap());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = open_file("/definitely/not/here.bin").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.bin"));
    }
}
