use crate::error::{Error, Result};
use crate::string::OwnedString;

/// An archive path together with the paths produced by extracting it, in
/// the order they were produced.
///
/// A default value has neither; [`ZipContentInfo::clean`] returns any
/// descriptor to that state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ZipContentInfo {
    zip_file_path: OwnedString,
    unzipped_file_paths: Vec<OwnedString>,
}

impl ZipContentInfo {
    /// Creates a descriptor for `zip_file_path`. A released path yields an
    /// empty descriptor.
    pub fn new(zip_file_path: &OwnedString) -> Self {
        Self {
            zip_file_path: zip_file_path.clone(),
            unzipped_file_paths: Vec::new(),
        }
    }

    pub fn zip_file_path(&self) -> &OwnedString {
        &self.zip_file_path
    }

    pub fn unzipped_file_paths(&self) -> &[OwnedString] {
        &self.unzipped_file_paths
    }

    pub fn unzipped_file_count(&self) -> usize {
        self.unzipped_file_paths.len()
    }

    /// Records a copy of `path`.
    ///
    /// Fails, leaving the descriptor unchanged, when the descriptor has no
    /// archive path or `path` is released.
    pub fn add_unzipped_file_path(&mut self, path: &OwnedString) -> Result<()> {
        if self.zip_file_path.is_released() {
            return Err(Error::InvalidArgument("descriptor has no archive path"));
        }
        if path.is_released() {
            return Err(Error::InvalidArgument("member path is released"));
        }

        self.unzipped_file_paths.push(path.clone());
        Ok(())
    }

    /// Releases the archive path and every recorded path.
    pub fn clean(&mut self) {
        self.zip_file_path.release();
        self.unzipped_file_paths = Vec::new();
    }
}
