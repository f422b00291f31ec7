use std::fs::{self, File};
use std::io::{Read, Seek, Write};
use std::path::Path;

use tracing::{debug, info};
use zip::ZipArchive;
use zip::result::ZipError;

use super::content::ZipContentInfo;
use super::entry::ZipFileEntry;
use crate::error::{Error, Result};
use crate::fs::{is_dir_path, path_exists, recursive_mkdir};
use crate::io::{copy_bounded, create_file};
use crate::string::OwnedString;

/// ZIP file extractor
pub struct ZipExtractor<R: Read + Seek> {
    archive: ZipArchive<R>,
    raw: bool,
}

impl ZipExtractor<File> {
    /// Opens the archive stored at `path`.
    pub fn open(path: &str) -> Result<Self> {
        let archive_open = |source| Error::ArchiveOpen {
            path: path.to_owned(),
            source,
        };
        let file = File::open(path).map_err(|e| archive_open(ZipError::Io(e)))?;
        let archive = ZipArchive::new(file).map_err(archive_open)?;
        debug!(path, members = archive.len(), "archive opened");
        Ok(Self { archive, raw: false })
    }
}

impl<R: Read + Seek> ZipExtractor<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
            raw: false,
        })
    }

    /// When set, members are written as stored in the archive, without
    /// decompressing them.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// List all members in central-directory order
    pub fn list_files(&mut self) -> Result<Vec<ZipFileEntry>> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let member = self.archive.by_index_raw(index)?;
            entries.push(ZipFileEntry {
                file_name: member.name().to_owned(),
                compression_method: member.compression().into(),
                compressed_size: member.compressed_size(),
                uncompressed_size: member.size(),
                crc32: member.crc32(),
                is_directory: member.is_dir(),
            });
        }
        Ok(entries)
    }

    /// Streams the member at `index` into `writer`.
    pub fn extract_to_writer<W: Write + ?Sized>(
        &mut self,
        index: usize,
        writer: &mut W,
    ) -> Result<u64> {
        let mut member = if self.raw {
            self.archive.by_index_raw(index)?
        } else {
            self.archive.by_index(index)?
        };
        Ok(copy_bounded(&mut member, writer)?)
    }

    /// Extracts every member below `output_dir`, recording each produced
    /// path in `content`.
    ///
    /// `output_dir` gets a trailing `/` if it has none and is created when
    /// missing. Parent directories of file members are created as needed.
    pub fn extract_all(&mut self, content: &mut ZipContentInfo, output_dir: &str) -> Result<()> {
        if output_dir.is_empty() {
            return Err(Error::InvalidArgument("output directory is empty"));
        }

        let mut output_dir = output_dir.to_owned();
        if !is_dir_path(&output_dir) {
            output_dir.push('/');
        }
        if !path_exists(&output_dir) {
            recursive_mkdir(&output_dir)?;
        }

        let mut written = 0u64;
        for index in 0..self.archive.len() {
            let mut member = if self.raw {
                self.archive.by_index_raw(index)?
            } else {
                self.archive.by_index(index)?
            };

            let name = member.name().to_owned();
            if name.is_empty() {
                return Err(Error::EmptyMemberName { index });
            }
            if member.enclosed_name().is_none() {
                return Err(Error::UnsafeMemberName(name));
            }

            let destination = format!("{output_dir}{name}");
            content.add_unzipped_file_path(&OwnedString::from_source(&destination)?)?;

            if member.size() == 0 && name.ends_with('/') {
                debug!(member = %name, "creating directory");
                ensure_dir(Path::new(&destination))?;
                continue;
            }

            if let Some(parent) = Path::new(&destination).parent() {
                ensure_dir(parent)?;
            }
            let mut output = create_file(&destination)?;
            let copied = copy_bounded(&mut member, &mut output)?;
            output.flush()?;
            written += copied;
            debug!(member = %name, bytes = copied, "member extracted");
        }

        info!(
            output = %output_dir,
            members = self.archive.len(),
            bytes = written,
            "archive extracted"
        );
        Ok(())
    }
}

/// Creates `dir` and its ancestors unless it already exists. Member
/// destinations may exceed the path limit of [`recursive_mkdir`].
fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreationFailed {
        path: dir.display().to_string(),
        source,
    })
}

/// Extracts the archive named by `content` into `output_dir`.
///
/// On success `content` lists every directory and file produced, in archive
/// order. Extraction stops at the first failing member; files written up to
/// that point are left on disk.
pub fn unzip(content: &mut ZipContentInfo, output_dir: &OwnedString) -> Result<()> {
    let archive_path = content
        .zip_file_path()
        .as_str()
        .ok_or(Error::InvalidArgument("descriptor has no archive path"))?
        .to_owned();
    let output_dir = output_dir
        .as_str()
        .ok_or(Error::InvalidArgument("output directory is released"))?;

    ZipExtractor::open(&archive_path)?.extract_all(content, output_dir)
}
