use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::fs::{
    MAX_PATH_LENGTH, MAX_PATH_LENGTH_WITH_TERMINATOR, extract_last_part_of_path, is_dir_path,
    path_exists, recursive_mkdir,
};
use crate::io::{copy_bounded, file_size, open_file};
use crate::string::OwnedString;

/// Largest member size that fits the classic 32-bit size fields.
const ZIP32_MAX_SIZE: u64 = u32::MAX as u64;

/// Builds the in-archive name of `path` from its last `level + 1` segments.
///
/// Level 0 is the path's own last segment, each further level prepends the
/// parent's segment. Backslashes become `/`, so directory names always end
/// in `/`.
pub fn archive_member_name(path: &str, level: usize) -> Result<OwnedString> {
    let mut remaining = path;
    let mut name = String::new();

    for _ in 0..=level {
        let part = extract_last_part_of_path(remaining, MAX_PATH_LENGTH_WITH_TERMINATOR)
            .ok_or(Error::InvalidArgument("path has fewer segments than its depth"))?;
        name.insert_str(0, part.name);
        remaining = &remaining[..part.start];
    }

    OwnedString::from_source(&name.replace('\\', "/"))
}

/// Writes files and directory trees into a new, uncompressed ZIP archive.
pub struct ZipPacker {
    writer: ZipWriter<File>,
    output: String,
    output_canonical: Option<PathBuf>,
    members: usize,
    bytes: u64,
}

impl ZipPacker {
    /// Creates the archive at `output`, along with any missing parent
    /// directories. An existing file is never overwritten.
    pub fn create(output: &str) -> Result<Self> {
        if output.is_empty() {
            return Err(Error::InvalidArgument("output archive path is empty"));
        }
        if path_exists(output) {
            return Err(Error::AlreadyExists(output.to_owned()));
        }

        // The trailing file name is not created.
        recursive_mkdir(output)?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(output)
            .map_err(|source| Error::PathIo {
                path: output.to_owned(),
                source,
            })?;

        Ok(Self {
            writer: ZipWriter::new(file),
            output: output.to_owned(),
            output_canonical: fs::canonicalize(output).ok(),
            members: 0,
            bytes: 0,
        })
    }

    /// Adds one input: a file becomes a single member, a directory (trailing
    /// separator) is added together with everything below it.
    pub fn add_input(&mut self, input: &str) -> Result<()> {
        if input.is_empty() {
            return Err(Error::InvalidArgument("input path is empty"));
        }
        if input.len() > MAX_PATH_LENGTH {
            return Err(Error::PathTooLong {
                path: input.to_owned(),
                max: MAX_PATH_LENGTH,
            });
        }
        if !path_exists(input) {
            return Err(Error::NotFound(input.to_owned()));
        }

        if is_dir_path(input) {
            self.add_directory_tree(input)
        } else if self.is_output(Path::new(input)) {
            Err(Error::InvalidArgument("input is the output archive"))
        } else {
            self.add_path(input, 0)
        }
    }

    fn add_directory_tree(&mut self, root: &str) -> Result<()> {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            let mut path = entry
                .path()
                .to_str()
                .ok_or_else(|| Error::NonUtf8Path(entry.path().to_path_buf()))?
                .to_owned();

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if !is_dir_path(&path) {
                    path.push('/');
                }
            } else if !file_type.is_file() {
                warn!(path, "skipping entry that is neither file nor directory");
                continue;
            } else if self.is_output(entry.path()) {
                debug!(path, "skipping the archive being written");
                continue;
            }

            self.add_path(&path, entry.depth())?;
        }
        Ok(())
    }

    fn is_output(&self, path: &Path) -> bool {
        let Some(output) = &self.output_canonical else {
            return false;
        };
        path.file_name() == output.file_name()
            && fs::canonicalize(path).is_ok_and(|canonical| &canonical == output)
    }

    fn add_path(&mut self, path: &str, level: usize) -> Result<()> {
        let member = archive_member_name(path, level)?;
        let name = member
            .as_str()
            .ok_or(Error::InvalidArgument("member name is released"))?;

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        // Member names only use `/`.
        if member.last_byte() == Some(b'/') {
            self.writer.add_directory(name, options)?;
            debug!(member = name, "directory added");
        } else {
            let mut file = open_file(path)?;
            let size = file_size(&file)?;
            self.writer
                .start_file(name, options.large_file(size > ZIP32_MAX_SIZE))?;
            let copied = copy_bounded(&mut file, &mut self.writer)?;
            self.bytes += copied;
            debug!(member = name, bytes = copied, "file added");
        }

        self.members += 1;
        Ok(())
    }

    /// Writes the central directory and closes the archive.
    pub fn finish(self) -> Result<()> {
        self.writer.finish()?;
        info!(
            output = %self.output,
            members = self.members,
            bytes = self.bytes,
            "archive written"
        );
        Ok(())
    }
}

/// Packs `inputs`, in order, into a new archive at `output`.
///
/// The archive is closed even when an input fails; the first failure is
/// returned.
pub fn zip<P: AsRef<str>>(output: &str, inputs: &[P]) -> Result<()> {
    if inputs.is_empty() {
        return Err(Error::InvalidArgument("no input paths given"));
    }

    let mut packer = ZipPacker::create(output)?;
    let added = inputs
        .iter()
        .try_for_each(|input| packer.add_input(input.as_ref()));
    let finished = packer.finish();

    added?;
    finished
}
