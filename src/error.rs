use std::io;
use std::path::PathBuf;

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Null-equivalent, empty or oversized arguments. Nothing was touched.
    InvalidArgument,
    /// A file, directory or archive was missing, already present or unopenable.
    ResourceUnavailable,
    /// Reading or writing failed part way through.
    Io,
    /// The archive or compressed stream is malformed.
    Format,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("string of {length} bytes exceeds the limit of {max} bytes")]
    StringTooLong { length: usize, max: usize },

    #[error("path '{path}' exceeds the limit of {max} bytes")]
    PathTooLong { path: String, max: usize },

    #[error("buffer of {capacity} bytes is too small, {required} bytes are required")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("path is not valid UTF-8: '{}'", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("path does not exist: '{0}'")]
    NotFound(String),

    #[error("output already exists: '{0}'")]
    AlreadyExists(String),

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreationFailed { path: String, source: io::Error },

    #[error("failed to remove '{}': {source}", .path.display())]
    RemovalFailed { path: PathBuf, source: io::Error },

    #[error("failed to access '{path}': {source}")]
    PathIo { path: String, source: io::Error },

    #[error("failed to open archive '{path}': {source}")]
    ArchiveOpen {
        path: String,
        source: zip::result::ZipError,
    },

    #[error("archive member {index} has an empty name")]
    EmptyMemberName { index: usize },

    #[error("archive member name escapes the output directory: '{0}'")]
    UnsafeMemberName(String),

    #[error("compressed stream ended before its end marker")]
    TruncatedStream,

    #[error("compression made no progress")]
    CodecStalled,

    #[error(transparent)]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Compress(#[from] flate2::CompressError),

    #[error(transparent)]
    Decompress(#[from] flate2::DecompressError),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_)
            | Error::StringTooLong { .. }
            | Error::PathTooLong { .. }
            | Error::BufferTooSmall { .. }
            | Error::NonUtf8Path(_) => ErrorKind::InvalidArgument,
            Error::NotFound(_) | Error::AlreadyExists(_) | Error::ArchiveOpen { .. } => {
                ErrorKind::ResourceUnavailable
            }
            Error::EmptyMemberName { .. }
            | Error::UnsafeMemberName(_)
            | Error::TruncatedStream
            | Error::Archive(_)
            | Error::Decompress(_) => ErrorKind::Format,
            Error::DirectoryCreationFailed { .. }
            | Error::RemovalFailed { .. }
            | Error::PathIo { .. }
            | Error::CodecStalled
            | Error::Compress(_)
            | Error::Walk(_)
            | Error::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
