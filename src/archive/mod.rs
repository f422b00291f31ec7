//! ZIP archive packing and extraction.
//!
//! The container format itself is handled by the `zip` crate; this module
//! decides what goes into an archive and where its members land on disk.
//!
//! ## Architecture
//!
//! - [`content`]: the archive descriptor that records extracted paths
//! - [`packer`]: walks input files and directories into a new archive
//! - [`extractor`]: lists, streams and extracts members
//! - [`entry`]: listing metadata for a single member
//!
//! ## Member names
//!
//! A file given directly is stored under its file name. A directory given
//! with a trailing separator is stored with its own name as the top-level
//! entry, so packing `/data/photos/` yields `photos/`, `photos/a.jpg` and so
//! on. Directory members always end in `/`.
//!
//! ## Supported Features
//!
//! - Stored members on write, stored and deflate members on read
//! - ZIP64 extensions for members over 4 GiB
//! - Raw extraction of compressed member data
//!
//! ## Limitations
//!
//! - No encryption support
//! - Symbolic links are skipped when packing

mod content;
mod entry;
mod extractor;
mod packer;

pub use content::ZipContentInfo;
pub use entry::{CompressionMethod, ZipFileEntry};
pub use extractor::{ZipExtractor, unzip};
pub use packer::{ZipPacker, archive_member_name, zip};
