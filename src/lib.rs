//! # codelib
//!
//! ZIP packing and extraction, a raw deflate codec, and the path and string
//! helpers they are built on.
//!
//! ## Features
//!
//! - Pack files and whole directory trees into stored ZIP archives
//! - Extract archives while recording every produced path
//! - ZIP64 support for members larger than 4 GiB
//! - Raw (headerless) deflate and inflate of byte streams
//! - Length-bounded owned strings and separator-agnostic path utilities
//!
//! ## Example
//!
//! ```no_run
//! use codelib::{OwnedString, ZipContentInfo, unzip, zip};
//!
//! fn main() -> codelib::Result<()> {
//!     zip("./tmp/out.zip", &["./notes.txt", "./photos/"])?;
//!
//!     let mut content = ZipContentInfo::new(&OwnedString::from_source("./tmp/out.zip")?);
//!     unzip(&mut content, &OwnedString::from_source("./tmp/unzipped/")?)?;
//!
//!     for path in content.unzipped_file_paths() {
//!         println!("{path}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod codec;
pub mod error;
pub mod fs;
pub mod io;
pub mod string;

pub use archive::{
    CompressionMethod, ZipContentInfo, ZipExtractor, ZipFileEntry, ZipPacker, unzip, zip,
};
pub use cli::Cli;
pub use codec::{DeflateOptions, deflate, inflate};
pub use error::{Error, ErrorKind, Result};
pub use string::{MAX_STRING_LENGTH_WITH_TERMINATOR, OwnedString};
