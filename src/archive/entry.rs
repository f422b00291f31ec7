/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Other(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Other(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Other(v) => *v,
        }
    }
}

#[allow(deprecated)]
impl From<zip::CompressionMethod> for CompressionMethod {
    fn from(method: zip::CompressionMethod) -> Self {
        match method {
            zip::CompressionMethod::Stored => CompressionMethod::Stored,
            zip::CompressionMethod::Deflated => CompressionMethod::Deflate,
            zip::CompressionMethod::Unsupported(v) => CompressionMethod::from_u16(v),
            // Methods the crate knows but this build cannot decode.
            _ => CompressionMethod::Other(u16::MAX),
        }
    }
}

/// Central-directory metadata of one archive member
#[derive(Debug, Clone)]
pub struct ZipFileEntry {
    pub file_name: String,
    pub compression_method: CompressionMethod,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub crc32: u32,
    pub is_directory: bool,
}

impl ZipFileEntry {
    /// Space saved by compression, in whole percent.
    pub fn saved_percent(&self) -> u64 {
        saved_percent(self.compressed_size, self.uncompressed_size)
    }
}

pub(crate) fn saved_percent(compressed: u64, uncompressed: u64) -> u64 {
    if uncompressed == 0 || compressed >= uncompressed {
        return 0;
    }
    100 - compressed * 100 / uncompressed
}
