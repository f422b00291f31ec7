//! Raw deflate stream codec.
//!
//! Streams are headerless deflate (no zlib or gzip wrapper), read and
//! written through fixed [`CODEC_BUFFER_SIZE`] buffers until the input is
//! exhausted. This is the format stored inside deflate-compressed ZIP
//! members, so `inflate` can decode members extracted in raw mode.
//!
//! `deflate` writes with the full 32 KiB window. `inflate` reads streams
//! made with any window size, but a decoder limited to a smaller window
//! (for example zlib with `windowBits = -9`) cannot read our output.

use std::io::{Read, Write};

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::read_chunk;

/// Input and output buffer size used by [`deflate`] and [`inflate`].
pub const CODEC_BUFFER_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct DeflateOptions {
    pub level: Compression,
}

impl DeflateOptions {
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

/// Compresses `input` into `output` as a raw deflate stream.
///
/// Returns the number of compressed bytes written.
pub fn deflate<R, W>(input: &mut R, output: &mut W, options: &DeflateOptions) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut compressor = Compress::new(options.level, false);
    let mut in_buf = vec![0u8; CODEC_BUFFER_SIZE];
    let mut out_buf = vec![0u8; CODEC_BUFFER_SIZE];

    loop {
        let read = read_chunk(input, &mut in_buf)?;
        let finishing = read < in_buf.len();
        let flush = if finishing {
            FlushCompress::Finish
        } else {
            FlushCompress::None
        };
        let mut pending = &in_buf[..read];

        // Run until the output buffer is no longer filled completely.
        loop {
            let before_in = compressor.total_in();
            let before_out = compressor.total_out();
            let status = compressor.compress(pending, &mut out_buf, flush)?;
            let consumed = (compressor.total_in() - before_in) as usize;
            let produced = (compressor.total_out() - before_out) as usize;

            pending = &pending[consumed..];
            output.write_all(&out_buf[..produced])?;

            if finishing {
                if status == Status::StreamEnd {
                    output.flush()?;
                    debug!(
                        consumed = compressor.total_in(),
                        produced = compressor.total_out(),
                        "deflate finished"
                    );
                    return Ok(compressor.total_out());
                }
                if consumed == 0 && produced == 0 {
                    return Err(Error::CodecStalled);
                }
            } else if pending.is_empty() && produced < out_buf.len() {
                break;
            }
        }
    }
}

/// Decompresses a raw deflate stream from `input` into `output`.
///
/// Stops at the deflate end-of-stream marker; trailing input is ignored.
/// Input that runs out before the marker is an error. Returns the number of
/// decompressed bytes written.
pub fn inflate<R, W>(input: &mut R, output: &mut W) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut decompressor = Decompress::new(false);
    let mut in_buf = vec![0u8; CODEC_BUFFER_SIZE];
    let mut out_buf = vec![0u8; CODEC_BUFFER_SIZE];

    loop {
        let read = read_chunk(input, &mut in_buf)?;
        if read == 0 {
            return Err(Error::TruncatedStream);
        }
        let mut pending = &in_buf[..read];

        loop {
            let before_in = decompressor.total_in();
            let before_out = decompressor.total_out();
            let status = decompressor.decompress(pending, &mut out_buf, FlushDecompress::None)?;
            let consumed = (decompressor.total_in() - before_in) as usize;
            let produced = (decompressor.total_out() - before_out) as usize;

            pending = &pending[consumed..];
            output.write_all(&out_buf[..produced])?;

            if status == Status::StreamEnd {
                output.flush()?;
                debug!(
                    consumed = decompressor.total_in(),
                    produced = decompressor.total_out(),
                    "inflate finished"
                );
                return Ok(decompressor.total_out());
            }
            if produced < out_buf.len() && (pending.is_empty() || consumed == 0) {
                break;
            }
        }
    }
}
