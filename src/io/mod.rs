//! Bounded streaming helpers shared by the archive engines and the codec.
//!
//! Nothing here buffers a whole file: data always moves through a fixed-size
//! chunk, which keeps memory flat for multi-gigabyte inputs.

pub mod local;

pub use local::{create_file, file_size, files_are_equal, open_file};

use std::io::{self, Read, Write};

/// Size of the chunk used when streaming file and member data.
pub const COPY_BUFFER_SIZE: usize = 16 * 1024;

/// Copies `reader` into `writer` through a [`COPY_BUFFER_SIZE`] chunk until
/// the reader is exhausted. Returns the number of bytes copied.
pub fn copy_bounded<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
}

/// Fills `buf` as far as the reader allows. A short count means end of input.
pub fn read_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most three bytes per read.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.0.len().min(buf.len()).min(3);
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn copy_spans_multiple_chunks() {
        let data: Vec<u8> = (0..COPY_BUFFER_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let mut out = Vec::new();
        let copied = copy_bounded(&mut Cursor::new(&data), &mut out).unwrap();
        assert_eq!(copied, data.len() as u64);
        assert_eq!(out, data);
    }

    #[test]
    fn copy_of_empty_input() {
        let mut out = Vec::new();
        assert_eq!(copy_bounded(&mut io::empty(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn read_chunk_fills_across_short_reads() {
        let data = b"abcdefghij";
        let mut reader = Trickle(data);
        let mut buf = [0u8; 8];
        assert_eq!(read_chunk(&mut reader, &mut buf).unwrap(), 8);
        assert_eq!(&buf, b"abcdefgh");
        assert_eq!(read_chunk(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(read_chunk(&mut reader, &mut buf).unwrap(), 0);
    }
}
