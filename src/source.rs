//! Byte sources for verification.
//!
//! The recovery set never owns file data; each verification job is handed a
//! source by the caller and owns it exclusively for that job's duration.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Random-access byte source for one file under verification.
///
/// `read_at` fills as much of `buf` as the source holds at `offset` and
/// returns the count; a short count means end-of-source, never a transient
/// failure. Offsets only ever increase during a verification pass.
pub trait DataSource: Send {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;
}

impl DataSource for File {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        read_full_at(self, offset, buf)
    }
}

impl<T: AsRef<[u8]> + Send> DataSource for Cursor<T> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        read_full_at(self, offset, buf)
    }
}

/// File-backed source that opens its path on first read.
///
/// Opening lazily puts acquisition, and acquisition failure, inside the
/// verification job that owns the source instead of at submission time.
#[derive(Debug)]
pub struct LazyFileSource {
    path: PathBuf,
    file: Option<File>,
}

impl LazyFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LazyFileSource {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for LazyFileSource {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        let file = match self.file {
            Some(ref mut file) => file,
            None => self.file.insert(File::open(&self.path)?),
        };
        read_full_at(file, offset, buf)
    }
}

/// Seek to `offset`, then read until `buf` is full or the source ends.
fn read_full_at<R: Read + Seek>(source: &mut R, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    source.seek(SeekFrom::Start(offset))?;
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
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

    #[test]
    fn cursor_reads_are_exact_at_offset() {
        let mut source = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        let mut buf = [0u8; 3];
        assert_eq!(source.read_at(1, &mut buf).unwrap(), 3);
        assert_eq!(buf, [2, 3, 4]);
    }

    #[test]
    fn short_read_at_end_of_source() {
        let mut source = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 4];
        assert_eq!(source.read_at(2, &mut buf).unwrap(), 1);
        assert_eq!(buf[0], 3);
    }

    #[test]
    fn read_past_the_end_yields_zero_bytes() {
        let mut source = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 4];
        assert_eq!(source.read_at(10, &mut buf).unwrap(), 0);
    }

    #[test]
    fn lazy_source_reports_open_failure_on_first_read() {
        let mut source = LazyFileSource::new("/nonexistent/route/to/nothing");
        let mut buf = [0u8; 1];
        let err = source.read_at(0, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
