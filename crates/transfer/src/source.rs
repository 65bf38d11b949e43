//! Byte sources feeding a transfer.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::TransferError;

/// What kind of data a source yields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceKind {
    /// File contents read from disk.
    File,
    /// A finite in-memory metadata blob.
    Metadata,
}

/// A source of bytes consumed progressively by the pipeline.
pub trait ByteSource {
    /// Fills the front of `buf` and returns the number of bytes written.
    /// Zero means the source is exhausted.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Kind of data this source yields.
    fn kind(&self) -> SourceKind;

    /// Name used in logs and errors.
    fn describe(&self) -> &Path;
}

/// A file opened for reading.
#[derive(Debug)]
pub struct FileSource<R = File> {
    reader: R,
    path: PathBuf,
}

impl FileSource {
    /// Opens `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransferError> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|err| TransferError::source_unavailable(path, err))?;
        Ok(Self {
            reader: file,
            path: path.to_path_buf(),
        })
    }
}

impl<R: Read> FileSource<R> {
    /// Wraps an already opened reader, reported under `path`.
    pub fn from_reader(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
        }
    }
}

impl<R: Read> ByteSource for FileSource<R> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.reader.read(buf) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                other => return other,
            }
        }
    }

    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn describe(&self) -> &Path {
        &self.path
    }
}

/// An in-memory metadata blob consumed in slices.
#[derive(Debug)]
pub struct MetadataSource<'a> {
    remaining: &'a [u8],
    label: PathBuf,
}

impl<'a> MetadataSource<'a> {
    /// Wraps `data`, reported under `label`.
    pub fn new(data: &'a [u8], label: impl Into<PathBuf>) -> Self {
        Self {
            remaining: data,
            label: label.into(),
        }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl ByteSource for MetadataSource<'_> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.remaining.len());
        let (head, tail) = self.remaining.split_at(n);
        buf[..n].copy_from_slice(head);
        self.remaining = tail;
        Ok(n)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Metadata
    }

    fn describe(&self) -> &Path {
        &self.label
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_chunk(buf)
    }

    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn describe(&self) -> &Path {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_source_slices_progressively() {
        let data: Vec<u8> = (0..10).collect();
        let mut source = MetadataSource::new(&data, "meta");
        let mut buf = [0u8; 4];
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 4);
        assert_eq!(buf, [0, 1, 2, 3]);
        assert_eq!(source.remaining(), 6);
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 4);
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[8, 9]);
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 0);
        assert_eq!(source.kind(), SourceKind::Metadata);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = FileSource::open("/nonexistent/backup/source").unwrap_err();
        match err {
            TransferError::SourceUnavailable { path, source } => {
                assert_eq!(path, Path::new("/nonexistent/backup/source"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn reader_source_reports_file_kind() {
        let mut source = FileSource::from_reader(io::Cursor::new(b"abc".to_vec()), "mem");
        let mut buf = [0u8; 8];
        assert_eq!(source.read_chunk(&mut buf).unwrap(), 3);
        assert_eq!(source.kind(), SourceKind::File);
        assert_eq!(source.describe(), Path::new("mem"));
    }
}
