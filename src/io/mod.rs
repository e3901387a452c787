//! Byte sources and the DWG object decoder.
//!
//! Decoding only ever talks to a [`ByteSource`]: a seek to an absolute
//! offset followed by a read of an exact length. Every entry point seeks
//! before reading, so no call depends on where a previous one left the
//! cursor.

pub mod dwg;

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::Result;

pub use dwg::{DwgReader, DwgReaderConfiguration};

/// Random-access supplier of raw file bytes.
pub trait ByteSource {
    fn is_open(&self) -> bool;

    /// Position the cursor at an absolute byte offset.
    fn seek(&mut self, offset: u64) -> Result<()>;

    /// Read exactly `length` bytes from the cursor.
    ///
    /// A short read is an error; sources never return fewer bytes.
    fn read(&mut self, length: usize) -> Result<Vec<u8>>;
}

/// [`ByteSource`] over any seekable stream (files, `Cursor<Vec<u8>>`, ...).
#[derive(Debug)]
pub struct StreamSource<R: Read + Seek> {
    inner: R,
}

impl<R: Read + Seek> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for StreamSource<R> {
    fn is_open(&self) -> bool {
        true
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; length];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Buffered file on disk.
#[derive(Debug)]
pub struct FileSource {
    reader: Option<BufReader<File>>,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: Some(BufReader::new(file)),
        })
    }

    /// Release the file. Later reads fail with `NotConnected`.
    pub fn close(&mut self) {
        self.reader = None;
    }

    fn reader_mut(&mut self) -> Result<&mut BufReader<File>> {
        self.reader.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "file source is closed").into()
        })
    }
}

impl ByteSource for FileSource {
    fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        self.reader_mut()?.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; length];
        self.reader_mut()?.read_exact(&mut buf)?;
        Ok(buf)
    }
}
