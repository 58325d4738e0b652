//! Byte sources a [`ByteWindow`](crate::ByteWindow) can sit on.
//!
//! Two classes of input are supported and they differ in one respect only:
//! whether bytes that were read once can be fetched again.
//!
//! - [`Seekable`] wraps `Read + Seek` (files, in-memory cursors). Its length
//!   is known up front and the window may be reloaded anywhere.
//! - [`Streamed`] wraps plain `Read` (pipes, sockets, consoles). Its length
//!   is unknown until it reports end of input, so everything read has to
//!   stay in memory.
//!
//! Both own their reader. A caller that keeps managing its stream passes a
//! `&mut R` instead; the scanner then borrows it and never closes it.

use std::io::{self, Read, Seek, SeekFrom};

/// A source of bytes for a [`ByteWindow`](crate::ByteWindow).
pub trait ByteSource {
    /// Reads the next bytes into `buf`, returning how many were written.
    ///
    /// `Ok(0)` with a non-empty `buf` means end of input.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Total length of the source when it is seekable.
    fn known_len(&self) -> Option<usize>;

    /// Repositions the source so the next [`fill`](Self::fill) starts at
    /// `pos`.
    fn seek_to(&mut self, pos: usize) -> io::Result<()>;

    /// Whether bytes can be fetched again after they were read.
    fn is_seekable(&self) -> bool {
        self.known_len().is_some()
    }
}

fn fill_retrying<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            other => return other,
        }
    }
}

/// A source whose length is known and which can be re-read at any offset.
#[derive(Debug)]
pub struct Seekable<R> {
    inner: R,
    len: usize,
}

impl<R: Read + Seek> Seekable<R> {
    /// Wraps `inner`, measuring its length and rewinding it to the start.
    ///
    /// # Errors
    ///
    /// Fails when the reader cannot seek.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        let len = usize::try_from(end)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "source too large"))?;
        Ok(Self { inner, len })
    }
}

impl<R> Seekable<R> {
    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for Seekable<R> {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        fill_retrying(&mut self.inner, buf)
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len)
    }

    fn seek_to(&mut self, pos: usize) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(pos as u64)).map(drop)
    }
}

/// A forward-only source of unknown length.
#[derive(Debug)]
pub struct Streamed<R> {
    inner: R,
}

impl<R: Read> Streamed<R> {
    /// Wraps `inner`. Nothing is read until the window asks for bytes.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R> Streamed<R> {
    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for Streamed<R> {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        fill_retrying(&mut self.inner, buf)
    }

    fn known_len(&self) -> Option<usize> {
        None
    }

    fn seek_to(&mut self, _pos: usize) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "streamed sources cannot seek",
        ))
    }
}
