//! `ByteWindow`: a bounded window over a [`ByteSource`] with absolute
//! positioning.
//!
//! Layout
//! - `buf[..len]` holds the bytes at absolute offsets `start..start + len`.
//!   `buf.len()` is the window capacity.
//! - `cursor` is the read offset relative to `start`.
//!
//! Seekable sources
//! - The window is a cache of at most `max_capacity` bytes. Reading past it
//!   (while still inside the source) reloads the window at the cursor, and
//!   `set_position` reloads it around any in-range target.
//!
//! Streamed sources
//! - Bytes can never be fetched twice, so `start` stays 0 and the window
//!   grows by doubling whenever it fills up. `source_len` tracks how much has
//!   been read so far.
//!
//! Invariants
//! - `cursor <= len`
//! - `start + len <= source_len`
//! - `start == 0` for streamed sources
//!
//! Positions past the end of the source clamp to the end instead of
//! reloading anything. Only the scanner sets positions, and it only rewinds
//! to offsets it has already read, so a clamp signals a broken caller; debug
//! builds assert on it.

use std::io;

use bstr::BString;
use log::trace;

use crate::{options::WindowOptions, source::ByteSource};

/// A bounded, refillable window over a byte source.
#[derive(Debug)]
pub struct ByteWindow<S> {
    source: S,
    buf: Vec<u8>,
    start: usize,
    len: usize,
    source_len: usize,
    cursor: usize,
    seekable: bool,
    exhausted: bool,
}

impl<S: ByteSource> ByteWindow<S> {
    /// Creates a window over `source`, loading the first block of a seekable
    /// source right away.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from the initial load.
    pub fn new(source: S, options: WindowOptions) -> io::Result<Self> {
        let min = options.min_capacity.max(1);
        let (seekable, source_len, capacity) = match source.known_len() {
            Some(total) => (true, total, total.min(options.max_capacity).max(min)),
            None => (false, 0, min),
        };
        let mut window = Self {
            source,
            buf: vec![0; capacity],
            start: 0,
            len: 0,
            source_len,
            cursor: 0,
            seekable,
            exhausted: false,
        };
        if seekable && source_len > 0 {
            window.reload(0)?;
        }
        Ok(window)
    }

    /// Reads the byte under the cursor and advances past it.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from a refill.
    pub fn read(&mut self) -> io::Result<Option<u8>> {
        if self.cursor < self.len {
            return Ok(Some(self.take()));
        }
        let pos = self.position();
        if self.seekable {
            if pos < self.source_len {
                self.reload(pos)?;
                if self.cursor < self.len {
                    return Ok(Some(self.take()));
                }
            }
        } else if self.fetch_chunk()? > 0 {
            return Ok(Some(self.take()));
        }
        Ok(None)
    }

    /// Returns the byte under the cursor without advancing.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from a refill.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.cursor < self.len {
            return Ok(Some(self.buf[self.cursor]));
        }
        let pos = self.position();
        let byte = self.read()?;
        self.set_position(pos)?;
        Ok(byte)
    }

    /// Absolute byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.start + self.cursor
    }

    /// Moves the cursor to an absolute byte offset.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from pulling more of a streamed source or
    /// reloading a seekable one.
    pub fn set_position(&mut self, pos: usize) -> io::Result<()> {
        if !self.seekable {
            while pos >= self.source_len && self.fetch_chunk()? > 0 {}
        }
        debug_assert!(
            pos <= self.source_len,
            "window position {pos} is past the end of the source ({})",
            self.source_len
        );

        if pos >= self.start && pos < self.start + self.len {
            self.cursor = pos - self.start;
        } else if self.seekable && pos < self.source_len {
            self.reload(pos)?;
        } else if self.start + self.len == self.source_len {
            self.cursor = self.len;
        } else {
            // Seekable, clamped to the end, and the window stops short of it.
            self.reload(self.source_len)?;
        }
        Ok(())
    }

    /// Copies the bytes in `beg..end` without moving the cursor.
    ///
    /// Both offsets are clamped to the end of the source.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from refills while collecting the bytes.
    pub fn text(&mut self, beg: usize, end: usize) -> io::Result<BString> {
        let saved = self.position();
        if !self.seekable {
            while end > self.source_len && self.fetch_chunk()? > 0 {}
        }
        let end = end.min(self.source_len);
        let beg = beg.min(end);
        self.set_position(beg)?;
        let mut out = Vec::with_capacity(end.saturating_sub(beg));
        while self.position() < end {
            match self.read()? {
                Some(b) => out.push(b),
                None => break,
            }
        }
        self.set_position(saved)?;
        Ok(BString::from(out))
    }

    /// Absolute offset of the first buffered byte.
    pub fn window_start(&self) -> usize {
        self.start
    }

    /// Number of valid bytes in the window.
    pub fn window_len(&self) -> usize {
        self.len
    }

    /// Bytes the window can hold before it must refill or grow.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Known length of the source; for streamed sources, the bytes read so
    /// far.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Whether out-of-window positions are reloaded rather than kept.
    pub fn is_seekable(&self) -> bool {
        self.seekable
    }

    /// Releases the window and returns the source.
    pub fn into_source(self) -> S {
        self.source
    }

    fn take(&mut self) -> u8 {
        let byte = self.buf[self.cursor];
        self.cursor += 1;
        byte
    }

    /// Loads the window so that it starts at `pos`.
    ///
    /// A failed fill leaves the window holding whatever arrived before the
    /// failure, with the cursor at `pos`.
    fn reload(&mut self, pos: usize) -> io::Result<()> {
        self.source.seek_to(pos)?;
        self.start = pos;
        self.len = 0;
        self.cursor = 0;
        while self.len < self.buf.len() {
            let n = self.source.fill(&mut self.buf[self.len..])?;
            if n == 0 {
                break;
            }
            self.len += n;
        }
        trace!("window reloaded at {pos} with {} bytes", self.len);
        Ok(())
    }

    /// Appends the next chunk of a streamed source, doubling the window when
    /// it is full. Returns the number of bytes added.
    fn fetch_chunk(&mut self) -> io::Result<usize> {
        if self.exhausted {
            return Ok(0);
        }
        if self.len == self.buf.len() {
            let grown = self.buf.len() * 2;
            self.buf.resize(grown, 0);
            trace!("window grown to {grown} bytes");
        }
        let n = self.source.fill(&mut self.buf[self.len..])?;
        if n == 0 {
            self.exhausted = true;
        }
        self.len += n;
        self.source_len = self.len;
        Ok(n)
    }
}

#[cfg(test)]
mod tests;
