//! Character layer over a [`ByteWindow`].
//!
//! Without a byte-order mark every byte is one character (ISO-8859-1). After
//! one, bytes are decoded as UTF-8. Positions stay byte offsets either way;
//! the scanner counts characters itself.
//!
//! The decoder is deliberately minimal: stray continuation bytes are skipped
//! until the next lead byte, and overlong forms or surrogate code points are
//! passed through unchecked. Code points are therefore plain `u32`s, not
//! `char`s.

use std::io;

use crate::{source::ByteSource, window::ByteWindow};

#[derive(Debug)]
pub(crate) struct CharReader<S> {
    window: ByteWindow<S>,
    utf8: bool,
}

impl<S: ByteSource> CharReader<S> {
    pub(crate) fn new(window: ByteWindow<S>) -> Self {
        Self {
            window,
            utf8: false,
        }
    }

    pub(crate) fn enable_utf8(&mut self) {
        self.utf8 = true;
    }

    pub(crate) fn is_utf8(&self) -> bool {
        self.utf8
    }

    /// Reads the next character, `Ok(None)` at end of input.
    pub(crate) fn read(&mut self) -> io::Result<Option<u32>> {
        if self.utf8 {
            self.decode()
        } else {
            Ok(self.window.read()?.map(u32::from))
        }
    }

    pub(crate) fn peek(&mut self) -> io::Result<Option<u32>> {
        if !self.utf8 {
            return Ok(self.window.peek()?.map(u32::from));
        }
        let pos = self.window.position();
        let ch = self.decode()?;
        self.window.set_position(pos)?;
        Ok(ch)
    }

    pub(crate) fn position(&self) -> usize {
        self.window.position()
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> io::Result<()> {
        self.window.set_position(pos)
    }

    pub(crate) fn window_mut(&mut self) -> &mut ByteWindow<S> {
        &mut self.window
    }

    pub(crate) fn into_window(self) -> ByteWindow<S> {
        self.window
    }

    fn decode(&mut self) -> io::Result<Option<u32>> {
        // Resynchronize on the next ASCII or lead byte.
        let lead = loop {
            match self.window.read()? {
                Some(b) if b >= 0x80 && b & 0xC0 != 0xC0 => {}
                other => break other,
            }
        };
        let Some(b0) = lead else {
            return Ok(None);
        };
        let b0 = u32::from(b0);
        let ch = if b0 < 0x80 {
            b0
        } else if b0 & 0xF0 == 0xF0 {
            let c2 = self.trail()?;
            let c3 = self.trail()?;
            let c4 = self.trail()?;
            (b0 & 0x07) << 18 | c2 << 12 | c3 << 6 | c4
        } else if b0 & 0xE0 == 0xE0 {
            let c2 = self.trail()?;
            let c3 = self.trail()?;
            (b0 & 0x0F) << 12 | c2 << 6 | c3
        } else {
            (b0 & 0x1F) << 6 | self.trail()?
        };
        Ok(Some(ch))
    }

    /// Payload bits of a continuation byte; end of input contributes none.
    fn trail(&mut self) -> io::Result<u32> {
        Ok(self.window.read()?.map_or(0, |b| u32::from(b & 0x3F)))
    }
}
