use std::{
    fs::File,
    io::{Cursor, Read, Seek},
    path::Path,
    sync::Arc,
};

use bstr::BString;
use log::debug;

use crate::{
    automaton::Automaton,
    error::ScanError,
    lookahead::TokenQueue,
    options::WindowOptions,
    source::{ByteSource, Seekable, Streamed},
    tables::LexicalTables,
    token::Token,
    window::ByteWindow,
};

/// A scanner over one input, producing tokens on demand.
///
/// Tokens are scanned with [`scan_next`](Self::scan_next).
/// [`peek`](Self::peek) looks arbitrarily far ahead without consuming
/// anything; peeked tokens are kept and handed out by later scans without
/// being lexed twice.
///
/// Iterating yields every token before the end of input:
///
/// ```rust
/// use cocolex::{Scanner, tables::coco};
///
/// let scanner = Scanner::from_bytes(b"A = b | c.", coco::tables()).unwrap();
/// let kinds: Vec<_> = scanner.map(|t| t.unwrap().kind).collect();
/// assert_eq!(
///     kinds,
///     [coco::IDENT, coco::EQUAL, coco::IDENT, coco::BAR, coco::IDENT, coco::POINT]
/// );
/// ```
#[derive(Debug)]
pub struct Scanner<S> {
    automaton: Automaton<S>,
    queue: TokenQueue,
    done: bool,
}

impl Scanner<Seekable<File>> {
    /// Opens the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ScanError::Open`] when the file cannot be opened or measured, and
    /// [`ScanError::MalformedBom`] when it starts with a broken byte-order
    /// mark.
    pub fn open(
        path: impl AsRef<Path>,
        tables: impl Into<Arc<LexicalTables>>,
    ) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let source = File::open(path)
            .and_then(Seekable::new)
            .map_err(|source| ScanError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("scanning {}", path.display());
        Self::with_options(source, tables, WindowOptions::default())
    }
}

impl<'a> Scanner<Seekable<Cursor<&'a [u8]>>> {
    /// Scans an in-memory buffer.
    ///
    /// # Errors
    ///
    /// [`ScanError::MalformedBom`] when `bytes` starts with a broken
    /// byte-order mark.
    pub fn from_bytes(
        bytes: &'a [u8],
        tables: impl Into<Arc<LexicalTables>>,
    ) -> Result<Self, ScanError> {
        Self::from_seekable(Cursor::new(bytes), tables)
    }
}

impl<R: Read + Seek> Scanner<Seekable<R>> {
    /// Scans a reader that can seek, such as a file.
    ///
    /// # Errors
    ///
    /// Fails when the reader cannot be measured or read, or starts with a
    /// broken byte-order mark.
    pub fn from_seekable(
        reader: R,
        tables: impl Into<Arc<LexicalTables>>,
    ) -> Result<Self, ScanError> {
        let source = Seekable::new(reader).map_err(|e| ScanError::io(0, e))?;
        Self::with_options(source, tables, WindowOptions::default())
    }
}

impl<R: Read> Scanner<Streamed<R>> {
    /// Scans a forward-only reader such as a pipe or socket.
    ///
    /// Pass `&mut reader` to keep ownership of the stream.
    ///
    /// # Errors
    ///
    /// Fails when the first read fails or the input starts with a broken
    /// byte-order mark.
    pub fn from_stream(
        reader: R,
        tables: impl Into<Arc<LexicalTables>>,
    ) -> Result<Self, ScanError> {
        Self::with_options(Streamed::new(reader), tables, WindowOptions::default())
    }
}

impl<S: ByteSource> Scanner<S> {
    /// Scans `source` with explicit window sizing.
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the first read fails and
    /// [`ScanError::MalformedBom`] when the input starts with `EF` that is
    /// not a complete byte-order mark.
    pub fn with_options(
        source: S,
        tables: impl Into<Arc<LexicalTables>>,
        options: WindowOptions,
    ) -> Result<Self, ScanError> {
        let window = ByteWindow::new(source, options).map_err(|e| ScanError::io(0, e))?;
        Ok(Self {
            automaton: Automaton::new(window, tables.into())?,
            queue: TokenQueue::default(),
            done: false,
        })
    }

    /// Returns the next token and resets peeking to just after it.
    ///
    /// At end of input every call returns an end-of-input token.
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the source fails while the token is read.
    pub fn scan_next(&mut self) -> Result<Token, ScanError> {
        let automaton = &mut self.automaton;
        self.queue.scan_next(|| automaton.next_token())
    }

    /// Returns the token after the previously peeked one, skipping pragmas.
    ///
    /// The first peek after a [`scan_next`](Self::scan_next) or
    /// [`reset_peek`](Self::reset_peek) returns the token the next scan will
    /// return (unless that is a pragma).
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the source fails while a token is read.
    pub fn peek(&mut self) -> Result<Token, ScanError> {
        let tables = Arc::clone(self.automaton.tables());
        let automaton = &mut self.automaton;
        self.queue
            .peek_next(|kind| tables.is_pragma(kind), || automaton.next_token())
    }

    /// Makes the next [`peek`](Self::peek) start over from the scan
    /// position.
    pub fn reset_peek(&mut self) {
        self.queue.reset_peek();
    }

    /// Raw bytes of the input between byte offsets `beg` and `end`.
    ///
    /// Useful for copying source text such as semantic actions between
    /// token positions. Offsets past the end of the input are clamped to it.
    /// The scan position is unaffected.
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the bytes have to be read again and the source
    /// fails.
    pub fn source_text(&mut self, beg: usize, end: usize) -> Result<BString, ScanError> {
        self.automaton
            .window_mut()
            .text(beg, end)
            .map_err(|e| ScanError::io(beg, e))
    }

    /// Tables this scanner was built with.
    pub fn tables(&self) -> &LexicalTables {
        self.automaton.tables()
    }

    /// Whether the input started with a byte-order mark and is decoded as
    /// UTF-8.
    pub fn is_utf8(&self) -> bool {
        self.automaton.is_utf8()
    }

    /// Ends the session, handing back the source.
    pub fn into_source(self) -> S {
        self.automaton.into_window().into_source()
    }
}

impl<S: ByteSource> Iterator for Scanner<S> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scan_next() {
            Ok(token) if token.kind == self.tables().eof_kind() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: ByteSource> core::iter::FusedIterator for Scanner<S> {}
