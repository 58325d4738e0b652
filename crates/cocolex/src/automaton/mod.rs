//! Automaton: drives [`LexicalTables`] over the character layer.
//!
//! Character bookkeeping
//! - `ch` is the current character (`None` at end of input), `pos` its byte
//!   offset, `char_pos` its character offset. `line` is 1-based; `col` is
//!   bumped per character and reset to 0 by a newline, so the first
//!   character of a line has column 1.
//! - A `\r` not followed by `\n` reads as `\n`. In `\r\n` the `\r` is an
//!   ordinary character and the `\n` ends the line, so every line ending
//!   convention counts one line.
//! - Newlines crossed by a skipped comment are replayed afterwards as
//!   synthetic `\n` characters (`pending_eols`) that leave the counters
//!   alone. Grammars that do not ignore `\n` still see their line breaks.
//!
//! Matching
//! - Maximal munch with fallback. Every accepting state passed records a
//!   candidate (kind and length); when the DFA has no edge for the current
//!   character the longest candidate wins and the input is rewound to its
//!   end. Rewinding restores the cursor recorded at the token start and
//!   replays the advances, which also recomputes line and column.
//! - Without any candidate the first character alone becomes a `no_sym`
//!   token, so scanning always moves forward.

use std::sync::Arc;

use log::{debug, trace};

use crate::{
    decoder::CharReader,
    error::ScanError,
    source::ByteSource,
    tables::{CommentDef, LexicalTables},
    token::{Kind, Token},
    window::ByteWindow,
};

const LF: u32 = 0x0A;
const CR: u32 = 0x0D;

/// Everything needed to put the automaton back on an earlier character.
#[derive(Debug, Clone, Copy)]
struct Mark {
    ch: Option<u32>,
    pos: usize,
    next_pos: usize,
    char_pos: usize,
    next_char: usize,
    line: usize,
    col: usize,
    pending_eols: usize,
}

#[derive(Debug)]
pub(crate) struct Automaton<S> {
    reader: CharReader<S>,
    tables: Arc<LexicalTables>,

    ch: Option<u32>,
    pos: usize,
    char_pos: usize,
    next_char: usize,
    line: usize,
    col: usize,
    pending_eols: usize,
}

impl<S: ByteSource> Automaton<S> {
    /// Reads the first character, switching to UTF-8 when the input starts
    /// with a byte-order mark.
    pub(crate) fn new(window: ByteWindow<S>, tables: Arc<LexicalTables>) -> Result<Self, ScanError> {
        let mut automaton = Self {
            reader: CharReader::new(window),
            tables,
            ch: None,
            pos: 0,
            char_pos: 0,
            next_char: 0,
            line: 1,
            col: 0,
            pending_eols: 0,
        };
        automaton.next_ch()?;
        if automaton.ch == Some(0xEF) {
            automaton.next_ch()?;
            let second = automaton.raw_ch();
            automaton.next_ch()?;
            let third = automaton.raw_ch();
            if second != Some(0xBB) || third != Some(0xBF) {
                return Err(ScanError::MalformedBom { second, third });
            }
            debug!("UTF-8 byte-order mark found, decoding as UTF-8");
            automaton.reader.enable_utf8();
            automaton.col = 0;
            automaton.next_char = 0;
            automaton.next_ch()?;
        }
        Ok(automaton)
    }

    pub(crate) fn tables(&self) -> &Arc<LexicalTables> {
        &self.tables
    }

    pub(crate) fn is_utf8(&self) -> bool {
        self.reader.is_utf8()
    }

    /// Byte offset of the current character.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn window_mut(&mut self) -> &mut ByteWindow<S> {
        self.reader.window_mut()
    }

    pub(crate) fn into_window(self) -> ByteWindow<S> {
        self.reader.into_window()
    }

    /// Produces the next token; at end of input, an `eof_kind` token every
    /// time.
    ///
    /// On an I/O error the automaton is put back where the call started, so
    /// calling again after a transient failure lexes the same token.
    pub(crate) fn next_token(&mut self) -> Result<Token, ScanError> {
        let before = self.mark();
        self.lex().or_else(|err| {
            if let Err(again) = self.rewind(before) {
                debug!("cannot restore position after I/O error: {again}");
            }
            Err(err)
        })
    }

    fn lex(&mut self) -> Result<Token, ScanError> {
        let tables = Arc::clone(&self.tables);
        loop {
            while self.ch.is_some_and(|c| tables.ignores(c)) {
                self.next_ch()?;
            }
            if !self.skip_comment(&tables)? {
                break;
            }
        }

        let start = self.mark();
        let mut token = Token {
            kind: tables.no_sym(),
            pos: self.pos,
            char_pos: self.char_pos,
            line: self.line,
            col: self.col,
            val: String::new(),
        };
        let Some(first) = self.ch else {
            token.kind = tables.eof_kind();
            return Ok(token);
        };

        let mut state = tables.start_state(first);
        let mut text = String::new();
        let mut len = 0;
        let mut best: Option<(Kind, usize)> = None;
        self.add_ch(&mut text, &mut len)?;
        loop {
            let current = tables.state(state);
            if let Some(kind) = current.accept() {
                best = Some((kind, len));
            }
            match self.ch.and_then(|c| current.next(c)) {
                Some(next) => {
                    self.add_ch(&mut text, &mut len)?;
                    state = next;
                }
                None => break,
            }
        }

        let (kind, keep) = best.unwrap_or((tables.no_sym(), 1));
        if keep < len {
            self.replay(start, keep)?;
            text = text.chars().take(keep).collect();
        }
        token.kind = kind;
        if kind == tables.no_sym() {
            debug!(
                "invalid token {text:?} at {}:{} (byte {})",
                token.line, token.col, token.pos
            );
        } else if Some(kind) == tables.ident_kind() {
            if let Some(keyword) = tables.keyword(&text) {
                token.kind = keyword;
            }
        }
        token.val = text;
        trace!("token {token}");
        Ok(token)
    }

    /// Advances to the next character.
    fn next_ch(&mut self) -> Result<(), ScanError> {
        if self.pending_eols > 0 {
            self.ch = Some(LF);
            self.pending_eols -= 1;
            return Ok(());
        }
        let pos = self.reader.position();
        self.ch = self.reader.read().map_err(|e| ScanError::io(pos, e))?;
        self.pos = pos;
        self.col += 1;
        self.char_pos = self.next_char;
        self.next_char += 1;
        if self.ch == Some(CR) {
            let after = self
                .reader
                .peek()
                .map_err(|e| ScanError::io(pos + 1, e))?;
            if after != Some(LF) {
                self.ch = Some(LF);
            }
        }
        if self.ch == Some(LF) {
            self.line += 1;
            self.col = 0;
        }
        Ok(())
    }

    fn add_ch(&mut self, text: &mut String, len: &mut usize) -> Result<(), ScanError> {
        if let Some(c) = self.ch {
            text.push(char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER));
            *len += 1;
            self.next_ch()?;
        }
        Ok(())
    }

    /// The current character as a byte, for byte-order mark checks.
    fn raw_ch(&self) -> Option<u8> {
        self.ch.and_then(|c| u8::try_from(c).ok())
    }

    fn mark(&self) -> Mark {
        Mark {
            ch: self.ch,
            pos: self.pos,
            next_pos: self.reader.position(),
            char_pos: self.char_pos,
            next_char: self.next_char,
            line: self.line,
            col: self.col,
            pending_eols: self.pending_eols,
        }
    }

    fn rewind(&mut self, mark: Mark) -> Result<(), ScanError> {
        self.reader
            .set_position(mark.next_pos)
            .map_err(|e| ScanError::io(mark.next_pos, e))?;
        self.ch = mark.ch;
        self.pos = mark.pos;
        self.char_pos = mark.char_pos;
        self.next_char = mark.next_char;
        self.line = mark.line;
        self.col = mark.col;
        self.pending_eols = mark.pending_eols;
        Ok(())
    }

    /// Rewinds to `start` and advances `count` characters again.
    fn replay(&mut self, start: Mark, count: usize) -> Result<(), ScanError> {
        self.rewind(start)?;
        for _ in 0..count {
            self.next_ch()?;
        }
        Ok(())
    }

    /// Skips one comment starting at the current character, if any.
    fn skip_comment(&mut self, tables: &LexicalTables) -> Result<bool, ScanError> {
        for comment in tables.comments() {
            if self.ch == Some(comment.start[0]) && self.comment(comment)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Tries to skip a comment of form `def`. A mismatching second start
    /// character rolls everything back; an unterminated comment runs to end
    /// of input.
    fn comment(&mut self, def: &CommentDef) -> Result<bool, ScanError> {
        let mark = self.mark();
        let line0 = self.line;
        let mut level = 1usize;
        self.next_ch()?;
        if let Some(&second) = def.start.get(1) {
            if self.ch != Some(second) {
                self.rewind(mark)?;
                return Ok(false);
            }
            self.next_ch()?;
        }
        loop {
            if self.ch == Some(def.end[0]) {
                if let Some(&second) = def.end.get(1) {
                    self.next_ch()?;
                    if self.ch != Some(second) {
                        continue;
                    }
                }
                level -= 1;
                if level == 0 {
                    self.pending_eols = self.line - line0;
                    debug!("skipped comment on lines {line0}..={}", self.line);
                    self.next_ch()?;
                    return Ok(true);
                }
                self.next_ch()?;
            } else if def.nested && self.ch == Some(def.start[0]) {
                if let Some(&second) = def.start.get(1) {
                    self.next_ch()?;
                    if self.ch != Some(second) {
                        continue;
                    }
                }
                level += 1;
                self.next_ch()?;
            } else if self.ch.is_none() {
                debug!("comment opened on line {line0} runs to end of input");
                return Ok(false);
            } else {
                self.next_ch()?;
            }
        }
    }
}
