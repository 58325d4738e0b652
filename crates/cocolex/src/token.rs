use core::fmt;

/// Token class id as assigned by the grammar's tables.
pub type Kind = u16;

/// One classified lexeme.
///
/// Positions refer to the first character of the lexeme. `pos` counts bytes
/// and `char_pos` counts decoded characters, both from 0; with UTF-8 input
/// the two diverge after the first multi-byte character (and after the
/// byte-order mark, which is never counted as a character).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// Token class; the tables' `eof_kind` at end of input.
    pub kind: Kind,
    /// Byte offset.
    pub pos: usize,
    /// Character offset.
    pub char_pos: usize,
    /// Line, starting at 1.
    pub line: usize,
    /// Column, starting at 1.
    pub col: usize,
    /// The lexeme; empty at end of input.
    pub val: String,
}

impl Token {
    /// Number of characters in the lexeme.
    pub fn char_len(&self) -> usize {
        self.val.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} kind {} {:?}", self.line, self.col, self.kind, self.val)
    }
}
