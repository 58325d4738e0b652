use std::{io, path::PathBuf};

use thiserror::Error;

use crate::tables::StateId;

/// Failures surfaced by [`Scanner`](crate::Scanner).
///
/// Invalid input is not an error: characters the automaton cannot match come
/// back as tokens of the tables' `no_sym` kind so scanning can continue.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The input file could not be opened or measured.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input starts with `EF` but not with a UTF-8 byte-order mark.
    /// `None` stands for end of input.
    #[error("illegal byte order mark: EF {} {}", hex(.second), hex(.third))]
    MalformedBom { second: Option<u8>, third: Option<u8> },
    /// Reading the byte at `pos` failed. Scanning may be retried.
    #[error("I/O error at byte {pos}: {source}")]
    Io {
        pos: usize,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub(crate) fn io(pos: usize, source: io::Error) -> Self {
        ScanError::Io { pos, source }
    }
}

fn hex(byte: &Option<u8>) -> String {
    match *byte {
        Some(b) => format!("{b:02X}"),
        None => "EOF".into(),
    }
}

/// Rejected [`LexicalTables`](crate::LexicalTables) configurations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("state {from} has an edge to undefined state {to}")]
    UndefinedState { from: StateId, to: StateId },
    #[error("state {0} is not defined")]
    UnknownState(StateId),
    #[error("start table maps to undefined state {0}")]
    UndefinedStartState(StateId),
    #[error("state 0 must be the non-accepting sink")]
    SinkNotEmpty,
    #[error("comment delimiter must have one or two characters, got {0}")]
    DelimiterLength(usize),
    #[error("no_sym ({no_sym}) must not exceed max_t ({max_t})")]
    NoSymAboveMaxT { no_sym: u16, max_t: u16 },
}
