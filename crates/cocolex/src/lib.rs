//! A table-driven scanner for grammar-driven tools.
//!
//! The crate turns a byte stream into classified tokens for a downstream
//! parser. Three layers cooperate:
//!
//! - [`ByteWindow`] keeps a bounded window over a [`ByteSource`], refilling
//!   from seekable sources (files) or growing over non-seekable ones
//!   (pipes, sockets, consoles).
//! - A character layer optionally decodes UTF-8 on top of the window. It is
//!   switched on once, when the input starts with a byte-order mark.
//! - The automaton interprets [`LexicalTables`] (a DFA plus keyword,
//!   comment, and whitespace data) with maximal munch, and the [`Scanner`]
//!   keeps produced tokens in a queue so callers can look ahead without
//!   re-lexing.
//!
//! ```rust
//! use cocolex::{Scanner, tables::coco};
//!
//! let mut scanner = Scanner::from_bytes(b"COMPILER Calc", coco::tables()).unwrap();
//! let kw = scanner.scan_next().unwrap();
//! assert_eq!(kw.kind, coco::COMPILER);
//! let name = scanner.scan_next().unwrap();
//! assert_eq!((name.kind, name.val.as_str()), (coco::IDENT, "Calc"));
//! ```

#![allow(missing_docs)]

mod automaton;
mod decoder;
mod error;
mod lookahead;
mod options;
mod scanner;
mod source;
mod token;
mod window;

pub mod tables;

#[cfg(test)]
mod tests;

pub use error::{ScanError, TableError};
pub use options::WindowOptions;
pub use scanner::Scanner;
pub use source::{ByteSource, Seekable, Streamed};
pub use tables::{CharSet, CommentDef, LexicalTables, StateId, TablesBuilder};
pub use token::{Kind, Token};
pub use window::ByteWindow;
