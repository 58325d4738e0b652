//! Token queue with independent scan and peek cursors.
//!
//! Tokens are produced once and kept in `tokens` until the scan cursor has
//! passed all of them. `scan` indexes the next token [`scan_next`] hands
//! out and `peek` the next one [`peek_next`] looks at, with
//! `scan <= peek <= tokens.len()`.
//!
//! [`scan_next`]: TokenQueue::scan_next
//! [`peek_next`]: TokenQueue::peek_next

use crate::token::{Kind, Token};

#[derive(Debug, Default)]
pub(crate) struct TokenQueue {
    tokens: Vec<Token>,
    scan: usize,
    peek: usize,
}

impl TokenQueue {
    /// Returns the next token for the parser, reusing one produced while
    /// peeking if there is any. Moves the peek cursor back to the scan
    /// cursor.
    pub(crate) fn scan_next<E>(
        &mut self,
        produce: impl FnOnce() -> Result<Token, E>,
    ) -> Result<Token, E> {
        let token = if self.scan < self.tokens.len() {
            let token = self.tokens[self.scan].clone();
            self.scan += 1;
            token
        } else {
            let token = produce()?;
            self.tokens.push(token.clone());
            self.scan = self.tokens.len();
            token
        };
        self.peek = self.scan;
        self.compact();
        Ok(token)
    }

    /// Returns the token after the last peeked one, skipping pragmas.
    ///
    /// Skipped pragmas stay queued, so [`scan_next`](Self::scan_next) still
    /// returns them in order.
    pub(crate) fn peek_next<E>(
        &mut self,
        is_pragma: impl Fn(Kind) -> bool,
        mut produce: impl FnMut() -> Result<Token, E>,
    ) -> Result<Token, E> {
        loop {
            if self.peek == self.tokens.len() {
                self.tokens.push(produce()?);
            }
            let token = &self.tokens[self.peek];
            self.peek += 1;
            if !is_pragma(token.kind) {
                return Ok(token.clone());
            }
        }
    }

    /// Restarts peeking at the scan cursor.
    pub(crate) fn reset_peek(&mut self) {
        self.peek = self.scan;
    }

    /// Tokens produced but not yet scanned.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.tokens.len() - self.scan
    }

    /// Drops history once every produced token has been scanned.
    fn compact(&mut self) {
        debug_assert!(self.scan <= self.peek && self.peek <= self.tokens.len());
        if self.scan == self.tokens.len() {
            self.tokens.clear();
            self.scan = 0;
            self.peek = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    const PRAGMA: Kind = 100;

    /// Produces tokens whose `pos` is their production order and whose kind
    /// comes from `kinds`.
    struct Producer {
        kinds: Vec<Kind>,
        produced: usize,
    }

    impl Producer {
        fn new(kinds: &[Kind]) -> Self {
            Self {
                kinds: kinds.to_vec(),
                produced: 0,
            }
        }

        fn next(&mut self) -> Result<Token, Infallible> {
            let kind = self.kinds.get(self.produced).copied().unwrap_or(0);
            let token = Token {
                kind,
                pos: self.produced,
                ..Token::default()
            };
            self.produced += 1;
            Ok(token)
        }
    }

    fn is_pragma(kind: Kind) -> bool {
        kind == PRAGMA
    }

    #[test]
    fn scan_without_peeking_keeps_no_history() {
        let mut q = TokenQueue::default();
        let mut p = Producer::new(&[1, 2, 3]);
        for expected in 0..3 {
            assert_eq!(q.scan_next(|| p.next()).unwrap().pos, expected);
            assert_eq!(q.pending(), 0);
        }
    }

    #[test]
    fn peeked_tokens_are_not_produced_again() {
        let mut q = TokenQueue::default();
        let mut p = Producer::new(&[1, 2, 3]);
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().pos, 0);
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().pos, 1);
        assert_eq!(p.produced, 2);

        assert_eq!(q.scan_next(|| p.next()).unwrap().pos, 0);
        assert_eq!(q.scan_next(|| p.next()).unwrap().pos, 1);
        assert_eq!(q.scan_next(|| p.next()).unwrap().pos, 2);
        assert_eq!(p.produced, 3);
    }

    #[test]
    fn peek_continues_from_the_scan_cursor() {
        let mut q = TokenQueue::default();
        let mut p = Producer::new(&[1, 2, 3, 4]);
        q.peek_next(is_pragma, || p.next()).unwrap();
        q.peek_next(is_pragma, || p.next()).unwrap();
        q.peek_next(is_pragma, || p.next()).unwrap();
        assert_eq!(q.scan_next(|| p.next()).unwrap().pos, 0);
        // Scanning resets the peek cursor.
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().pos, 1);
    }

    #[test]
    fn reset_peek_rewinds_to_the_scan_cursor() {
        let mut q = TokenQueue::default();
        let mut p = Producer::new(&[1, 2, 3]);
        q.scan_next(|| p.next()).unwrap();
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().pos, 1);
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().pos, 2);
        q.reset_peek();
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().pos, 1);
        assert_eq!(p.produced, 3);
    }

    #[test]
    fn peek_skips_pragmas_but_scan_returns_them() {
        let mut q = TokenQueue::default();
        let mut p = Producer::new(&[1, PRAGMA, PRAGMA, 2]);
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().kind, 1);
        assert_eq!(q.peek_next(is_pragma, || p.next()).unwrap().kind, 2);
        assert_eq!(q.pending(), 4);

        let scanned: Vec<Kind> = (0..4)
            .map(|_| q.scan_next(|| p.next()).unwrap().kind)
            .collect();
        assert_eq!(scanned, vec![1, PRAGMA, PRAGMA, 2]);
        assert_eq!(p.produced, 4);
    }
}
