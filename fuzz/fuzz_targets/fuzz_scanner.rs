#![no_main]
use std::io::{self, Cursor, Read};

use arbitrary::Arbitrary;
use cocolex::{ByteSource, Scanner, Seekable, Streamed, Token, WindowOptions, tables::coco};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    /// Bytes handed out per read by the streamed source.
    step: u8,
    /// Window size for the seekable source.
    window: u8,
    /// Interleaving of scan (0), peek (1), and reset_peek (2).
    ops: Vec<u8>,
    data: Vec<u8>,
}

struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn tokens<S: ByteSource>(scanner: Result<Scanner<S>, cocolex::ScanError>) -> Option<Vec<Token>> {
    let mut scanner = scanner.ok()?;
    let mut out = Vec::new();
    loop {
        let token = scanner.scan_next().expect("in-memory sources do not fail");
        let eof = token.kind == coco::EOF;
        assert!(eof || !token.val.is_empty(), "empty token {token}");
        out.push(token);
        if eof {
            return Some(out);
        }
    }
}

fuzz_target!(|input: Input| {
    let data = &input.data[..];
    let whole = tokens(Scanner::from_bytes(data, coco::tables()));

    let window = usize::from(input.window % 32) + 1;
    let reloading = tokens(Scanner::with_options(
        Seekable::new(Cursor::new(data)).expect("cursors seek"),
        coco::tables(),
        WindowOptions {
            min_capacity: window,
            max_capacity: window,
        },
    ));
    assert_eq!(whole, reloading);

    let step = usize::from(input.step % 8) + 1;
    let streamed = tokens(Scanner::from_stream(Trickle { data, step }, coco::tables()));
    assert_eq!(whole, streamed);

    // Lookahead must never change what scanning returns.
    let (Some(whole), Ok(mut scanner)) = (whole, Scanner::from_bytes(data, coco::tables())) else {
        return;
    };
    let mut scanned = 0;
    for op in input.ops {
        match op % 3 {
            0 => {
                let token = scanner.scan_next().expect("in-memory sources do not fail");
                assert_eq!(&token, &whole[scanned.min(whole.len() - 1)]);
                scanned += 1;
            }
            1 => {
                scanner.peek().expect("in-memory sources do not fail");
            }
            _ => scanner.reset_peek(),
        }
    }
});
