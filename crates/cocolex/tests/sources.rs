#![allow(missing_docs)]

mod common;

use std::io::{self, Cursor, Read};

use cocolex::{ScanError, Scanner, Seekable, WindowOptions, tables::coco};

use crate::common::{CALC, render};

/// Serves its data in one read, then fails.
struct Flaky(&'static [u8]);

impl Read for Flaky {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0.is_empty() {
            return Err(io::Error::other("link down"));
        }
        let n = buf.len().min(self.0.len());
        buf[..n].copy_from_slice(&self.0[..n]);
        self.0 = &self.0[n..];
        Ok(n)
    }
}

#[test]
fn file_and_memory_scan_alike() {
    let path = std::env::temp_dir().join(format!("cocolex-{}.atg", std::process::id()));
    std::fs::write(&path, CALC).unwrap();
    let from_file = render(&mut Scanner::open(&path, coco::tables()).unwrap());
    std::fs::remove_file(&path).unwrap();

    let from_memory = render(&mut Scanner::from_bytes(CALC.as_bytes(), coco::tables()).unwrap());
    assert_eq!(from_file, from_memory);
}

#[test]
fn missing_file_names_the_path() {
    let path = std::env::temp_dir().join("cocolex-does-not-exist.atg");
    let err = Scanner::open(&path, coco::tables()).unwrap_err();
    match &err {
        ScanError::Open { path: p, .. } => assert_eq!(p, &path),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("cannot open "));
}

#[test]
fn borrowed_stream_stays_with_the_caller() {
    let mut stream = Cursor::new(b"a b".to_vec());
    {
        let scanner = Scanner::from_stream(&mut stream, coco::tables()).unwrap();
        assert_eq!(scanner.count(), 2);
    }
    assert_eq!(stream.position(), 3);
}

#[test]
fn owned_source_comes_back() {
    let scanner = Scanner::from_bytes(b"x", coco::tables()).unwrap();
    let cursor = scanner.into_source().into_inner();
    assert_eq!(cursor.into_inner(), b"x");
}

#[test]
fn source_text_between_tokens() {
    let source = Seekable::new(Cursor::new(CALC.as_bytes())).unwrap();
    let tiny = WindowOptions {
        min_capacity: 4,
        max_capacity: 8,
    };
    let mut scanner = Scanner::with_options(source, coco::tables(), tiny).unwrap();
    let open = loop {
        let t = scanner.scan_next().unwrap();
        if t.kind == coco::LPAR_POINT {
            break t;
        }
    };
    let close = loop {
        let t = scanner.scan_next().unwrap();
        if t.kind == coco::POINT_RPAR {
            break t;
        }
    };
    let action = scanner.source_text(open.pos + 2, close.pos).unwrap();
    assert_eq!(action, " $x ");

    // Scanning carries on where it was.
    let point = scanner.scan_next().unwrap();
    assert_eq!((point.kind, point.line, point.col), (coco::POINT, 8, 26));
}

#[test]
fn malformed_byte_order_mark() {
    let err = Scanner::from_bytes(b"\xEFab", coco::tables()).unwrap_err();
    assert_eq!(err.to_string(), "illegal byte order mark: EF 61 62");
    let err = Scanner::from_bytes(b"\xEF", coco::tables()).unwrap_err();
    assert_eq!(err.to_string(), "illegal byte order mark: EF EOF EOF");
}

#[test]
fn iteration_stops_after_an_error() {
    let mut scanner = Scanner::from_stream(Flaky(b"a b"), coco::tables()).unwrap();
    assert_eq!(scanner.next().unwrap().unwrap().val, "a");
    let err = scanner.next().unwrap().unwrap_err();
    assert!(matches!(err, ScanError::Io { pos: 3, .. }));
    assert!(scanner.next().is_none());
    assert!(scanner.next().is_none());
}
