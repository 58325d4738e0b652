use std::io::{Cursor, ErrorKind};

use super::*;
use crate::{
    source::{Seekable, Streamed},
    tests::readers::{FailAfter, Trickle},
};

fn seekable(data: &[u8], max_capacity: usize) -> ByteWindow<Seekable<Cursor<&[u8]>>> {
    let options = WindowOptions {
        min_capacity: 1,
        max_capacity,
    };
    ByteWindow::new(Seekable::new(Cursor::new(data)).unwrap(), options).unwrap()
}

fn streamed(data: &[u8], step: usize, min_capacity: usize) -> ByteWindow<Streamed<Trickle<'_>>> {
    let options = WindowOptions {
        min_capacity,
        ..Default::default()
    };
    ByteWindow::new(Streamed::new(Trickle::new(data, step)), options).unwrap()
}

fn drain<S: ByteSource>(window: &mut ByteWindow<S>) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(b) = window.read().unwrap() {
        out.push(b);
    }
    out
}

fn all_bytes() -> Vec<u8> {
    (0..=255).collect()
}

#[test]
fn small_seekable_source_fits_one_window() {
    let mut w = seekable(b"hello", 64);
    assert_eq!(w.capacity(), 5);
    assert_eq!(w.window_len(), 5);
    assert_eq!(drain(&mut w), b"hello");
    assert_eq!(w.read().unwrap(), None);
    assert_eq!(w.position(), 5);
}

#[test]
fn empty_seekable_source_is_immediately_at_end() {
    let mut w = seekable(b"", 64);
    assert_eq!(w.read().unwrap(), None);
    assert_eq!(w.peek().unwrap(), None);
    assert_eq!(w.position(), 0);
}

#[test]
fn seekable_reads_through_a_capped_window() {
    let data = all_bytes();
    let mut w = seekable(&data, 16);
    assert_eq!(w.capacity(), 16);
    assert_eq!(drain(&mut w), data);
    assert_eq!(w.window_start(), 240);
    assert_eq!(w.position(), 256);
}

#[test]
fn seekable_set_position_reloads_around_target() {
    let data = all_bytes();
    let mut w = seekable(&data, 16);
    w.set_position(100).unwrap();
    assert_eq!(w.window_start(), 100);
    assert_eq!(w.read().unwrap(), Some(100));

    // Inside the window: no reload.
    w.set_position(110).unwrap();
    assert_eq!(w.window_start(), 100);
    assert_eq!(w.read().unwrap(), Some(110));

    w.set_position(3).unwrap();
    assert_eq!(w.window_start(), 3);
    assert_eq!(w.read().unwrap(), Some(3));
}

#[test]
fn seekable_set_position_to_end_outside_window() {
    let data = all_bytes();
    let mut w = seekable(&data, 16);
    w.set_position(256).unwrap();
    assert_eq!(w.position(), 256);
    assert_eq!(w.read().unwrap(), None);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "past the end of the source")]
fn set_position_past_end_is_an_invariant_violation() {
    let mut w = seekable(b"abc", 64);
    let _ = w.set_position(10);
}

#[cfg(not(debug_assertions))]
#[test]
fn set_position_past_end_clamps_to_end() {
    let mut w = seekable(b"abc", 64);
    w.set_position(10).unwrap();
    assert_eq!(w.position(), 3);
    assert_eq!(w.read().unwrap(), None);
}

#[test]
fn peek_has_no_side_effects() {
    let mut w = seekable(b"ab", 64);
    assert_eq!(w.peek().unwrap(), Some(b'a'));
    assert_eq!(w.peek().unwrap(), Some(b'a'));
    assert_eq!(w.read().unwrap(), Some(b'a'));
    assert_eq!(w.peek().unwrap(), Some(b'b'));
    assert_eq!(w.read().unwrap(), Some(b'b'));
    assert_eq!(w.peek().unwrap(), None);
    assert_eq!(w.position(), 2);
}

#[test]
fn peek_across_a_window_boundary() {
    let mut w = seekable(b"abc", 2);
    assert_eq!(drain_n(&mut w, 2), b"ab");
    assert_eq!(w.peek().unwrap(), Some(b'c'));
    assert_eq!(w.position(), 2);
    assert_eq!(w.read().unwrap(), Some(b'c'));
}

fn drain_n<S: ByteSource>(window: &mut ByteWindow<S>, n: usize) -> Vec<u8> {
    (0..n).filter_map(|_| window.read().unwrap()).collect()
}

#[test]
fn streamed_window_grows_by_doubling() {
    let data = vec![7u8; 100];
    let mut w = streamed(&data, 3, 8);
    assert!(!w.is_seekable());
    assert_eq!(w.capacity(), 8);
    assert_eq!(drain(&mut w), data);
    assert_eq!(w.capacity(), 128);
    assert_eq!(w.window_start(), 0);
    assert_eq!(w.source_len(), 100);
}

#[test]
fn streamed_rewind_reuses_buffered_bytes() {
    let mut w = streamed(b"abcdef", 1, 2);
    assert_eq!(drain(&mut w), b"abcdef");
    w.set_position(2).unwrap();
    assert_eq!(w.window_start(), 0);
    assert_eq!(w.read().unwrap(), Some(b'c'));
}

#[test]
fn streamed_set_position_forward_pulls_chunks() {
    let mut w = streamed(b"abcdef", 1, 2);
    w.set_position(4).unwrap();
    assert_eq!(w.position(), 4);
    assert_eq!(w.read().unwrap(), Some(b'e'));
    assert_eq!(w.source_len(), 5);
}

#[test]
fn text_copies_without_moving_the_cursor() {
    let mut w = seekable(b"COMPILER Foo", 4);
    assert_eq!(drain_n(&mut w, 2), b"CO");
    assert_eq!(w.text(9, 12).unwrap(), "Foo");
    assert_eq!(w.position(), 2);
    assert_eq!(w.read().unwrap(), Some(b'M'));
}

#[test]
fn io_errors_are_not_end_of_input() {
    let mut w = ByteWindow::new(
        Streamed::new(FailAfter::new(b"ok")),
        WindowOptions::default(),
    )
    .unwrap();
    assert_eq!(w.read().unwrap(), Some(b'o'));
    assert_eq!(w.read().unwrap(), Some(b'k'));
    let err = w.read().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}

/// Property: Reading after any sequence of seeks returns the source byte at
/// the seek target, however small the window.
#[quickcheck_macros::quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn seek_then_read_matches_the_source(data: Vec<u8>, seeks: Vec<usize>, window: u8) -> bool {
    let max_capacity = usize::from(window % 16) + 1;
    let mut seekable = seekable(&data, max_capacity);
    let mut trickle = streamed(&data, max_capacity, 1);
    seeks.iter().all(|&s| {
        let pos = if data.is_empty() { 0 } else { s % (data.len() + 1) };
        seekable.set_position(pos).unwrap();
        trickle.set_position(pos).unwrap();
        let expected = data.get(pos).copied();
        seekable.read().unwrap() == expected && trickle.read().unwrap() == expected
    })
}

#[test]
fn text_clamps_offsets_to_the_source() {
    let mut w = seekable(b"abc", 2);
    w.set_position(1).unwrap();
    assert_eq!(w.text(10, 20).unwrap(), "");
    assert_eq!(w.text(1, 20).unwrap(), "bc");
    assert_eq!(w.text(3, 1).unwrap(), "");
    assert_eq!(w.position(), 1);

    let mut s = streamed(b"abcdef", 2, 2);
    assert_eq!(s.text(4, 100).unwrap(), "ef");
    assert_eq!(s.text(50, 100).unwrap(), "");
    assert_eq!(s.position(), 0);
    assert_eq!(drain(&mut s), b"abcdef");
}
