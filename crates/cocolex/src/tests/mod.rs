
/// Number of cases per quickcheck property.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Maps arbitrary bytes onto characters that matter to the Coco/R tables:
/// identifier and digit runs, every line ending, string and character
/// quotes, pragma starts, comment delimiters, and one unmapped control byte.
pub(crate) fn coco_text(seed: &[u8]) -> Vec<u8> {
    const ALPHABET: &[u8] = b"abcXYZ019 \t\r\n\"'$=.<>()[]{}|+-/*\\\x01";
    seed.iter()
        .map(|&b| ALPHABET[usize::from(b) % ALPHABET.len()])
        .collect()
}
