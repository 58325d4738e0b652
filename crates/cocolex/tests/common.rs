#![allow(missing_docs, dead_code)]

use core::fmt::Write;

use cocolex::{ByteSource, Scanner, tables::coco};

/// A small Coco/R grammar touching every token class.
pub const CALC: &str = "COMPILER Calc
/* nested /* comment */ */
CHARACTERS
  digit = \"0123456789\".
TOKENS
  number = digit {digit}.
PRODUCTIONS
  Calc = number (. $x .) .
END Calc.
";

/// One token per line, up to and including end of input.
pub fn render<S: ByteSource>(scanner: &mut Scanner<S>) -> String {
    let mut out = String::new();
    loop {
        let token = scanner.scan_next().expect("scan failed");
        writeln!(out, "{token}").unwrap();
        if token.kind == coco::EOF {
            return out;
        }
    }
}
