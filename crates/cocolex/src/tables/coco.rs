//! Tables for the Coco/R grammar-description language.
//!
//! These are the generated tables of the Coco/R attributed grammar
//! (`COMPILER ... END`), reproduced as data. They make a complete, realistic
//! grammar for exercising the engine and double as the tables for tools
//! that read `.atg` files.

use std::sync::{Arc, OnceLock};

use super::{CharSet, CommentDef, LexicalTables, StateId};
use crate::token::Kind;

/// End of input.
pub const EOF: Kind = 0;
/// Identifier; keywords are looked up among these.
pub const IDENT: Kind = 1;
/// Digit sequence.
pub const NUMBER: Kind = 2;
/// `"..."` with backslash escapes.
pub const STRING: Kind = 3;
/// String broken by a line end.
pub const BAD_STRING: Kind = 4;
/// `'x'` character literal.
pub const CHAR: Kind = 5;
/// Keyword `COMPILER`.
pub const COMPILER: Kind = 6;
/// Keyword `IGNORECASE`.
pub const IGNORECASE: Kind = 7;
/// Keyword `CHARACTERS`.
pub const CHARACTERS: Kind = 8;
/// Keyword `TOKENS`.
pub const TOKENS: Kind = 9;
/// Keyword `PRAGMAS`.
pub const PRAGMAS: Kind = 10;
/// Keyword `COMMENTS`.
pub const COMMENTS: Kind = 11;
/// Keyword `FROM`.
pub const FROM: Kind = 12;
/// Keyword `TO`.
pub const TO: Kind = 13;
/// Keyword `NESTED`.
pub const NESTED: Kind = 14;
/// Keyword `IGNORE`.
pub const IGNORE: Kind = 15;
/// Keyword `PRODUCTIONS`.
pub const PRODUCTIONS: Kind = 16;
/// `=`
pub const EQUAL: Kind = 17;
/// `.`
pub const POINT: Kind = 18;
/// Keyword `END`.
pub const END: Kind = 19;
/// `+`
pub const PLUS: Kind = 20;
/// `-`
pub const MINUS: Kind = 21;
/// `..`
pub const DOT_DOT: Kind = 22;
/// Keyword `ANY`.
pub const ANY: Kind = 23;
/// `<`
pub const LESS: Kind = 24;
/// `>`
pub const GREATER: Kind = 25;
/// `<.`
pub const LESS_POINT: Kind = 26;
/// `.>`
pub const POINT_GREATER: Kind = 27;
/// `|`
pub const BAR: Kind = 28;
/// Keyword `WEAK`.
pub const WEAK: Kind = 29;
/// `(`
pub const LPAR: Kind = 30;
/// `)`
pub const RPAR: Kind = 31;
/// `[`
pub const LBRACK: Kind = 32;
/// `]`
pub const RBRACK: Kind = 33;
/// `{`
pub const LBRACE: Kind = 34;
/// `}`
pub const RBRACE: Kind = 35;
/// Keyword `SYNC`.
pub const SYNC: Kind = 36;
/// Keyword `IF`.
pub const IF: Kind = 37;
/// Keyword `CONTEXT`.
pub const CONTEXT: Kind = 38;
/// `(.`
pub const LPAR_POINT: Kind = 39;
/// `.)`
pub const POINT_RPAR: Kind = 40;
/// Invalid token.
pub const NO_SYM: Kind = 41;
/// Highest kind the parser sees.
pub const MAX_T: Kind = 41;
/// `$name`: trace switches.
pub const DDT: Kind = 42;
/// `$name=value`: compiler options.
pub const OPTION: Kind = 43;

const STATE_COUNT: usize = 34;

/// Shared Coco/R tables, built on first use.
pub fn tables() -> Arc<LexicalTables> {
    static TABLES: OnceLock<Arc<LexicalTables>> = OnceLock::new();
    TABLES
        .get_or_init(|| Arc::new(build().expect("Coco/R tables are well-formed")))
        .clone()
}

fn letter() -> CharSet {
    CharSet::new().range('A', 'Z').single('_').range('a', 'z')
}

fn digit() -> CharSet {
    CharSet::new().range('0', '9')
}

fn letter_or_digit() -> CharSet {
    CharSet::new()
        .range('0', '9')
        .range('A', 'Z')
        .single('_')
        .range('a', 'z')
}

fn printable() -> CharSet {
    CharSet::new().range(' ', '~')
}

fn build() -> Result<LexicalTables, crate::TableError> {
    let punctuation: [(char, StateId); 16] = [
        ('"', 12),
        ('\'', 5),
        ('$', 13),
        ('=', 16),
        ('.', 31),
        ('+', 17),
        ('-', 18),
        ('<', 32),
        ('>', 20),
        ('|', 23),
        ('(', 33),
        (')', 24),
        ('[', 25),
        (']', 26),
        ('{', 27),
        ('}', 28),
    ];
    let single_kinds: [(StateId, Kind); 20] = [
        (3, STRING),
        (4, BAD_STRING),
        (9, CHAR),
        (16, EQUAL),
        (17, PLUS),
        (18, MINUS),
        (19, DOT_DOT),
        (20, GREATER),
        (21, LESS_POINT),
        (22, POINT_GREATER),
        (23, BAR),
        (24, RPAR),
        (25, LBRACK),
        (26, RBRACK),
        (27, LBRACE),
        (28, RBRACE),
        (29, LPAR_POINT),
        (30, POINT_RPAR),
        (31, POINT),
        (32, LESS),
    ];
    let keywords: [(&str, Kind); 17] = [
        ("COMPILER", COMPILER),
        ("IGNORECASE", IGNORECASE),
        ("CHARACTERS", CHARACTERS),
        ("TOKENS", TOKENS),
        ("PRAGMAS", PRAGMAS),
        ("COMMENTS", COMMENTS),
        ("FROM", FROM),
        ("TO", TO),
        ("NESTED", NESTED),
        ("IGNORE", IGNORE),
        ("PRODUCTIONS", PRODUCTIONS),
        ("END", END),
        ("ANY", ANY),
        ("WEAK", WEAK),
        ("SYNC", SYNC),
        ("IF", IF),
        ("CONTEXT", CONTEXT),
    ];

    let mut b = LexicalTables::builder(STATE_COUNT)
        .kinds(EOF, NO_SYM, MAX_T)
        .ident_kind(IDENT)
        .ignore(CharSet::new().single(' ').range(9u32, 10u32).single(13u32))
        .comment(CommentDef::new("//", "\n", false))
        .comment(CommentDef::new("/*", "*/", true))
        .start(letter(), 1)
        .start(digit(), 2);
    for (ch, state) in punctuation {
        b = b.start(CharSet::new().single(ch), state);
    }
    for (state, kind) in single_kinds {
        b = b.accept(state, kind);
    }
    for (text, kind) in keywords {
        b = b.keyword(text, kind);
    }

    b.accept(1, IDENT)
        .edge(1, letter_or_digit(), 1)
        .accept(2, NUMBER)
        .edge(2, digit(), 2)
        // 'x' character literals
        .edge(
            5,
            CharSet::new()
                .range(0u32, 9u32)
                .range(11u32, 12u32)
                .range(13u32, u32::from('&'))
                .range('(', '[')
                .range(']', '\u{FFFF}'),
            6,
        )
        .edge(5, CharSet::new().single('\\'), 7)
        .edge(6, CharSet::new().single('\''), 9)
        .edge(7, printable(), 8)
        .edge(8, CharSet::new().range('0', '9').range('a', 'f'), 8)
        .edge(8, CharSet::new().single('\''), 9)
        // $name and $name=value pragmas
        .accept(10, DDT)
        .edge(10, letter_or_digit(), 10)
        .accept(11, OPTION)
        .edge(
            11,
            CharSet::new()
                .range('-', '.')
                .range('0', ':')
                .range('A', 'Z')
                .single('_')
                .range('a', 'z'),
            11,
        )
        .accept(13, DDT)
        .edge(13, digit(), 10)
        .edge(13, letter(), 15)
        .accept(15, DDT)
        .edge(15, digit(), 10)
        .edge(15, letter(), 15)
        .edge(15, CharSet::new().single('='), 11)
        // "strings"; a line break inside one makes it a bad string
        .edge(
            12,
            CharSet::new()
                .range(0u32, 9u32)
                .range(11u32, 12u32)
                .range(14u32, u32::from('!'))
                .range('#', '[')
                .range(']', '\u{FFFF}'),
            12,
        )
        .edge(12, CharSet::new().single(10u32).single(13u32), 4)
        .edge(12, CharSet::new().single('"'), 3)
        .edge(12, CharSet::new().single('\\'), 14)
        .edge(14, printable(), 12)
        // operators sharing a prefix
        .edge(31, CharSet::new().single('.'), 19)
        .edge(31, CharSet::new().single('>'), 22)
        .edge(31, CharSet::new().single(')'), 30)
        .edge(32, CharSet::new().single('.'), 21)
        .accept(33, LPAR)
        .edge(33, CharSet::new().single('.'), 29)
        .build()
}
