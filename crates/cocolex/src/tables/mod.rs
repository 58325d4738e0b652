//! Immutable scanner configuration: the DFA and everything around it.
//!
//! Tables are data generated once per grammar. The automaton never mutates
//! them, so a single [`LexicalTables`] can be shared (through an `Arc`) by
//! any number of scanners.
//!
//! State 0 is the catch-all sink: it has no edges and does not accept.
//! Characters without a start mapping begin in the sink, which makes them
//! invalid tokens.

pub mod coco;

use std::collections::BTreeMap;

use crate::{error::TableError, token::Kind};

/// Index of a DFA state.
pub type StateId = u16;

/// The non-accepting sink state.
pub const SINK: StateId = 0;

/// A set of code points, stored as inclusive ranges.
///
/// ```rust
/// use cocolex::CharSet;
///
/// let ident = CharSet::new().range('a', 'z').range('A', 'Z').single('_');
/// assert!(ident.contains(u32::from('q')));
/// assert!(!ident.contains(u32::from('1')));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    ranges: Vec<(u32, u32)>,
}

impl CharSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one code point.
    #[must_use]
    pub fn single(self, ch: impl Into<u32>) -> Self {
        let ch = ch.into();
        self.range(ch, ch)
    }

    /// Adds `lo..=hi`; an inverted range adds nothing.
    #[must_use]
    pub fn range(mut self, lo: impl Into<u32>, hi: impl Into<u32>) -> Self {
        let (lo, hi) = (lo.into(), hi.into());
        if lo <= hi {
            self.ranges.push((lo, hi));
        }
        self
    }

    /// Every character of `chars`.
    #[must_use]
    pub fn of(chars: &str) -> Self {
        chars.chars().fold(Self::new(), |set, c| set.single(c))
    }

    /// Whether `ch` is in any of the ranges.
    pub fn contains(&self, ch: u32) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= ch && ch <= hi)
    }
}

/// A DFA state: an optional accepted kind plus outgoing edges.
///
/// An accepting state records a candidate match and keeps going; the
/// automaton only settles on it once no longer match is possible.
#[derive(Debug, Clone, Default)]
pub struct State {
    accept: Option<Kind>,
    edges: Vec<(CharSet, StateId)>,
}

impl State {
    /// Kind recognized when a token ends here.
    pub fn accept(&self) -> Option<Kind> {
        self.accept
    }

    /// First edge whose set contains `ch`.
    pub fn next(&self, ch: u32) -> Option<StateId> {
        self.edges
            .iter()
            .find(|(set, _)| set.contains(ch))
            .map(|&(_, to)| to)
    }
}

/// A comment form skipped between tokens.
///
/// Delimiters have one or two characters. Nested comments count inner start
/// delimiters and need a matching end for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDef {
    pub(crate) start: Vec<u32>,
    pub(crate) end: Vec<u32>,
    pub(crate) nested: bool,
}

impl CommentDef {
    pub fn new(start: &str, end: &str, nested: bool) -> Self {
        Self {
            start: start.chars().map(u32::from).collect(),
            end: end.chars().map(u32::from).collect(),
            nested,
        }
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }
}

/// Everything the automaton needs to know about one grammar's tokens.
#[derive(Debug, Clone)]
pub struct LexicalTables {
    states: Vec<State>,
    start: Vec<(CharSet, StateId)>,
    keywords: BTreeMap<String, Kind>,
    ignore: CharSet,
    comments: Vec<CommentDef>,
    eof_kind: Kind,
    ident_kind: Option<Kind>,
    no_sym: Kind,
    max_t: Kind,
}

impl LexicalTables {
    /// Starts a table with `state_count` states (state 0 being the sink).
    pub fn builder(state_count: usize) -> TablesBuilder {
        TablesBuilder {
            state_count,
            ..TablesBuilder::default()
        }
    }

    /// Start state for a token beginning with `ch`.
    pub fn start_state(&self, ch: u32) -> StateId {
        self.start
            .iter()
            .find(|(set, _)| set.contains(ch))
            .map_or(SINK, |&(_, state)| state)
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[usize::from(id)]
    }

    /// Kind a keyword reclassifies an identifier to.
    pub fn keyword(&self, text: &str) -> Option<Kind> {
        self.keywords.get(text).copied()
    }

    /// Whether `ch` is skipped between tokens.
    pub fn ignores(&self, ch: u32) -> bool {
        self.ignore.contains(ch)
    }

    pub fn comments(&self) -> &[CommentDef] {
        &self.comments
    }

    pub fn eof_kind(&self) -> Kind {
        self.eof_kind
    }

    /// Kind whose lexemes are looked up in the keyword table.
    pub fn ident_kind(&self) -> Option<Kind> {
        self.ident_kind
    }

    /// Kind of invalid tokens.
    pub fn no_sym(&self) -> Kind {
        self.no_sym
    }

    /// Highest kind the parser sees; everything above is a pragma.
    pub fn max_t(&self) -> Kind {
        self.max_t
    }

    pub fn is_pragma(&self, kind: Kind) -> bool {
        kind > self.max_t
    }
}

/// Builder for [`LexicalTables`]; validation happens in
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct TablesBuilder {
    state_count: usize,
    accepts: Vec<(StateId, Kind)>,
    edges: Vec<(StateId, CharSet, StateId)>,
    start: Vec<(CharSet, StateId)>,
    keywords: BTreeMap<String, Kind>,
    ignore: CharSet,
    comments: Vec<CommentDef>,
    eof_kind: Kind,
    ident_kind: Option<Kind>,
    no_sym: Kind,
    max_t: Kind,
}

impl TablesBuilder {
    /// Sets the end-of-input kind, the invalid-token kind, and the highest
    /// non-pragma kind.
    #[must_use]
    pub fn kinds(mut self, eof_kind: Kind, no_sym: Kind, max_t: Kind) -> Self {
        self.eof_kind = eof_kind;
        self.no_sym = no_sym;
        self.max_t = max_t;
        self
    }

    #[must_use]
    pub fn start(mut self, set: CharSet, state: StateId) -> Self {
        self.start.push((set, state));
        self
    }

    #[must_use]
    pub fn accept(mut self, state: StateId, kind: Kind) -> Self {
        self.accepts.push((state, kind));
        self
    }

    #[must_use]
    pub fn edge(mut self, from: StateId, set: CharSet, to: StateId) -> Self {
        self.edges.push((from, set, to));
        self
    }

    #[must_use]
    pub fn ident_kind(mut self, kind: Kind) -> Self {
        self.ident_kind = Some(kind);
        self
    }

    #[must_use]
    pub fn keyword(mut self, text: &str, kind: Kind) -> Self {
        self.keywords.insert(text.to_owned(), kind);
        self
    }

    #[must_use]
    pub fn ignore(mut self, set: CharSet) -> Self {
        self.ignore = set;
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: CommentDef) -> Self {
        self.comments.push(comment);
        self
    }

    /// Validates and freezes the tables.
    ///
    /// # Errors
    ///
    /// Rejects references to undefined states, an accepting or outgoing sink,
    /// comment delimiters that are not one or two characters long, and a
    /// `no_sym` kind in the pragma range.
    pub fn build(self) -> Result<LexicalTables, TableError> {
        let count = self.state_count.max(1);
        let defined = |id: StateId| usize::from(id) < count;

        if self.no_sym > self.max_t {
            return Err(TableError::NoSymAboveMaxT {
                no_sym: self.no_sym,
                max_t: self.max_t,
            });
        }
        for c in &self.comments {
            for delim in [&c.start, &c.end] {
                if !(1..=2).contains(&delim.len()) {
                    return Err(TableError::DelimiterLength(delim.len()));
                }
            }
        }
        if let Some(&(_, state)) = self.start.iter().find(|(_, s)| !defined(*s)) {
            return Err(TableError::UndefinedStartState(state));
        }

        let mut states = vec![State::default(); count];
        for (id, kind) in self.accepts {
            if id == SINK {
                return Err(TableError::SinkNotEmpty);
            }
            if !defined(id) {
                return Err(TableError::UnknownState(id));
            }
            states[usize::from(id)].accept = Some(kind);
        }
        for (from, set, to) in self.edges {
            if from == SINK {
                return Err(TableError::SinkNotEmpty);
            }
            if !defined(from) {
                return Err(TableError::UnknownState(from));
            }
            if !defined(to) {
                return Err(TableError::UndefinedState { from, to });
            }
            states[usize::from(from)].edges.push((set, to));
        }

        Ok(LexicalTables {
            states,
            start: self.start,
            keywords: self.keywords,
            ignore: self.ignore,
            comments: self.comments,
            eof_kind: self.eof_kind,
            ident_kind: self.ident_kind,
            no_sym: self.no_sym,
            max_t: self.max_t,
        })
    }
}
