use ebnf::CharClass;

use crate::node::Node;
use crate::position::Position;
use crate::span::Span;

/// `Ok` carries the advanced state, `Err` hands back the state as it was
/// before the failed operation.
pub type StateResult<T> = Result<T, T>;

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    idx: usize,
    nodes: usize,
}

/// Parser state.
#[derive(Debug)]
pub struct State<'a> {
    /// Nodes matched so far that have not yet been claimed by an enclosing
    /// rule.
    nodes: Vec<Node<'a>>,
    cursor: Position<'a>,
    furthest: usize,
}

impl<'a> State<'a> {
    pub fn new(input: &'a str) -> Self {
        State {
            nodes: Vec::new(),
            cursor: Position::new(input),
            furthest: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.idx
    }

    /// The furthest offset any match has advanced to, including matches that
    /// were later backtracked.
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Returns the top level nodes that have been matched.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsegen::{State, StateResult};
    ///
    /// fn a(state: State) -> StateResult<State> {
    ///     state.tokenize("a", |s| s.match_str("a"))
    /// }
    /// fn b(state: State) -> StateResult<State> {
    ///     state.tokenize("b", |s| s.match_str("b"))
    /// }
    /// fn ab(state: State) -> StateResult<State> {
    ///     state.tokenize("ab", |s| a(s).and_then(b))
    /// }
    /// fn ababa(state: State) -> StateResult<State> {
    ///     state.tokenize("ababa", |s| ab(s).and_then(ab).and_then(a))
    /// }
    ///
    /// let nodes = ababa(State::new("ababa")).unwrap().into_nodes();
    /// assert_eq!(nodes.len(), 1);
    /// let root = &nodes[0];
    /// assert_eq!(root.rule(), Some("ababa"));
    /// let children: Vec<_> = root.children().iter().map(|n| n.rule()).collect();
    /// assert_eq!(children, vec![Some("ab"), Some("ab"), Some("a")]);
    /// assert_eq!(root.children()[1].children()[1].as_str(), "b");
    /// ```
    pub fn into_nodes(self) -> Vec<Node<'a>> {
        self.nodes
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            idx: self.cursor.idx,
            nodes: self.nodes.len(),
        }
    }

    fn restore(mut self, checkpoint: Checkpoint) -> Self {
        self.cursor.idx = checkpoint.idx;
        self.nodes.truncate(checkpoint.nodes);
        self
    }

    fn advanced(mut self) -> Self {
        self.furthest = self.furthest.max(self.cursor.idx);
        self
    }

    /// Matches using the provided function, wrapping everything it matched in
    /// a single node for `rule`. Errors resulting from the function will
    /// result in an unmodified state.
    pub fn tokenize<F>(self, rule: &'a str, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        let checkpoint = self.checkpoint();

        match self.apply(f) {
            Ok(mut state) => {
                let children = state.nodes.split_off(checkpoint.nodes);
                let span = Span::new(state.cursor.input, checkpoint.idx, state.cursor.idx);
                log::trace!("matched {} at {}..{}", rule, span.start(), span.end());
                state.nodes.push(Node::named(rule, span, children));
                Ok(state)
            }
            Err(state) => Err(state),
        }
    }

    /// Apply a function to state. On failure the state is rewound to where
    /// it was before the call, so alternatives can be tried from the same
    /// spot.
    pub fn apply<F>(self, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        let checkpoint = self.checkpoint();
        f(self).map_err(|state| state.restore(checkpoint))
    }

    /// Repeatedly applies some func to state until the first error. Never
    /// fails. Matches already made are kept; a later failure elsewhere does
    /// not retry with fewer repetitions.
    pub fn repeat<F>(mut self, f: F) -> StateResult<Self>
    where
        F: Fn(Self) -> StateResult<Self>,
    {
        loop {
            let before = self.cursor.idx;
            match self.apply(&f) {
                Ok(state) => {
                    self = state;
                    // A match that consumed nothing would match forever.
                    if self.cursor.idx == before {
                        return Ok(self);
                    }
                }
                Err(state) => return Ok(state),
            }
        }
    }

    /// Like `repeat`, but the func must succeed at least once.
    pub fn repeat_one<F>(self, f: F) -> StateResult<Self>
    where
        F: Fn(Self) -> StateResult<Self>,
    {
        self.apply(&f).and_then(|state| state.repeat(&f))
    }

    /// Attempt to apply some func to state, returning Ok regardless of what the
    /// function returns.
    pub fn optional<F>(self, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        match self.apply(f) {
            Ok(state) => Ok(state),
            Err(state) => Ok(state),
        }
    }

    /// Negative lookahead. Succeeds iff the func fails. Never consumes input.
    pub fn not<F>(self, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        let checkpoint = self.checkpoint();
        let furthest = self.furthest;
        let mut state = match f(self) {
            Ok(state) => Err(state.restore(checkpoint)),
            Err(state) => Ok(state.restore(checkpoint)),
        };
        // Lookahead does not count as progress.
        match state {
            Ok(ref mut s) | Err(ref mut s) => s.furthest = furthest,
        }
        state
    }

    /// Attempt to match the given string on input. State is updated only if the
    /// string successfully matches.
    pub fn match_str(mut self, s: &str) -> StateResult<Self> {
        if self.cursor.match_str(s) {
            Ok(self.advanced())
        } else {
            Err(self)
        }
    }

    /// Succeeds without consuming input at the start of input or right after
    /// a newline.
    pub fn match_line_start(self) -> StateResult<Self> {
        if self.cursor.is_at_line_start() {
            Ok(self)
        } else {
            Err(self)
        }
    }

    /// Attempt to match a single char from `class`.
    pub fn match_class(mut self, class: &CharClass) -> StateResult<Self> {
        if self.cursor.match_class(class) {
            Ok(self.advanced())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(state: State) -> StateResult<State> {
        let class: CharClass = "\\d".parse().unwrap();
        state.tokenize("digit", |s| s.match_class(&class))
    }

    #[test]
    fn failed_sequence_rewinds() {
        let state = State::new("abd");
        let state = state
            .apply(|s| s.match_str("a").and_then(|s| s.match_str("bc")))
            .unwrap_err();
        assert_eq!(state.position(), 0);
        assert_eq!(state.furthest(), 1);

        let state = state.match_str("ab").unwrap();
        assert_eq!(state.position(), 2);
    }

    #[test]
    fn repeat_is_greedy() {
        let state = State::new("123x").repeat(digit).unwrap();
        assert_eq!(state.position(), 3);
        assert_eq!(state.into_nodes().len(), 3);
    }

    #[test]
    fn repeat_one_requires_a_match() {
        let state = State::new("x").repeat_one(digit).unwrap_err();
        assert_eq!(state.position(), 0);
        assert!(state.into_nodes().is_empty());
    }

    #[test]
    fn repeat_stops_on_empty_match() {
        let state = State::new("abc")
            .repeat(|s| s.optional(|s| s.match_str("z")))
            .unwrap();
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn not_never_consumes() {
        let state = State::new("#x");
        let state = state.not(|s| s.match_str("#")).unwrap_err();
        assert_eq!(state.position(), 0);
        assert_eq!(state.furthest(), 0);

        let state = state.not(|s| digit(s)).unwrap();
        assert_eq!(state.position(), 0);
        assert!(state.into_nodes().is_empty());
    }

    #[test]
    fn line_start() {
        let state = State::new("a\nb").match_line_start().unwrap();
        let state = state.match_str("a").unwrap().match_line_start().unwrap_err();
        let state = state.match_str("\n").unwrap().match_line_start().unwrap();
        assert_eq!(state.position(), 2);
    }

    #[test]
    fn failed_tokenize_drops_children() {
        let state = State::new("12a");
        let state = state
            .tokenize("number", |s| {
                s.repeat_one(digit).and_then(|s| s.match_str("!"))
            })
            .unwrap_err();
        assert_eq!(state.position(), 0);
        assert!(state.into_nodes().is_empty());
    }

    #[test]
    fn tokenize_nests_children() {
        let state = State::new("12")
            .tokenize("number", |s| s.repeat_one(digit))
            .unwrap();
        let nodes = state.into_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].rule(), Some("number"));
        assert_eq!(nodes[0].as_str(), "12");
        let digits: Vec<&str> = nodes[0].children().iter().map(|n| n.as_str()).collect();
        assert_eq!(digits, vec!["1", "2"]);
    }
}
