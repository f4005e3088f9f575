//! A backtracking matcher that runs an [`ebnf::Grammar`] directly against
//! text and builds a parse tree.

use std::error;
use std::fmt::{self, Display};

use ebnf::{Grammar, Rhs};

mod node;
mod position;
mod span;
mod state;

pub use node::{Leaves, Node};
pub use span::Span;
pub use state::{State, StateResult};

/// Parsing stopped before the whole input was matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    input: String,
    offset: usize,
}

impl ParseError {
    /// `offset` is clamped to the input and moved back to a char boundary.
    pub(crate) fn new(input: &str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        ParseError {
            input: input.to_owned(),
            offset,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Furthest byte offset the parser reached.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line and column (in chars) of `offset`.
    pub fn line_col(&self) -> (usize, usize) {
        let before = &self.input[..self.offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        let col = before[line_start..].chars().count() + 1;
        (line, col)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (line, col) = self.line_col();
        let rest: String = self.input[self.offset..].chars().take(20).collect();
        write!(
            f,
            "failed to parse at line {}, column {} (offset {}), remaining: {:?}",
            line, col, self.offset, rest
        )
    }
}

impl error::Error for ParseError {}

struct Interpreter<'a> {
    grammar: &'a Grammar,
}

impl<'a> Interpreter<'a> {
    fn rule(&self, name: &str, state: State<'a>) -> StateResult<State<'a>> {
        let grammar: &'a Grammar = self.grammar;
        match grammar.get(name) {
            Some(production) => {
                state.tokenize(production.name(), |state| self.eval(&production.rhs, state))
            }
            None => Err(state),
        }
    }

    fn eval(&self, rhs: &'a Rhs, state: State<'a>) -> StateResult<State<'a>> {
        match rhs {
            Rhs::Identifier(id) => self.rule(id.as_str(), state),
            Rhs::Terminal(term) => state.match_str(term.as_str()),
            Rhs::Class(class) => state.match_class(class),
            Rhs::LineStart => state.match_line_start(),
            Rhs::Optional(inner) => state.optional(|state| self.eval(inner, state)),
            Rhs::Repeat(inner) => state.repeat(|state| self.eval(inner, state)),
            Rhs::RepeatOne(inner) => state.repeat_one(|state| self.eval(inner, state)),
            Rhs::Not(inner) => state.not(|state| self.eval(inner, state)),
            Rhs::Group(inner) => state.apply(|state| self.eval(inner, state)),
            Rhs::Alternation(items) => {
                let mut state = state;
                for item in items {
                    match state.apply(|state| self.eval(item, state)) {
                        Ok(state) => return Ok(state),
                        Err(rewound) => state = rewound,
                    }
                }
                Err(state)
            }
            Rhs::Concatenation(items) => state.apply(|mut state| {
                for item in items {
                    state = self.eval(item, state)?;
                }
                Ok(state)
            }),
        }
    }
}

/// Parse all of `input` starting from the grammar's entry rule.
pub fn parse<'a>(grammar: &'a Grammar, input: &'a str) -> Result<Node<'a>, ParseError> {
    parse_rule(grammar, grammar.entry().as_str(), input)
}

/// Parse all of `input` starting from `rule`. A rule the grammar does not
/// declare matches nothing.
pub fn parse_rule<'a>(
    grammar: &'a Grammar,
    rule: &str,
    input: &'a str,
) -> Result<Node<'a>, ParseError> {
    let interpreter = Interpreter { grammar };
    let offset = match interpreter.rule(rule, State::new(input)) {
        Ok(state) if state.is_at_end() => {
            if let Some(root) = state.into_nodes().pop() {
                return Ok(root);
            }
            0
        }
        Ok(state) => state.furthest().max(state.position()),
        Err(state) => state.furthest(),
    };

    let err = ParseError::new(input, offset);
    log::debug!("rule '{}': {}", rule, err);
    Err(err)
}
