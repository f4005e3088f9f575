//! The highlight grammar.
//!
//! Rules are declared once in [`RULES`] and assembled into an
//! [`ebnf::Grammar`] the first time a highlighter needs it. Bump
//! [`GRAMMAR_VERSION`] whenever a rule changes shape.

use ebnf::{Grammar, Production, Rhs};
use once_cell::sync::OnceCell;

use crate::GrammarError;

pub const GRAMMAR_VERSION: u32 = 3;

pub const ENTRY: &str = "entry";

/// Prefix of a line passed through untouched. Only recognised at the start
/// of a line.
pub const MANUAL_MARKER: &str = "!!!";

/// `(name, body)` for every rule. Alternatives in `entry` are tried in
/// order and the first to match at a position wins, so whitespace is taken
/// by `other` before `_` is tried.
pub const RULES: &[(&str, &str)] = &[
    (
        "entry",
        r##"( manual | string | comment | attribute | symbol | word | glyph | other | _ )+"##,
    ),
    ("manual", r##"^ , "!!!" , ~"."*"##),
    ("string", r##"[ ~"[A-Za-z]" ] , "\"" , ~"[^\"]"* , "\"""##),
    (
        "comment",
        r##"( "#" , ~"."* , ( "\n" | !~"[\s\S]" ) ) | ( "/*" , { !"*/" , ~"[\s\S]" } , "*/" )"##,
    ),
    ("attribute", r##""." , ~"[\w@$!=?\[\]]"+"##),
    ("symbol", r##"":" , ~"[\w@$!=?\[\]]"+"##),
    ("word", r##"~"\w"+ , ~"\s"*"##),
    ("glyph", r##"~"[^\s\"'\w]"+"##),
    ("other", r##"( !"#" , ~"\W" )+"##),
    ("_", r##"~"\s"+"##),
];

static GRAMMAR: OnceCell<Grammar> = OnceCell::new();

/// The assembled highlight grammar, built on first use.
pub fn grammar() -> Result<&'static Grammar, GrammarError> {
    GRAMMAR.get_or_try_init(|| {
        log::debug!("assembling highlight grammar v{}", GRAMMAR_VERSION);
        assemble(RULES, ENTRY)
    })
}

/// Parse each rule body and validate the result as a whole.
pub fn assemble(rules: &[(&str, &str)], entry: &str) -> Result<Grammar, GrammarError> {
    let productions = rules
        .iter()
        .map(|&(name, body)| {
            let rhs: Rhs = body.parse().map_err(|err: GrammarError| GrammarError::RuleSyntax {
                rule: name.to_owned(),
                message: err.to_string(),
            })?;
            Ok(Production {
                lhs: name.into(),
                rhs,
            })
        })
        .collect::<Result<Vec<_>, GrammarError>>()?;

    Grammar::new(productions, entry)
}
