//! Grammar-driven highlighting for short inline code snippets.
//!
//! A snippet is parsed against a small EBNF grammar (see [`grammar`]) and
//! every token in the resulting tree is rendered with lightweight HTML
//! markup. Keywords become bold, strings and symbols emphasised, comments
//! italic. Anything else passes through unchanged.
//!
//! ```
//! let hi = hi::configure("python2").unwrap();
//! assert_eq!(hi.render("print(hai)").unwrap(), "<b>print</b>(hai)");
//! ```

pub mod config;
pub mod grammar;
pub mod keywords;
pub mod markup;

mod error;
mod highlighter;
mod render;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use highlighter::Highlighter;
pub use keywords::{KeywordRegistry, KeywordSet};
pub use markup::Markup;
pub use render::TokenKind;

pub use ebnf::Error as GrammarError;
pub use parsegen::{Node, ParseError};

/// Language used when none is given.
pub const DEFAULT_LANGUAGE: &str = "python2";

/// Build a highlighter for one of the builtin languages.
pub fn configure(language: &str) -> Result<Highlighter, Error> {
    KeywordRegistry::shared().configure(language)
}
