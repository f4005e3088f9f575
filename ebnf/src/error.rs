use std::error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Notation could not be parsed.
    ParseError(String),
    /// A rule body failed to parse. Carries the rule name.
    RuleSyntax { rule: String, message: String },
    DuplicateRule(String),
    MissingEntry(String),
    UndefinedRule { rule: String, reference: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ParseError(ref s) => write!(f, "failed to parse: {}", s),
            Error::RuleSyntax {
                ref rule,
                ref message,
            } => write!(f, "failed to parse body of rule '{}': {}", rule, message),
            Error::DuplicateRule(ref name) => write!(f, "rule '{}' declared more than once", name),
            Error::MissingEntry(ref name) => write!(f, "entry rule '{}' is not declared", name),
            Error::UndefinedRule {
                ref rule,
                ref reference,
            } => write!(
                f,
                "rule '{}' references undeclared rule '{}'",
                rule, reference
            ),
        }
    }
}

impl error::Error for Error {}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Error {
        Error::ParseError(format!("{:?}", err))
    }
}
