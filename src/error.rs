use std::error;
use std::fmt::{self, Display};

use crate::GrammarError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No keyword set is registered under this name.
    UnknownLanguage(String),
    Grammar(GrammarError),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnknownLanguage(ref name) => write!(f, "unknown language: {}", name),
            Error::Grammar(ref err) => write!(f, "invalid highlight grammar: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::UnknownLanguage(_) => None,
            Error::Grammar(ref err) => Some(err),
        }
    }
}

impl From<GrammarError> for Error {
    fn from(err: GrammarError) -> Error {
        Error::Grammar(err)
    }
}
