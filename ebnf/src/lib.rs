//! EBNF-style notation for describing grammars.
//!
//! Besides the classic `,` `|` `[ ]` `{ }` `( )` forms, rule bodies may use
//! character classes (`~"\w"`), postfix repetition (`*`, `+`, `?`),
//! negative lookahead (`!`) and a line start anchor (`^`).

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use nom::combinator::all_consuming;
use nom::sequence::delimited;
use nom::character::complete::multispace0;

mod class;
mod error;
mod parser;

pub use class::{is_word, CharClass, ClassItem};
pub use error::Error;

/// A constant identifying production rules.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A literal string.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Terminal(pub String);

impl Terminal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.0.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                '\r' => write!(f, "\\r")?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "\"")
    }
}

impl From<&str> for Terminal {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The lhs of a production rule.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Lhs(pub Identifier);

impl Lhs {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Lhs {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl Display for Lhs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The rhs of a production rule.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Rhs {
    Identifier(Identifier),
    Terminal(Terminal),
    Class(CharClass),
    /// Matches nothing, only at the start of input or after a newline.
    LineStart,
    /// Zero or one.
    Optional(Box<Rhs>),
    /// Zero or more.
    Repeat(Box<Rhs>),
    /// One or more.
    RepeatOne(Box<Rhs>),
    /// Succeeds without consuming input iff the inner rhs fails.
    Not(Box<Rhs>),
    Group(Box<Rhs>),
    /// Ordered, first success wins.
    Alternation(Vec<Rhs>),
    Concatenation(Vec<Rhs>),
}

impl Rhs {
    /// Calls `f` with every rule reference in this rhs, in source order.
    pub fn visit_identifiers<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Identifier),
    {
        match self {
            Rhs::Identifier(id) => f(id),
            Rhs::Terminal(_) | Rhs::Class(_) | Rhs::LineStart => (),
            Rhs::Optional(rhs)
            | Rhs::Repeat(rhs)
            | Rhs::RepeatOne(rhs)
            | Rhs::Not(rhs)
            | Rhs::Group(rhs) => rhs.visit_identifiers(f),
            Rhs::Alternation(items) | Rhs::Concatenation(items) => {
                for item in items {
                    item.visit_identifiers(f);
                }
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter, items: &[Rhs], sep: &str) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Rhs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rhs::Identifier(iden) => write!(f, "{}", iden),
            Rhs::Terminal(term) => write!(f, "{}", term),
            Rhs::Class(class) => write!(f, "~\"{}\"", class),
            Rhs::LineStart => write!(f, "^"),
            Rhs::Optional(rhs) => write!(f, "[ {} ]", rhs),
            Rhs::Repeat(rhs) => write!(f, "{{ {} }}", rhs),
            Rhs::RepeatOne(rhs) => write!(f, "{}+", rhs),
            Rhs::Not(rhs) => write!(f, "!{}", rhs),
            Rhs::Group(rhs) => write!(f, "( {} )", rhs),
            Rhs::Alternation(items) => write_joined(f, items, "|"),
            Rhs::Concatenation(items) => write_joined(f, items, ","),
        }
    }
}

impl FromStr for Rhs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, rhs) = all_consuming(delimited(multispace0, parser::rhs, multispace0))(s)?;
        Ok(rhs)
    }
}

/// A production rule.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Production {
    pub lhs: Lhs,
    pub rhs: Rhs,
}

impl Production {
    pub fn name(&self) -> &str {
        self.lhs.as_str()
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {} ;", self.lhs, self.rhs)
    }
}

impl FromStr for Production {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, rule) = all_consuming(delimited(multispace0, parser::production, multispace0))(s)?;
        Ok(rule)
    }
}

/// A validated set of rules with a designated entry rule.
///
/// Every name is declared once, the entry exists, and every reference in a
/// rule body resolves.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Grammar {
    rules: Vec<Production>,
    entry: Identifier,
    index: HashMap<String, usize>,
}

impl Grammar {
    pub fn new(rules: Vec<Production>, entry: &str) -> Result<Self, Error> {
        let mut index = HashMap::with_capacity(rules.len());
        for (idx, rule) in rules.iter().enumerate() {
            if index.insert(rule.name().to_owned(), idx).is_some() {
                return Err(Error::DuplicateRule(rule.name().to_owned()));
            }
        }

        if !index.contains_key(entry) {
            return Err(Error::MissingEntry(entry.to_owned()));
        }

        for rule in &rules {
            let mut undefined = None;
            rule.rhs.visit_identifiers(&mut |id| {
                if undefined.is_none() && !index.contains_key(id.as_str()) {
                    undefined = Some(id.to_string());
                }
            });
            if let Some(reference) = undefined {
                return Err(Error::UndefinedRule {
                    rule: rule.name().to_owned(),
                    reference,
                });
            }
        }

        log::debug!("assembled grammar with {} rules, entry '{}'", rules.len(), entry);

        Ok(Grammar {
            rules,
            entry: entry.into(),
            index,
        })
    }

    pub fn rules(&self) -> &[Production] {
        &self.rules
    }

    pub fn entry(&self) -> &Identifier {
        &self.entry
    }

    pub fn get(&self, name: &str) -> Option<&Production> {
        self.index.get(name).map(|&idx| &self.rules[idx])
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Parses a list of productions. The first production is the entry rule.
impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, rules) = all_consuming(parser::grammar)(s)?;
        let entry = match rules.first() {
            Some(rule) => rule.name().to_owned(),
            None => return Err(Error::ParseError("grammar declares no rules".to_owned())),
        };
        Grammar::new(rules, &entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;
    use std::string::ToString;

    fn assert_lossless_conversion<T, E>(t: T)
    where
        T: ToString + FromStr<Err = E> + Eq + Debug,
        E: std::error::Error,
    {
        let s = t.to_string();
        let t_parse = T::from_str(&s).unwrap();
        assert_eq!(t, t_parse, "To string:\n{}\n", s);
    }

    #[test]
    fn lossless_rhs() {
        let tests: Vec<Rhs> = vec![
            "\"hello\" | world",
            "a | b , \"c\" | [ d ]",
            "( !\"#\" , ~\"\\W\" )+",
            "\"#\" , ~\".\"* , ( \"\\n\" | !~\"[\\s\\S]\" )",
            "[ ~\"[A-Za-z]\" ] , \"\\\"\" , { ~\"[^\\\"]\" } , \"\\\"\"",
            "^ , \"!!!\" , ~\".\"*",
        ]
        .into_iter()
        .map(|s| s.parse().unwrap())
        .collect();

        for test in tests {
            assert_lossless_conversion(test);
        }
    }

    #[test]
    fn lossless_rule() {
        let rule = Production {
            lhs: Lhs("a".into()),
            rhs: Rhs::Identifier("b".into()),
        };

        assert_lossless_conversion(rule)
    }

    #[test]
    fn lossless_grammar() {
        let g: Grammar = "a = b+ ; b = \"x\" | c ; c = ~\"\\d\" ;".parse().unwrap();
        assert_eq!(g.entry().as_str(), "a");
        assert_lossless_conversion(g);
    }

    #[test]
    fn duplicate_rule() {
        let err = "a = b ; b = 'x' ; b = 'y' ;".parse::<Grammar>().unwrap_err();
        assert_eq!(err, Error::DuplicateRule("b".to_owned()));
    }

    #[test]
    fn undefined_rule() {
        let err = "a = b , c ; b = 'x' ;".parse::<Grammar>().unwrap_err();
        assert_eq!(
            err,
            Error::UndefinedRule {
                rule: "a".to_owned(),
                reference: "c".to_owned(),
            }
        );
    }

    #[test]
    fn missing_entry() {
        let rules = vec!["a = 'x' ;".parse::<Production>().unwrap()];
        let err = Grammar::new(rules, "top").unwrap_err();
        assert_eq!(err, Error::MissingEntry("top".to_owned()));
    }

    #[test]
    fn cyclic_references_allowed() {
        let g: Grammar = "a = '(' , [ b ] , ')' ; b = a+ ;".parse().unwrap();
        assert!(g.get("b").is_some());
        assert!(g.get("nope").is_none());
    }

    #[test]
    fn empty_grammar() {
        assert!("   ".parse::<Grammar>().is_err());
    }
}
