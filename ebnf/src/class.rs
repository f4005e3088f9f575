use std::fmt::{self, Display};
use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{anychar, char, none_of, one_of},
    combinator::{all_consuming, map, opt},
    multi::many1,
    sequence::{delimited, pair, preceded, separated_pair},
    IResult,
};

use crate::error::Error;
use crate::parser::unescape;

/// A single member of a bracketed character set.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ClassItem {
    Char(char),
    /// Inclusive on both ends.
    Range(char, char),
    Word,
    NotWord,
    Space,
    NotSpace,
    Digit,
    NotDigit,
}

impl ClassItem {
    fn matches(&self, c: char) -> bool {
        match *self {
            ClassItem::Char(m) => c == m,
            ClassItem::Range(lo, hi) => lo <= c && c <= hi,
            ClassItem::Word => is_word(c),
            ClassItem::NotWord => !is_word(c),
            ClassItem::Space => c.is_whitespace(),
            ClassItem::NotSpace => !c.is_whitespace(),
            ClassItem::Digit => c.is_ascii_digit(),
            ClassItem::NotDigit => !c.is_ascii_digit(),
        }
    }

    fn shorthand(&self) -> Option<&'static str> {
        match self {
            ClassItem::Word => Some("\\w"),
            ClassItem::NotWord => Some("\\W"),
            ClassItem::Space => Some("\\s"),
            ClassItem::NotSpace => Some("\\S"),
            ClassItem::Digit => Some("\\d"),
            ClassItem::NotDigit => Some("\\D"),
            _ => None,
        }
    }
}

/// Word characters are alphanumerics plus underscore.
pub fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Matches exactly one character of input.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum CharClass {
    /// Anything except a newline.
    Any,
    Set { negated: bool, items: Vec<ClassItem> },
}

impl CharClass {
    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Any => c != '\n',
            CharClass::Set { negated, items } => items.iter().any(|item| item.matches(c)) != *negated,
        }
    }
}

fn write_set_char(f: &mut fmt::Formatter, c: char) -> fmt::Result {
    match c {
        '\n' => write!(f, "\\n"),
        '\t' => write!(f, "\\t"),
        '\r' => write!(f, "\\r"),
        ']' | '[' | '\\' | '-' | '^' | '"' => write!(f, "\\{}", c),
        c => write!(f, "{}", c),
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (negated, items) = match self {
            CharClass::Any => return write!(f, "."),
            CharClass::Set { negated, items } => (*negated, items),
        };

        if let (false, [item]) = (negated, items.as_slice()) {
            if let Some(s) = item.shorthand() {
                return write!(f, "{}", s);
            }
        }

        write!(f, "[")?;
        if negated {
            write!(f, "^")?;
        }
        for item in items {
            match *item {
                ClassItem::Char(c) => write_set_char(f, c)?,
                ClassItem::Range(lo, hi) => {
                    write_set_char(f, lo)?;
                    write!(f, "-")?;
                    write_set_char(f, hi)?;
                }
                ref other => write!(f, "{}", other.shorthand().unwrap_or_default())?,
            }
        }
        write!(f, "]")
    }
}

impl FromStr for CharClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, class) = all_consuming(class)(s)?;
        Ok(class)
    }
}

fn shorthand(input: &str) -> IResult<&str, ClassItem> {
    preceded(
        char('\\'),
        map(one_of("wWsSdD"), |c| match c {
            'w' => ClassItem::Word,
            'W' => ClassItem::NotWord,
            's' => ClassItem::Space,
            'S' => ClassItem::NotSpace,
            'd' => ClassItem::Digit,
            _ => ClassItem::NotDigit,
        }),
    )(input)
}

fn set_char(input: &str) -> IResult<&str, char> {
    alt((
        preceded(char('\\'), map(none_of("wWsSdD"), unescape)),
        none_of("]\\"),
    ))(input)
}

fn set_item(input: &str) -> IResult<&str, ClassItem> {
    alt((
        map(separated_pair(set_char, char('-'), set_char), |(lo, hi)| {
            ClassItem::Range(lo, hi)
        }),
        shorthand,
        map(set_char, ClassItem::Char),
    ))(input)
}

pub fn class(input: &str) -> IResult<&str, CharClass> {
    alt((
        map(char('.'), |_| CharClass::Any),
        map(shorthand, |item| CharClass::Set {
            negated: false,
            items: vec![item],
        }),
        map(
            delimited(char('['), pair(opt(char('^')), many1(set_item)), char(']')),
            |(caret, items)| CharClass::Set {
                negated: caret.is_some(),
                items,
            },
        ),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_matching() {
        let tests = vec![
            (".", 'a', true),
            (".", '\n', false),
            ("\\w", '_', true),
            ("\\w", 'é', true),
            ("\\w", '(', false),
            ("\\d", '7', true),
            ("\\d", '²', false),
            ("\\D", '½', true),
            ("\\W", '(', true),
            ("\\s", '\t', true),
            ("\\S", ' ', false),
            ("[a-z]", 'q', true),
            ("[a-z]", 'Q', false),
            ("[^\"]", '"', false),
            ("[^\"]", '\n', true),
            ("[\\w@$!=?\\[\\]]", ']', true),
            ("[\\w@$!=?\\[\\]]", '.', false),
            ("[^\\s\"'\\w]", '(', true),
            ("[^\\s\"'\\w]", '\'', false),
            ("[a-]", '-', true),
        ];

        for (src, c, want) in tests {
            let class: CharClass = src.parse().unwrap();
            assert_eq!(class.matches(c), want, "class: {}, char: {:?}", src, c);
        }
    }

    #[test]
    fn invalid_classes() {
        for src in &["", "[]", "[abc", "ab", "\\q"] {
            assert!(src.parse::<CharClass>().is_err(), "expected error: {}", src);
        }
    }

    #[test]
    fn display_reparses() {
        for src in &[".", "\\W", "[^\\n]", "[A-Za-z]", "[\\w@$!=?\\[\\]]", "[^\"#]"] {
            let class: CharClass = src.parse().unwrap();
            let again: CharClass = class.to_string().parse().unwrap();
            assert_eq!(class, again, "source: {}", src);
        }
    }
}
