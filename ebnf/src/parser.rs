use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, anychar, char, multispace0, none_of, one_of},
    combinator::{map, map_res, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    IResult,
};

use crate::{CharClass, Identifier, Lhs, Production, Rhs, Terminal};

/// Maps the character following a backslash to the character it stands for.
pub fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        c => c,
    }
}

fn token<'a>(t: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(multispace0, tag(t))
}

fn escaped_char(input: &str) -> IResult<&str, char> {
    preceded(char('\\'), map(anychar, unescape))(input)
}

pub fn terminal(input: &str) -> IResult<&str, Terminal> {
    let (rem, chars) = alt((
        delimited(
            char('"'),
            many0(alt((escaped_char, none_of("\\\"")))),
            char('"'),
        ),
        delimited(
            char('\''),
            many0(alt((escaped_char, none_of("\\'")))),
            char('\''),
        ),
    ))(input)?;
    Ok((rem, Terminal(chars.into_iter().collect())))
}

pub fn identifier(input: &str) -> IResult<&str, Identifier> {
    let (rem, matched) = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)?;
    Ok((rem, Identifier(matched.to_owned())))
}

pub fn lhs(input: &str) -> IResult<&str, Lhs> {
    let (rem, matched) = identifier(input)?;
    Ok((rem, Lhs(matched)))
}

/// Parses an alternation, the loosest binding form.
pub fn rhs(input: &str) -> IResult<&str, Rhs> {
    let (rem, mut alternatives) = separated_list1(token("|"), concatenation)(input)?;
    if alternatives.len() == 1 {
        Ok((rem, alternatives.remove(0)))
    } else {
        Ok((rem, Rhs::Alternation(alternatives)))
    }
}

pub fn production(input: &str) -> IResult<&str, Production> {
    let (rem, (rule_lhs, rule_rhs)) = terminated(
        separated_pair(preceded(multispace0, lhs), token("="), rhs),
        token(";"),
    )(input)?;
    Ok((
        rem,
        Production {
            lhs: rule_lhs,
            rhs: rule_rhs,
        },
    ))
}

pub fn grammar(input: &str) -> IResult<&str, Vec<Production>> {
    terminated(many0(production), multispace0)(input)
}

fn concatenation(input: &str) -> IResult<&str, Rhs> {
    let (rem, mut items) = separated_list1(token(","), unary)(input)?;
    if items.len() == 1 {
        Ok((rem, items.remove(0)))
    } else {
        Ok((rem, Rhs::Concatenation(items)))
    }
}

fn unary(input: &str) -> IResult<&str, Rhs> {
    let (input, _) = multispace0(input)?;
    alt((
        map(preceded(char('!'), unary), |inner| Rhs::Not(Box::new(inner))),
        postfix,
    ))(input)
}

fn postfix(input: &str) -> IResult<&str, Rhs> {
    let (rem, inner) = primary(input)?;
    let (rem, op) = opt(preceded(multispace0, one_of("*+?")))(rem)?;
    let out = match op {
        Some('*') => Rhs::Repeat(Box::new(inner)),
        Some('+') => Rhs::RepeatOne(Box::new(inner)),
        Some(_) => Rhs::Optional(Box::new(inner)),
        None => inner,
    };
    Ok((rem, out))
}

fn primary(input: &str) -> IResult<&str, Rhs> {
    alt((
        rhs_group,
        rhs_optional,
        rhs_repetition,
        rhs_class,
        rhs_line_start,
        rhs_terminal,
        rhs_identifier,
    ))(input)
}

fn rhs_identifier(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = identifier(input)?;
    Ok((rem, Rhs::Identifier(matched)))
}

fn rhs_terminal(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = terminal(input)?;
    Ok((rem, Rhs::Terminal(matched)))
}

fn rhs_class(input: &str) -> IResult<&str, Rhs> {
    let raw = recognize(many0(alt((
        recognize(pair(char('\\'), anychar)),
        recognize(none_of("\\\"")),
    ))));
    let (rem, matched) = map_res(
        delimited(tag("~\""), raw, char('"')),
        |raw: &str| raw.parse::<CharClass>(),
    )(input)?;
    Ok((rem, Rhs::Class(matched)))
}

fn rhs_line_start(input: &str) -> IResult<&str, Rhs> {
    map(char('^'), |_| Rhs::LineStart)(input)
}

fn rhs_group(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = delimited(char('('), rhs, token(")"))(input)?;
    Ok((rem, Rhs::Group(Box::new(matched))))
}

fn rhs_repetition(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = delimited(char('{'), rhs, token("}"))(input)?;
    Ok((rem, Rhs::Repeat(Box::new(matched))))
}

fn rhs_optional(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = delimited(char('['), rhs, token("]"))(input)?;
    Ok((rem, Rhs::Optional(Box::new(matched))))
}
