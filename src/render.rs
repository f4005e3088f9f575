//! Turns a parse tree into marked-up text.

use parsegen::Node;

use crate::grammar::MANUAL_MARKER;
use crate::keywords::KeywordSet;
use crate::markup::{wrap, Markup};

/// The rules that have a dedicated renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Entry,
    Manual,
    String,
    Comment,
    Attribute,
    Symbol,
    Word,
    Glyph,
    Other,
    Whitespace,
}

impl TokenKind {
    pub fn from_rule(rule: &str) -> Option<Self> {
        let kind = match rule {
            "entry" => TokenKind::Entry,
            "manual" => TokenKind::Manual,
            "string" => TokenKind::String,
            "comment" => TokenKind::Comment,
            "attribute" => TokenKind::Attribute,
            "symbol" => TokenKind::Symbol,
            "word" => TokenKind::Word,
            "glyph" => TokenKind::Glyph,
            "other" => TokenKind::Other,
            "_" => TokenKind::Whitespace,
            _ => return None,
        };
        Some(kind)
    }

    pub fn rule(self) -> &'static str {
        match self {
            TokenKind::Entry => "entry",
            TokenKind::Manual => "manual",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Attribute => "attribute",
            TokenKind::Symbol => "symbol",
            TokenKind::Word => "word",
            TokenKind::Glyph => "glyph",
            TokenKind::Other => "other",
            TokenKind::Whitespace => "_",
        }
    }
}

pub(crate) struct Renderer<'h> {
    pub keywords: &'h KeywordSet,
    pub markup: &'h Markup,
}

impl<'h> Renderer<'h> {
    /// Renders children first, then hands the node to the renderer for its
    /// rule. Rules without one concatenate their rendered children; childless
    /// nodes of that sort render as their own text.
    pub fn render(&self, node: &Node) -> String {
        let children: Vec<String> = node.children().iter().map(|child| self.render(child)).collect();
        let text = node.as_str();

        match node.rule().and_then(TokenKind::from_rule) {
            Some(TokenKind::Entry) => children.concat(),
            Some(TokenKind::Manual) => text.strip_prefix(MANUAL_MARKER).unwrap_or(text).to_owned(),
            Some(TokenKind::String) => self.string(text),
            Some(TokenKind::Comment) => wrap(&self.markup.comment, text),
            Some(TokenKind::Symbol) => wrap(&self.markup.emphasis, text),
            Some(TokenKind::Word) => self.word(text),
            Some(TokenKind::Attribute)
            | Some(TokenKind::Glyph)
            | Some(TokenKind::Other)
            | Some(TokenKind::Whitespace) => text.to_owned(),
            None if node.is_leaf() => text.to_owned(),
            None => children.concat(),
        }
    }

    fn string(&self, text: &str) -> String {
        let bold = &self.markup.bold;
        let inner = text
            .replace("%d", &wrap(bold, "%d"))
            .replace("%s", &wrap(bold, "%s"));
        wrap(&self.markup.emphasis, &inner)
    }

    /// Capitalised words are type names and never bold. Otherwise the word is
    /// looked up without its trailing whitespace, but the whitespace stays
    /// inside the markup.
    fn word(&self, text: &str) -> String {
        if text.chars().next().map_or(false, char::is_uppercase) {
            return text.to_owned();
        }

        if self.keywords.contains(text.trim_end()) {
            wrap(&self.markup.bold, text)
        } else {
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::PYTHON2;

    fn with_renderer<F: FnOnce(&Renderer)>(f: F) {
        let keywords = KeywordSet::new(PYTHON2);
        let markup = Markup::default();
        f(&Renderer {
            keywords: &keywords,
            markup: &markup,
        })
    }

    #[test]
    fn rule_names_round_trip() {
        let kinds = [
            TokenKind::Entry,
            TokenKind::Manual,
            TokenKind::String,
            TokenKind::Comment,
            TokenKind::Attribute,
            TokenKind::Symbol,
            TokenKind::Word,
            TokenKind::Glyph,
            TokenKind::Other,
            TokenKind::Whitespace,
        ];
        for kind in kinds.iter() {
            assert_eq!(TokenKind::from_rule(kind.rule()), Some(*kind));
        }
        assert_eq!(TokenKind::from_rule("placeholder"), None);
    }

    #[test]
    fn word_classification() {
        with_renderer(|r| {
            let tests = vec![
                ("for", "<b>for</b>"),
                ("for \n", "<b>for \n</b>"),
                ("fork", "fork"),
                ("Print", "Print"),
                ("If", "If"),
                ("_if", "_if"),
                ("hai ", "hai "),
            ];
            for (input, want) in tests {
                assert_eq!(r.word(input), want, "input: {:?}", input);
            }
        });
    }

    #[test]
    fn string_placeholders() {
        with_renderer(|r| {
            assert_eq!(r.string("\"hi\""), "<em>\"hi\"</em>");
            assert_eq!(
                r.string("\"%d of %s\""),
                "<em>\"<b>%d</b> of <b>%s</b>\"</em>"
            );
            assert_eq!(r.string("u\"%x\""), "<em>u\"%x\"</em>");
        });
    }
}
