use ebnf::Grammar;
use parsegen::{Node, ParseError};

use crate::grammar;
use crate::keywords::KeywordSet;
use crate::markup::Markup;
use crate::render::Renderer;
use crate::GrammarError;

/// Highlights snippets for one language.
///
/// Holds no mutable state, so a single instance can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Highlighter {
    grammar: &'static Grammar,
    keywords: KeywordSet,
    markup: Markup,
}

impl Highlighter {
    pub fn new(keywords: KeywordSet) -> Result<Self, GrammarError> {
        Ok(Highlighter {
            grammar: grammar::grammar()?,
            keywords,
            markup: Markup::default(),
        })
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Parse `source` into a tree whose root is the entry rule.
    pub fn parse<'a>(&self, source: &'a str) -> Result<Node<'a>, ParseError> {
        parsegen::parse(self.grammar, source)
    }

    pub fn render_tree(&self, tree: &Node) -> String {
        Renderer {
            keywords: &self.keywords,
            markup: &self.markup,
        }
        .render(tree)
    }

    /// Parse and render `source`. Nothing is rendered if parsing fails.
    pub fn render(&self, source: &str) -> Result<String, ParseError> {
        let tree = self.parse(source)?;
        Ok(self.render_tree(&tree))
    }
}
