use crate::span::Span;

/// A node in the parse tree.
///
/// Named nodes come from grammar rules. Anonymous nodes cover text a rule
/// matched directly between its named children, so the children of any node
/// always concatenate to exactly that node's text.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    rule: Option<&'a str>,
    span: Span<'a>,
    children: Vec<Node<'a>>,
}

impl<'a> Node<'a> {
    pub(crate) fn named(rule: &'a str, span: Span<'a>, children: Vec<Node<'a>>) -> Self {
        let children = fill_gaps(span, children);
        Node {
            rule: Some(rule),
            span,
            children,
        }
    }

    fn anonymous(span: Span<'a>) -> Self {
        Node {
            rule: None,
            span,
            children: Vec::new(),
        }
    }

    /// The rule that produced this node, `None` for anonymous text.
    pub fn rule(&self) -> Option<&'a str> {
        self.rule
    }

    pub fn span(&self) -> Span<'a> {
        self.span
    }

    pub fn as_str(&self) -> &'a str {
        self.span.as_str()
    }

    pub fn children(&self) -> &[Node<'a>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf nodes in left-to-right order.
    pub fn leaves(&self) -> Leaves<'_, 'a> {
        Leaves { stack: vec![self] }
    }
}

fn fill_gaps<'a>(span: Span<'a>, children: Vec<Node<'a>>) -> Vec<Node<'a>> {
    if children.is_empty() {
        return children;
    }

    let input = span.input();
    let mut filled = Vec::with_capacity(children.len() * 2 + 1);
    let mut at = span.start();
    for child in children {
        debug_assert!(span.contains(&child.span));
        if child.span.start() > at {
            filled.push(Node::anonymous(Span::new(input, at, child.span.start())));
        }
        at = child.span.end();
        filled.push(child);
    }
    if at < span.end() {
        filled.push(Node::anonymous(Span::new(input, at, span.end())));
    }
    filled
}

/// Depth-first iterator over the leaves of a tree.
pub struct Leaves<'n, 'a> {
    stack: Vec<&'n Node<'a>>,
}

impl<'n, 'a> Iterator for Leaves<'n, 'a> {
    type Item = &'n Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.children.is_empty() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}
