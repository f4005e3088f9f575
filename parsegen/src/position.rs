use ebnf::CharClass;

/// Keep track of a position within a str, updating on successful operations.
#[derive(Debug, Clone)]
pub struct Position<'a> {
    pub input: &'a str,
    pub idx: usize,
}

impl<'a> Position<'a> {
    /// Create a new cursor at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Position { input, idx: 0 }
    }

    /// Create a cursor at `idx`, which must be in bounds and on a char
    /// boundary.
    #[cfg(test)]
    pub fn at(input: &'a str, idx: usize) -> Option<Self> {
        if input.is_char_boundary(idx) {
            Some(Position { input, idx })
        } else {
            None
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.idx == self.input.len()
    }

    pub fn remaining(&self) -> &'a str {
        &self.input[self.idx..]
    }

    /// Check if a string matches the current input starting at the current
    /// index. The index will be updated on match.
    pub fn match_str(&mut self, s: &str) -> bool {
        if self.remaining().starts_with(s) {
            self.idx += s.len();
            true
        } else {
            false
        }
    }

    pub fn is_at_line_start(&self) -> bool {
        self.idx == 0 || self.input.as_bytes()[self.idx - 1] == b'\n'
    }

    /// Consume one char if it belongs to `class`.
    pub fn match_class(&mut self, class: &CharClass) -> bool {
        match self.remaining().chars().next() {
            Some(c) if class.matches(c) => {
                self.idx += c.len_utf8();
                true
            }
            _ => false,
        }
    }
}
