/// A region over a string.
#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    s: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Span<'a> {
    pub(crate) fn new(s: &'a str, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= s.len(), "bad span {}..{}", start, end);
        Span { s, start, end }
    }

    /// The whole input this span was cut from.
    pub(crate) fn input(&self) -> &'a str {
        self.s
    }

    pub fn as_str(&self) -> &'a str {
        &self.s[self.start..self.end]
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains the entirety of the other span. Both spans
    /// should be referencing the same input.
    pub fn contains(&self, other: &Self) -> bool {
        std::ptr::eq(self.s, other.s) && self.start <= other.start && self.end >= other.end
    }
}

impl<'a> PartialEq for Span<'a> {
    fn eq(&self, other: &Span<'a>) -> bool {
        self.as_str() == other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_contains() {
        let input = "hello world";
        let hello = Span::new(input, 0, 5);
        let world = Span::new(input, 5, 11);
        let all = Span::new(input, 0, 11);

        assert_eq!(hello.as_str(), "hello");
        assert_eq!(world.as_str(), " world");
        assert!(all.contains(&hello));
        assert!(all.contains(&world));
        assert!(!hello.contains(&world));
        assert!(!hello.contains(&all));
    }

    #[test]
    fn span_contains_other_input() {
        let a = String::from("hello");
        let b = String::from("hello");
        assert!(!Span::new(&a, 0, 5).contains(&Span::new(&b, 0, 5)));
    }
}
