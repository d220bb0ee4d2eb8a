use std::iter::FusedIterator;

use crate::Pos;

/// A cursor over an input stream of characters.
/// It keeps track of the byte position in the stream and can push back
/// the last character read.
#[derive(Debug, Clone)]
pub struct Cursor<I> {
    // input iterator
    input: I,
    // current byte position in the stream
    pos: Pos,
    // last character returned by next
    last: Option<char>,
    // character pushed back by unadvance
    pushed: Option<char>,
}

impl<I> Cursor<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            pos: 0,
            last: None,
            pushed: None,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Push back the last character read.
    ///
    /// # Panics
    /// If nothing was read since the last push back
    pub fn unadvance(&mut self) {
        let Some(c) = self.last.take() else {
            panic!("Unadvancing without a character to push back");
        };
        self.pos -= c.len_utf8();
        self.pushed = Some(c);
    }
}

impl<I> Cursor<I>
where
    I: Iterator<Item = char> + Clone,
{
    pub fn first(&self) -> Option<char> {
        self.pushed.or_else(|| self.input.clone().next())
    }

    pub fn has_chars(&self) -> bool {
        self.first().is_some()
    }
}

impl<I> Iterator for Cursor<I>
where
    I: Iterator<Item = char>,
{
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.pushed.take().or_else(|| self.input.next());
        if let Some(c) = next {
            self.pos += c.len_utf8();
        }
        self.last = next;
        next
    }
}

impl<I> FusedIterator for Cursor<I> where I: FusedIterator<Item = char> {}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn test_input_cursor() {
        let mut c = Cursor::new("\\frac{α}{2}".chars());
        assert_eq!(c.pos(), 0);
        assert_eq!(c.next(), Some('\\'));
        let cmd: String = c.by_ref().take(4).collect();
        assert_eq!(cmd, "frac");
        assert_eq!(c.pos(), 5);
        assert_eq!(c.next(), Some('{'));
        assert_eq!(c.next(), Some('α'));
        assert_eq!(c.pos(), 8);

        c.unadvance();
        assert_eq!(c.pos(), 6);
        assert_eq!(c.first(), Some('α'));
        assert_eq!(c.next(), Some('α'));
        assert_eq!(c.pos(), 8);

        let rest: String = c.by_ref().collect();
        assert_eq!(rest, "}{2}");
        assert_eq!(c.pos(), 12);
        assert!(!c.has_chars());
        assert_eq!(c.next(), None);
    }

    #[test]
    #[should_panic(expected = "Unadvancing")]
    fn unadvance_twice_panics() {
        let mut c = Cursor::new("ab".chars());
        c.next();
        c.unadvance();
        c.unadvance();
    }
}
