//! Byte cursor over a type string.
//!
//! Type syntax is ASCII; any other byte simply fails to match a token.

/// Cursor over the bytes of a type string. `Copy`, so the parser can
/// snapshot and restore it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// Byte at the current position, or `0x00` at EOF.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Current byte offset.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Advance while `pred` holds. `pred(0)` must be `false`.
    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Consume `byte` if it is next.
    #[inline]
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.current() == byte {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// Source text from `start` to the current position.
    ///
    /// Only called with spans of ASCII bytes, which are char boundaries.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.src.get(start..self.pos).unwrap_or("")
    }

    /// Everything not yet consumed.
    pub(crate) fn rest(&self) -> &'a str {
        self.src.get(self.pos..).unwrap_or("")
    }
}
