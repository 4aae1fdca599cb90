//! Character-class and literal search over a byte buffer.
//!
//! All searches are expressed in byte offsets. Delimiters are ASCII, so an
//! offset produced by a search over valid UTF-8 always lands on a character
//! boundary (or on the end of the buffer).
//!
//! # Past-the-end positions
//!
//! [`Scanner::seek_byte`] reports "not found" by returning a position one past
//! the end of the buffer (or one past the start, if the start was already
//! beyond it). Handlers rely on this to distinguish a truncated construct from
//! one that ended exactly at the last byte.

/// A set of ASCII bytes, usable in `const` context.
///
/// Sets with at most three members are searched with `memchr`/`memchr2`/
/// `memchr3`; larger sets fall back to a byte loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteSet {
    mask: u128,
    needles: [u8; 3],
    count: u8,
}

/// Whitespace recognised between markup header items.
pub const WHITESPACE: ByteSet = ByteSet::new(b" \r\n\t");

/// Attribute-name and attribute-value quote characters.
pub const QUOTES: ByteSet = ByteSet::new(b"\"'");

/// Line terminators. Both are recognised independently.
pub const LINE_BREAKS: ByteSet = ByteSet::new(b"\n\r");

impl ByteSet {
    /// Build a set from ASCII bytes.
    ///
    /// # Panics
    ///
    /// Panics (at compile time, when used in a `const`) if any byte is not
    /// ASCII.
    pub const fn new(bytes: &[u8]) -> Self {
        let mut mask = 0u128;
        let mut needles = [0u8; 3];
        let mut count = 0u8;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            assert!(b < 128, "ByteSet only holds ASCII bytes");
            if mask & (1u128 << b) == 0 {
                if (count as usize) < needles.len() {
                    needles[count as usize] = b;
                }
                mask |= 1u128 << b;
                count += 1;
            }
            i += 1;
        }
        Self {
            mask,
            needles,
            count,
        }
    }

    /// Returns `true` if `byte` is a member of the set.
    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        byte < 128 && self.mask & (1u128 << byte) != 0
    }

    /// Offset of the first member byte in `haystack`.
    #[inline]
    fn find_in(&self, haystack: &[u8]) -> Option<usize> {
        let [a, b, c] = self.needles;
        match self.count {
            0 => None,
            1 => memchr::memchr(a, haystack),
            2 => memchr::memchr2(a, b, haystack),
            3 => memchr::memchr3(a, b, c, haystack),
            _ => haystack.iter().position(|&byte| self.contains(byte)),
        }
    }
}

/// Offset-based view over the source buffer.
///
/// The scanner is [`Copy`] and holds no position of its own: every method
/// takes the offset to start from and returns the offset it stopped at.
#[derive(Clone, Copy, Debug)]
pub struct Scanner<'a> {
    buf: &'a [u8],
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Length of the buffer in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The underlying bytes.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.buf
    }

    /// Byte at `pos`, or `None` at and beyond the end of the buffer.
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.buf.get(pos).copied()
    }

    /// Returns `true` if `pos` is a member of `set`. `false` past the end.
    #[inline]
    pub fn is_at(&self, pos: usize, set: &ByteSet) -> bool {
        self.byte_at(pos).is_some_and(|b| set.contains(b))
    }

    /// Returns `true` if the buffer contains `literal` starting at `pos`.
    #[inline]
    pub fn starts_with_at(&self, pos: usize, literal: &[u8]) -> bool {
        self.buf
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(literal))
    }

    /// Advance from `from` to the first byte that is a member of `stop`.
    ///
    /// If the buffer ends first, returns `max(from, len) + 1`: one past the
    /// end, the "not found, truncated" signal.
    pub fn seek_byte(&self, from: usize, stop: &ByteSet) -> usize {
        let len = self.buf.len();
        if from >= len {
            return from + 1;
        }
        match stop.find_in(&self.buf[from..]) {
            Some(offset) => from + offset,
            None => len + 1,
        }
    }

    /// Advance from `from` while the byte is a member of `skip`.
    ///
    /// The end of the buffer is never a member of any set, so this stops at
    /// `len` at the latest (or at `from` if that is already past the end).
    pub fn skip_bytes(&self, from: usize, skip: &ByteSet) -> usize {
        let mut pos = from;
        while self.is_at(pos, skip) {
            pos += 1;
        }
        pos
    }

    /// Offset of the next occurrence of `literal` at or after `from`, or
    /// `len` if there is none.
    pub fn seek_literal(&self, from: usize, literal: &[u8]) -> usize {
        let len = self.buf.len();
        if from >= len {
            return len;
        }
        memchr::memmem::find(&self.buf[from..], literal).map_or(len, |offset| from + offset)
    }
}

#[cfg(test)]
mod tests;
