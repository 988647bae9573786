//! Cursor over a sentinel-terminated source buffer.
//!
//! The cursor is the interpreter's program counter. It advances byte by
//! byte, can be repositioned to any saved offset (loop re-entry), and can
//! skip forward over a bracketed region without interpreting it.
//!
//! End of input is the sentinel `0x00` that follows every segment. Because
//! the buffer is zero-padded past the last sentinel, reads at or beyond the
//! end always yield `0x00`.

/// Copyable read position over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor_at()`](crate::SourceBuffer::cursor_at).
/// The cursor is [`Copy`], so saving a position is just copying it.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated, zero-padded buffer.
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a cursor at `pos`.
    ///
    /// # Contract
    ///
    /// `buf` ends with at least one `0x00` byte after every segment.
    /// Guaranteed by `SourceBuffer::append()`.
    pub(crate) fn new(buf: &'a [u8], pos: u32) -> Self {
        debug_assert!(
            buf.last() == Some(&0),
            "buffer must end in zero padding"
        );
        Self { buf, pos }
    }

    /// Returns the byte at the current position, `0x00` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    /// Consume and return the current byte.
    ///
    /// Does not move past the end of input: at the sentinel it returns
    /// `0x00` and stays put.
    #[inline]
    pub fn bump(&mut self) -> u8 {
        let b = self.current();
        if b != 0 {
            self.pos += 1;
        }
        b
    }

    /// Returns `true` if the cursor sits on a sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0
    }

    /// Current byte offset in the buffer.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Move the cursor to an absolute offset.
    #[inline]
    pub fn set_pos(&mut self, pos: u32) {
        self.pos = pos;
    }

    /// Bytes from `start` up to the current position.
    pub fn slice_from(&self, start: u32) -> &'a [u8] {
        debug_assert!(start <= self.pos, "slice start {start} exceeds {}", self.pos);
        &self.buf[start as usize..self.pos as usize]
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, so the sentinel stops the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Number of bytes from the current position for which `pred` holds.
    ///
    /// Does not move the cursor.
    pub fn count_while(&self, pred: impl Fn(u8) -> bool) -> u32 {
        let mut probe = *self;
        probe.eat_while(pred);
        probe.pos - self.pos
    }

    /// Skip forward past the `close` byte that balances an already consumed
    /// opener.
    ///
    /// Starts at nesting depth 1. Each `open` byte seen raises the depth,
    /// each `close` lowers it; the cursor stops just after the `close` that
    /// brings the depth to zero. With `open == None` the first `close`
    /// ends the skip (one-sided matching).
    ///
    /// If the sentinel is reached first, the cursor stops on it.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within the buffer fit in u32"
    )]
    pub fn skip_balanced(&mut self, open: Option<u8>, close: u8) {
        let mut depth = 1u32;
        loop {
            let start = (self.pos as usize).min(self.buf.len());
            let remaining = &self.buf[start..];
            let hit = match open {
                Some(open) => memchr::memchr3(open, close, 0, remaining),
                None => memchr::memchr2(close, 0, remaining),
            };
            let Some(offset) = hit else {
                self.pos = self.buf.len() as u32;
                return;
            };
            self.pos = (start + offset) as u32;

            let b = self.current();
            if b == 0 {
                return;
            }
            self.pos += 1;
            if open == Some(b) {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
