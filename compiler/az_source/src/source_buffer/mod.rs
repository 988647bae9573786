//! Append-only, sentinel-terminated source buffer.
//!
//! The buffer holds every piece of source the interpreter has ever been
//! given: a script file, or each line typed at the interactive prompt. Each
//! piece is a [`Segment`] followed by a `0x00` sentinel byte, and the whole
//! buffer is padded with zeros up to the next 64-byte boundary, so a
//! cursor that runs past the used region still reads `0x00`.
//!
//! # Layout
//!
//! ```text
//! [seg0 bytes..., 0x00, seg1 bytes..., 0x00, padding zeros...]
//!  ^                    ^                    ^
//!  seg0.start           seg1.start           len()
//! ```
//!
//! Nothing is ever removed or rewritten. A function literal is stored in a
//! cell as the offset of its body, and that offset must remain callable
//! after later segments are appended.
//!
//! # Interior Null Bytes
//!
//! A `0x00` inside appended source would read as end of input. Such bytes
//! are recorded as [`EncodingIssue`]s; the CLI refuses to run a segment that
//! has any.

use std::fmt;

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Largest total buffer length.
///
/// Offsets are stored in 32-bit signed cells, so every offset must be
/// representable as a non-negative `i32`.
const MAX_LEN: usize = i32::MAX as usize;

/// A contiguous piece of appended source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    start: u32,
    len: u32,
}

impl Segment {
    /// Offset of the first byte of the segment.
    #[inline]
    pub fn start(self) -> u32 {
        self.start
    }

    /// Length of the segment, excluding its sentinel.
    #[inline]
    pub fn len(self) -> u32 {
        self.len
    }

    /// Returns `true` if the segment has no bytes.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Offset of the segment's sentinel byte.
    #[inline]
    pub fn end(self) -> u32 {
        self.start + self.len
    }

    /// Returns `true` if `pos` lies within the segment or on its sentinel.
    #[inline]
    pub fn contains(self, pos: u32) -> bool {
        pos >= self.start && pos <= self.end()
    }
}

/// Encoding issue detected while appending a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    /// What kind of encoding issue was detected.
    pub kind: EncodingIssueKind,
    /// Absolute byte offset in the buffer.
    pub pos: u32,
}

/// Kind of encoding issue detected in appended source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// Null byte inside source content. It would terminate evaluation early.
    InteriorNull,
}

/// Error returned when appending would push offsets past `i32::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceTooLarge {
    /// Total length the buffer would have had.
    pub requested: usize,
}

impl fmt::Display for SourceTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source buffer would grow to {} bytes, max is {MAX_LEN}",
            self.requested
        )
    }
}

impl std::error::Error for SourceTooLarge {}

/// Append-only, sentinel-terminated source buffer.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// `[segments with sentinels..., padding zeros...]`.
    buf: Vec<u8>,
    /// Length of the used region (all segments and their sentinels).
    len: u32,
    /// Every segment appended so far, in order.
    segments: Vec<Segment>,
    /// Encoding issues across all segments.
    encoding_issues: Vec<EncodingIssue>,
}

impl SourceBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; CACHE_LINE],
            len: 0,
            segments: Vec::new(),
            encoding_issues: Vec::new(),
        }
    }

    /// Create a buffer holding a single segment.
    pub fn from_bytes(source: &[u8]) -> Result<(Self, Segment), SourceTooLarge> {
        let mut buffer = Self::new();
        let segment = buffer.append(source)?;
        Ok((buffer, segment))
    }

    /// Append `source` as a new segment followed by a sentinel.
    ///
    /// Earlier offsets are unaffected.
    pub fn append(&mut self, source: &[u8]) -> Result<Segment, SourceTooLarge> {
        let start = self.len as usize;
        let new_len = start + source.len() + 1;
        if new_len > MAX_LEN {
            return Err(SourceTooLarge { requested: new_len });
        }

        // Round up to the next 64-byte boundary. The buffer always ends in
        // zero padding past the last sentinel.
        let padded_len = (new_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        self.buf.truncate(start);
        self.buf.extend_from_slice(source);
        self.buf.resize(padded_len, 0);

        detect_interior_nulls(source, start, &mut self.encoding_issues);

        #[allow(
            clippy::cast_possible_truncation,
            reason = "new_len <= i32::MAX which fits in u32"
        )]
        let (segment, used) = (
            Segment {
                start: start as u32,
                len: source.len() as u32,
            },
            new_len as u32,
        );
        self.len = used;
        self.segments.push(segment);
        Ok(segment)
    }

    /// Total length of the used region, sentinels included.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The used region, sentinels included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Bytes of one segment, without its sentinel.
    pub fn segment_bytes(&self, segment: Segment) -> &[u8] {
        &self.buf[segment.start as usize..segment.end() as usize]
    }

    /// All segments in the order they were appended.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segment containing `pos`, if any.
    pub fn segment_at(&self, pos: u32) -> Option<Segment> {
        let idx = self.segments.partition_point(|seg| seg.end() < pos);
        self.segments.get(idx).copied().filter(|seg| seg.contains(pos))
    }

    /// Create a [`Cursor`] positioned at `pos`.
    ///
    /// A position past the used region is clamped onto the trailing padding,
    /// where the cursor immediately reports end of input.
    pub fn cursor_at(&self, pos: u32) -> Cursor<'_> {
        Cursor::new(&self.buf, pos.min(self.len))
    }

    /// Encoding issues detected so far.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }

    /// Encoding issues that fall inside `segment`.
    pub fn issues_in(&self, segment: Segment) -> impl Iterator<Item = &EncodingIssue> {
        self.encoding_issues
            .iter()
            .filter(move |issue| segment.contains(issue.pos) && issue.pos < segment.end())
    }
}

impl Default for SourceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Record every null byte in `source`, offset by the segment start.
fn detect_interior_nulls(source: &[u8], base: usize, issues: &mut Vec<EncodingIssue>) {
    for pos in memchr::memchr_iter(0, source) {
        if let Ok(p) = u32::try_from(base + pos) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNull,
                pos: p,
            });
        }
    }
}
