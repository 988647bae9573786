//! Register frames.
//!
//! A [`Frame`] is a growable array of cells. Indices 0..26 are the letter
//! registers `a`-`z` (or `A`-`Z` when a callee addresses its caller's
//! frame); `@` can address any non-negative index beyond them, growing the
//! frame with zeros. A frame never shrinks.
//!
//! # Cells as bytes
//!
//! String operators treat a cell as the first of a run of cells holding a
//! NUL-terminated byte string, four bytes per cell in little-endian order.
//! [`Frame::read_cstr`] and [`Frame::write_cstr`] are that byte view; they
//! work at byte granularity, so writing a short string leaves the unused
//! bytes of its last cell untouched.

use crate::errors::EvalErrorKind;
use crate::Cell;

/// Number of letter registers.
pub const LETTERS: usize = 26;

/// Bytes packed into one cell.
const CELL_BYTES: usize = std::mem::size_of::<Cell>();

/// Growable register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    cells: Vec<Cell>,
}

impl Frame {
    /// Frame with the 26 letter registers, all zero.
    pub fn new() -> Self {
        Self::with_len(LETTERS)
    }

    /// Frame with `len` zeroed cells.
    pub fn with_len(len: usize) -> Self {
        Frame {
            cells: vec![0; len],
        }
    }

    /// Number of addressable cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the frame has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Value at `index`; cells past the end read as zero.
    #[inline]
    pub fn get(&self, index: usize) -> Cell {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Store `value` at `index`.
    ///
    /// `index` must already be addressable; the evaluator grows the frame
    /// before pointing a register at a new index.
    #[inline]
    pub fn set(&mut self, index: usize, value: Cell) {
        debug_assert!(index < self.cells.len(), "cell {index} not allocated");
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
    }

    /// Grow the frame to at least `len` cells, zero-filling new slots.
    ///
    /// Never shrinks. Fails with `OutOfMemory` past `limit` cells or when
    /// the allocation itself fails.
    pub fn grow_to(&mut self, len: usize, limit: usize) -> Result<(), EvalErrorKind> {
        let current = self.cells.len();
        if len <= current {
            return Ok(());
        }
        let out_of_memory = || EvalErrorKind::OutOfMemory {
            requested: len,
            limit,
        };
        if len > limit {
            return Err(out_of_memory());
        }
        self.cells
            .try_reserve_exact(len - current)
            .map_err(|_| out_of_memory())?;
        self.cells.resize(len, 0);
        tracing::debug!(from = current, to = len, "frame grown");
        Ok(())
    }

    /// Read the NUL-terminated byte string starting at cell `index`.
    ///
    /// Stops at the first zero byte or at the end of the frame.
    pub fn read_cstr(&self, index: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for cell in self.cells.iter().skip(index) {
            for byte in cell.to_le_bytes() {
                if byte == 0 {
                    return out;
                }
                out.push(byte);
            }
        }
        out
    }

    /// Write `bytes` plus a NUL terminator starting at cell `index`.
    ///
    /// Grows the frame to hold the whole string.
    pub fn write_cstr(
        &mut self,
        index: usize,
        bytes: &[u8],
        limit: usize,
    ) -> Result<(), EvalErrorKind> {
        let total = bytes.len() + 1;
        let cells_needed = total.div_ceil(CELL_BYTES);
        self.grow_to(index + cells_needed, limit)?;

        let base = index * CELL_BYTES;
        for (i, &byte) in bytes.iter().chain(std::iter::once(&0)).enumerate() {
            self.set_byte(base + i, byte);
        }
        Ok(())
    }

    /// Overwrite one byte of the frame's byte view.
    fn set_byte(&mut self, at: usize, byte: u8) {
        let (index, lane) = (at / CELL_BYTES, at % CELL_BYTES);
        if let Some(cell) = self.cells.get_mut(index) {
            let mut bytes = cell.to_le_bytes();
            bytes[lane] = byte;
            *cell = Cell::from_le_bytes(bytes);
        }
    }
}
