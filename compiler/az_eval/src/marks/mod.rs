//! Loop-mark stack.
//!
//! `[` pushes the offset just past itself; `]` jumps back to the top mark;
//! a false `?` pops. The stack is shared by every active invocation so a
//! function called from inside a loop body sees its caller's marks, but
//! each invocation records the depth at entry (its floor) and may only
//! touch marks above it. That keeps a callee's `?` from breaking a loop
//! that belongs to its caller.

use crate::errors::EvalErrorKind;

/// Bounded stack of loop re-entry offsets.
#[derive(Clone, Debug)]
pub struct MarkStack {
    marks: Vec<u32>,
    max_depth: usize,
}

impl MarkStack {
    /// Create an empty stack holding at most `max_depth` marks.
    pub fn new(max_depth: usize) -> Self {
        MarkStack {
            marks: Vec::new(),
            max_depth,
        }
    }

    /// Current number of marks.
    #[inline]
    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if there are marks above `floor`.
    #[inline]
    pub fn has_marks_above(&self, floor: usize) -> bool {
        self.marks.len() > floor
    }

    /// Push a loop re-entry offset.
    pub fn push(&mut self, offset: u32) -> Result<(), EvalErrorKind> {
        if self.marks.len() >= self.max_depth {
            return Err(EvalErrorKind::LoopOverflow {
                max: self.max_depth,
            });
        }
        self.marks.push(offset);
        Ok(())
    }

    /// Top mark, if it lies above `floor`.
    pub fn top(&self, floor: usize) -> Result<u32, EvalErrorKind> {
        match self.marks.last() {
            Some(&offset) if self.marks.len() > floor => Ok(offset),
            _ => Err(EvalErrorKind::LoopUnderflow),
        }
    }

    /// Pop the top mark, never going below `floor`.
    pub fn pop(&mut self, floor: usize) -> Result<u32, EvalErrorKind> {
        let offset = self.top(floor)?;
        self.marks.pop();
        Ok(offset)
    }

    /// Drop every mark above `depth`.
    ///
    /// Called when an invocation returns, so marks of loops it left open
    /// do not leak into its caller.
    pub fn truncate(&mut self, depth: usize) {
        self.marks.truncate(depth);
    }
}

#[cfg(test)]
mod tests;
