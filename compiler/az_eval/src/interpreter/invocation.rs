//! One activation of the evaluator.
//!
//! An invocation walks the source one byte at a time from its entry offset
//! until `}`, a returning `?`, or the end of the segment. Every byte is an
//! instruction; there is no lookahead beyond the byte being dispatched
//! except where an operator consumes its own operand (digit runs,
//! identifiers, string literals).

use az_source::{Cursor, SourceBuffer};

use super::{CellRef, EvalContext};
use crate::errors::{EvalErrorKind, EvalResult};
use crate::frame::Frame;
use crate::operators::{evaluate_binary, evaluate_unary, BinaryOp, UnaryOp};
use crate::Cell;

/// Shortest letter run treated as a named global instead of single-letter
/// registers.
const MIN_IDENT_LEN: u32 = 3;

/// Whether dispatch continues after an instruction.
enum Flow {
    Continue,
    Return,
}

/// Run the evaluator from `entry` against `local`, with `outer` as the
/// caller's frame (`None` at top level, where uppercase letters address
/// `local`).
///
/// Returns the value Current refers to when the invocation ends. Loop marks
/// pushed by this invocation are discarded on every exit path.
#[tracing::instrument(level = "debug", skip_all, fields(entry = entry))]
pub(super) fn evaluate(
    source: &SourceBuffer,
    ctx: &mut EvalContext,
    local: &mut Frame,
    outer: Option<&mut Frame>,
    entry: u32,
) -> EvalResult {
    let floor = ctx.marks.depth();
    let mut invocation = Invocation {
        source,
        cursor: source.cursor_at(entry),
        ctx,
        local,
        outer,
        current: CellRef::Local(0),
        previous: CellRef::Local(0),
        floor,
    };
    let result = invocation.dispatch();
    invocation.ctx.marks.truncate(floor);
    result?;
    Ok(invocation.load(invocation.current))
}

struct Invocation<'a, 'f> {
    source: &'a SourceBuffer,
    cursor: Cursor<'a>,
    ctx: &'a mut EvalContext,
    local: &'f mut Frame,
    outer: Option<&'f mut Frame>,
    current: CellRef,
    previous: CellRef,
    /// Loop-mark depth at entry; marks at or below belong to callers.
    floor: usize,
}

impl Invocation<'_, '_> {
    fn dispatch(&mut self) -> EvalResult<()> {
        while !self.cursor.is_eof() {
            let offset = self.cursor.pos();
            let byte = self.cursor.bump();
            if let Flow::Return = self.step(byte, offset)? {
                return Ok(());
            }
        }
        Ok(())
    }

    fn step(&mut self, byte: u8, offset: u32) -> EvalResult<Flow> {
        let at = |kind: EvalErrorKind| kind.at(offset);
        match byte {
            b'(' => self.cursor.skip_balanced(Some(b'('), b')'),
            b'{' => {
                let body = offset_to_cell(self.cursor.pos()).map_err(at)?;
                self.store(self.current, body);
                self.cursor.skip_balanced(Some(b'{'), b'}');
            }
            b'}' => return Ok(Flow::Return),
            b';' => self.call(offset)?,
            b'[' => self.ctx.marks.push(self.cursor.pos()).map_err(at)?,
            b']' => {
                let mark = self.ctx.marks.top(self.floor).map_err(at)?;
                tracing::trace!(mark, "loop repeat");
                self.cursor.set_pos(mark);
            }
            b'?' => return self.test(offset),
            b'"' => self.string_literal(offset)?,
            b'$' => {
                let command = self.read_cstr(self.current);
                self.ctx.io.open_subprocess(&command).map_err(at)?;
            }
            b',' => {
                let value = self.ctx.io.read_byte().map_err(at)?.map_or(0, Cell::from);
                self.store(self.current, value);
            }
            b'.' => {
                let text = self.read_cstr(self.current);
                self.ctx.io.write(&text).map_err(at)?;
            }
            b'@' => self.address().map_err(at)?,
            b'#' => {
                let text = self.load(self.current).to_string();
                self.ctx.io.write(text.as_bytes()).map_err(at)?;
            }
            b'a'..=b'z' | b'A'..=b'Z' => self.scope(byte, offset)?,
            b'0'..=b'9' => self.number(byte),
            b if b.is_ascii_whitespace() => {}
            b => self.operator(b).map_err(at)?,
        }
        Ok(Flow::Continue)
    }

    /// `?`: break out of this invocation's innermost loop, or return if it
    /// has none, when Current is false.
    fn test(&mut self, offset: u32) -> EvalResult<Flow> {
        if self.load(self.current) != 0 {
            return Ok(Flow::Continue);
        }
        if !self.ctx.marks.has_marks_above(self.floor) {
            return Ok(Flow::Return);
        }
        self.ctx
            .marks
            .pop(self.floor)
            .map_err(|kind| kind.at(offset))?;
        self.cursor.skip_balanced(Some(b'['), b']');
        Ok(Flow::Continue)
    }

    /// `;`: call the function whose body offset is in Current, with this
    /// invocation's local frame as the callee's outer frame.
    fn call(&mut self, offset: u32) -> EvalResult<()> {
        let target = self.load(self.current);
        let entry = u32::try_from(target)
            .ok()
            .filter(|&pos| pos < self.source.len())
            .ok_or_else(|| {
                EvalErrorKind::IndexOutOfBounds {
                    index: i64::from(target),
                }
                .at(offset)
            })?;

        let source = self.source;
        let ctx = &mut *self.ctx;
        let caller = &mut *self.local;
        let mut callee = Frame::new();
        // The callee's Current value is not captured.
        az_stack::ensure_sufficient_stack(|| {
            evaluate(source, ctx, &mut callee, Some(caller), entry)
        })?;
        Ok(())
    }

    /// `@`: re-point Current at the local cell indexed by Current's value.
    fn address(&mut self) -> Result<(), EvalErrorKind> {
        let value = self.load(self.current);
        let index = usize::try_from(value).map_err(|_| EvalErrorKind::IndexOutOfBounds {
            index: i64::from(value),
        })?;
        self.local
            .grow_to(index + 1, self.ctx.config.max_frame_cells)?;
        self.current = CellRef::Local(index);
        Ok(())
    }

    /// Letter: switch scope to a register, or to a named global for a run of
    /// three or more letters.
    fn scope(&mut self, first: u8, offset: u32) -> EvalResult<()> {
        let rest = self.cursor.count_while(|b| b.is_ascii_alphabetic());
        let target = if rest + 1 >= MIN_IDENT_LEN {
            self.cursor.eat_while(|b| b.is_ascii_alphabetic());
            let ident = self.cursor.slice_from(offset);
            let id = self
                .ctx
                .names
                .lookup_or_create(ident)
                .map_err(|kind| kind.at(offset))?;
            CellRef::Global(id)
        } else {
            letter_ref(first)
        };
        self.previous = self.current;
        self.current = target;
        Ok(())
    }

    /// Digit: overwrite Current with the decimal run starting at `first`.
    fn number(&mut self, first: u8) {
        let mut value = Cell::from(first - b'0');
        while self.cursor.current().is_ascii_digit() {
            let digit = Cell::from(self.cursor.bump() - b'0');
            value = value.wrapping_mul(10).wrapping_add(digit);
        }
        self.store(self.current, value);
    }

    fn operator(&mut self, byte: u8) -> Result<(), EvalErrorKind> {
        let value = if let Some(op) = BinaryOp::from_byte(byte) {
            evaluate_binary(op, self.load(self.previous), self.load(self.current))?
        } else if let Some(op) = UnaryOp::from_byte(byte) {
            evaluate_unary(op, self.load(self.current))
        } else {
            return Err(EvalErrorKind::UnexpectedCharacter { byte });
        };
        self.store(self.current, value);
        Ok(())
    }

    /// `"`: build the literal, expanding `$x` (bytes of x) and `#x` (decimal
    /// value of x), then write it NUL-terminated at Current.
    ///
    /// The whole literal is built before anything is written, so a literal
    /// may interpolate the cell it overwrites.
    fn string_literal(&mut self, offset: u32) -> EvalResult<()> {
        let mut text = Vec::new();
        loop {
            match self.cursor.bump() {
                0 | b'"' => break,
                b'$' => {
                    let source = self.interpolated()?;
                    text.extend(self.read_cstr(source));
                }
                b'#' => {
                    let source = self.interpolated()?;
                    text.extend(self.load(source).to_string().bytes());
                }
                b => text.push(b),
            }
        }
        let limit = self.ctx.config.max_frame_cells;
        let (frame, index) = self.frame_mut(self.current);
        frame
            .write_cstr(index, &text, limit)
            .map_err(|kind| kind.at(offset))
    }

    /// The register named by the letter after `$` or `#` in a string.
    fn interpolated(&mut self) -> EvalResult<CellRef> {
        let offset = self.cursor.pos();
        match self.cursor.bump() {
            b @ (b'a'..=b'z' | b'A'..=b'Z') => Ok(letter_ref(b)),
            byte => Err(EvalErrorKind::UnexpectedCharacter { byte }.at(offset)),
        }
    }

    // Storage access

    fn frame(&self, cell: CellRef) -> (&Frame, usize) {
        match cell {
            CellRef::Local(index) => (&*self.local, index),
            CellRef::Outer(index) => (self.outer.as_deref().unwrap_or(&*self.local), index),
            CellRef::Global(id) => (self.ctx.names.strip(id), 0),
        }
    }

    fn frame_mut(&mut self, cell: CellRef) -> (&mut Frame, usize) {
        match cell {
            CellRef::Local(index) => (&mut *self.local, index),
            CellRef::Outer(index) => match self.outer.as_deref_mut() {
                Some(outer) => (outer, index),
                None => (&mut *self.local, index),
            },
            CellRef::Global(id) => (self.ctx.names.strip_mut(id), 0),
        }
    }

    fn load(&self, cell: CellRef) -> Cell {
        let (frame, index) = self.frame(cell);
        frame.get(index)
    }

    fn store(&mut self, cell: CellRef, value: Cell) {
        let (frame, index) = self.frame_mut(cell);
        frame.set(index, value);
    }

    fn read_cstr(&self, cell: CellRef) -> Vec<u8> {
        let (frame, index) = self.frame(cell);
        frame.read_cstr(index)
    }
}

/// Register for a single letter: lowercase is local, uppercase is outer.
fn letter_ref(letter: u8) -> CellRef {
    if letter.is_ascii_lowercase() {
        CellRef::Local(usize::from(letter - b'a'))
    } else {
        CellRef::Outer(usize::from(letter - b'A'))
    }
}

/// Source offsets are stored in cells as function pointers.
fn offset_to_cell(offset: u32) -> Result<Cell, EvalErrorKind> {
    Cell::try_from(offset).map_err(|_| EvalErrorKind::OutOfMemory {
        requested: offset as usize,
        limit: i32::MAX as usize,
    })
}
