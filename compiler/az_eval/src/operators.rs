//! Arithmetic, bitwise and logical operators.
//!
//! Binary operators take Previous as the left operand and Current as the
//! right, and store the result into Current. Unary operators read and write
//! Current only. All arithmetic wraps on 32 bits; shift counts use the low
//! five bits of the right operand.
//!
//! The operator set is fixed, so dispatch is a plain `match` on enums.

use crate::errors::EvalErrorKind;
use crate::Cell;

/// Canonical boolean true.
pub const TRUE: Cell = -1;
/// Boolean false.
pub const FALSE: Cell = 0;

#[inline]
fn truth(b: bool) -> Cell {
    if b {
        TRUE
    } else {
        FALSE
    }
}

/// Operators combining Previous and Current.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `:` copy Previous into Current
    Copy,
    /// `+`
    Add,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<` Previous shifted left by Current
    Shl,
    /// `>` Previous shifted right (arithmetic) by Current
    Shr,
    /// `=` equality test
    Eq,
}

impl BinaryOp {
    /// Decode an operator byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b':' => BinaryOp::Copy,
            b'+' => BinaryOp::Add,
            b'*' => BinaryOp::Mul,
            b'/' => BinaryOp::Div,
            b'%' => BinaryOp::Mod,
            b'&' => BinaryOp::BitAnd,
            b'|' => BinaryOp::BitOr,
            b'^' => BinaryOp::BitXor,
            b'<' => BinaryOp::Shl,
            b'>' => BinaryOp::Shr,
            b'=' => BinaryOp::Eq,
            _ => return None,
        })
    }
}

/// Operators on Current alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-` negate
    Neg,
    /// `!` logical not
    Not,
    /// `\` sign test: true iff negative
    IsNegative,
}

impl UnaryOp {
    /// Decode an operator byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'-' => Some(UnaryOp::Neg),
            b'!' => Some(UnaryOp::Not),
            b'\\' => Some(UnaryOp::IsNegative),
            _ => None,
        }
    }
}

/// Apply a binary operator to `left` (Previous) and `right` (Current).
#[allow(
    clippy::cast_sign_loss,
    reason = "shift count is masked by wrapping_shl/shr"
)]
pub fn evaluate_binary(op: BinaryOp, left: Cell, right: Cell) -> Result<Cell, EvalErrorKind> {
    Ok(match op {
        BinaryOp::Copy => left,
        BinaryOp::Add => left.wrapping_add(right),
        BinaryOp::Mul => left.wrapping_mul(right),
        BinaryOp::Div => {
            if right == 0 {
                return Err(EvalErrorKind::DivisionByZero);
            }
            left.wrapping_div(right)
        }
        BinaryOp::Mod => {
            if right == 0 {
                return Err(EvalErrorKind::ModuloByZero);
            }
            left.wrapping_rem(right)
        }
        BinaryOp::BitAnd => left & right,
        BinaryOp::BitOr => left | right,
        BinaryOp::BitXor => left ^ right,
        BinaryOp::Shl => left.wrapping_shl(right as u32),
        BinaryOp::Shr => left.wrapping_shr(right as u32),
        BinaryOp::Eq => truth(left == right),
    })
}

/// Apply a unary operator to `value` (Current).
pub fn evaluate_unary(op: UnaryOp, value: Cell) -> Cell {
    match op {
        UnaryOp::Neg => value.wrapping_neg(),
        UnaryOp::Not => truth(value == 0),
        UnaryOp::IsNegative => truth(value < 0),
    }
}
