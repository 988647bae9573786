//! Stack safety for recursive evaluation.
//!
//! An az function call (`;`) re-enters the evaluator on the native stack,
//! so a script that recurses a few hundred thousand times would overflow a
//! typical 8MB thread stack. Every re-entry goes through
//! [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: no-op passthrough.
//!
//! # Configuration
//!
//! - **Red zone**: 100KB. If less than this remains, we grow the stack.
//! - **Growth size**: 1MB per growth.

/// Ensure sufficient stack space is available before executing `f`.
///
/// # Example
///
/// ```text
/// fn call(&mut self, offset: u32) -> Result<Cell, EvalError> {
///     ensure_sufficient_stack(|| evaluate(self.source, self.ctx, offset))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
