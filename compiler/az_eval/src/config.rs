//! Interpreter limits and environment.

/// Configuration for an [`Interpreter`](crate::Interpreter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of loop marks live at once, across all invocations.
    pub max_loop_depth: usize,
    /// Longest accepted multi-letter identifier, in bytes.
    pub max_ident_len: usize,
    /// Largest frame (or named cell strip) in cells.
    pub max_frame_cells: usize,
    /// Program run as `<shell> -c <command>` by `$`.
    pub shell: String,
}

impl EvalConfig {
    /// Default loop nesting limit.
    pub const DEFAULT_MAX_LOOP_DEPTH: usize = 256;
    /// Default identifier length limit.
    pub const DEFAULT_MAX_IDENT_LEN: usize = 64;
    /// Default frame size limit: 16M cells (64 MiB).
    pub const DEFAULT_MAX_FRAME_CELLS: usize = 1 << 24;
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_loop_depth: Self::DEFAULT_MAX_LOOP_DEPTH,
            max_ident_len: Self::DEFAULT_MAX_IDENT_LEN,
            max_frame_cells: Self::DEFAULT_MAX_FRAME_CELLS,
            shell: "sh".to_string(),
        }
    }
}
