//! Name table for multi-letter global cells.
//!
//! A run of three or more letters in the source names a persistent global
//! cell. The table is append-only: the first reference creates the cell with
//! value 0, and the returned [`NameId`] stays valid for the lifetime of the
//! table. Each name owns its own [`Frame`] strip, so a string written into a
//! named cell grows that strip instead of spilling into a neighbour.

use rustc_hash::FxHashMap;

use crate::errors::EvalErrorKind;
use crate::frame::Frame;

/// Handle to a named global cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameId(u32);

impl NameId {
    /// Index into the table's storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only table of named global cells.
pub struct NameTable {
    /// Identifier bytes to handle.
    map: FxHashMap<Box<[u8]>, NameId>,
    /// Cell storage, indexed by `NameId`.
    strips: Vec<Frame>,
    /// Longest accepted identifier.
    max_len: usize,
}

impl NameTable {
    /// Create an empty table accepting identifiers up to `max_len` bytes.
    pub fn new(max_len: usize) -> Self {
        NameTable {
            map: FxHashMap::default(),
            strips: Vec::new(),
            max_len,
        }
    }

    /// Find the cell for `ident`, creating it with value 0 on first use.
    ///
    /// Identifiers longer than the configured maximum are rejected, never
    /// truncated.
    pub fn lookup_or_create(&mut self, ident: &[u8]) -> Result<NameId, EvalErrorKind> {
        if ident.len() > self.max_len {
            return Err(EvalErrorKind::IdentifierTooLong {
                len: ident.len(),
                max: self.max_len,
            });
        }
        if let Some(&id) = self.map.get(ident) {
            return Ok(id);
        }

        let id = u32::try_from(self.strips.len())
            .map(NameId)
            .map_err(|_| EvalErrorKind::OutOfMemory {
                requested: self.strips.len() + 1,
                limit: u32::MAX as usize,
            })?;
        self.map.insert(ident.into(), id);
        self.strips.push(Frame::with_len(1));
        tracing::trace!(name = %String::from_utf8_lossy(ident), "named cell created");
        Ok(id)
    }

    /// Find the cell for `ident` without creating it.
    pub fn get(&self, ident: &[u8]) -> Option<NameId> {
        self.map.get(ident).copied()
    }

    /// Storage behind `id`.
    pub fn strip(&self, id: NameId) -> &Frame {
        &self.strips[id.index()]
    }

    /// Mutable storage behind `id`.
    pub fn strip_mut(&mut self, id: NameId) -> &mut Frame {
        &mut self.strips[id.index()]
    }

    /// Current value of the named cell.
    pub fn value(&self, id: NameId) -> crate::Cell {
        self.strip(id).get(0)
    }

    /// Number of names created.
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    /// Returns `true` if no names have been created.
    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }
}
