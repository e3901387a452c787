//! Handle → file offset map.

use ahash::RandomState;
use indexmap::IndexMap;

use crate::error::{DwgError, Result};
use crate::types::Handle;

/// Absolute byte offset of every stored object, keyed by handle.
///
/// Built once per file (usually by
/// [`DwgHandleReader`](crate::io::dwg::reader::DwgHandleReader)) and only
/// read afterwards. Iteration follows insertion order, which for a parsed
/// map is the order objects appear in the handles section.
#[derive(Debug, Clone, Default)]
pub struct ObjectIndex {
    offsets: IndexMap<Handle, u64, RandomState>,
}

impl ObjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the object stored under `handle`.
    pub fn lookup(&self, handle: Handle) -> Result<u64> {
        self.get(handle)
            .ok_or(DwgError::HandleNotFound(handle.value()))
    }

    pub fn get(&self, handle: Handle) -> Option<u64> {
        self.offsets.get(&handle).copied()
    }

    /// Record an object location, returning the previous offset if any.
    pub fn insert(&mut self, handle: Handle, offset: u64) -> Option<u64> {
        self.offsets.insert(handle, offset)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.offsets.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Handles in insertion order
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.offsets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, u64)> + '_ {
        self.offsets.iter().map(|(h, o)| (*h, *o))
    }
}

impl FromIterator<(Handle, u64)> for ObjectIndex {
    fn from_iter<I: IntoIterator<Item = (Handle, u64)>>(iter: I) -> Self {
        let mut index = ObjectIndex::new();
        for (handle, offset) in iter {
            index.insert(handle, offset);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_found() {
        let mut index = ObjectIndex::new();
        index.insert(Handle::new(0x2A), 1024);
        assert_eq!(index.lookup(Handle::new(0x2A)).unwrap(), 1024);
        assert!(index.contains(Handle::new(0x2A)));
    }

    #[test]
    fn test_lookup_missing_is_distinct() {
        let index = ObjectIndex::new();
        match index.lookup(Handle::new(0x99)) {
            Err(DwgError::HandleNotFound(h)) => assert_eq!(h, 0x99),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(index.get(Handle::new(0x99)), None);
    }

    #[test]
    fn test_insertion_order() {
        let index: ObjectIndex = [(Handle::new(5), 50), (Handle::new(2), 20), (Handle::new(9), 90)]
            .into_iter()
            .collect();
        let handles: Vec<u64> = index.handles().map(|h| h.value()).collect();
        assert_eq!(handles, vec![5, 2, 9]);
        assert_eq!(index.len(), 3);
    }
}
