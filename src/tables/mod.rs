//! Layer table storage
//!
//! The geometry builder only asks the layer table for a layer by its
//! position; everything else about table storage is left to the caller.

use ahash::RandomState;
use indexmap::IndexMap;

use crate::types::Handle;

pub mod layer;

pub use layer::{Layer, LayerFlags};

/// Lookup of layers by table position.
pub trait LayerTable {
    fn layer(&self, index: usize) -> Option<&Layer>;
}

/// Layers keyed by handle, addressable by insertion position.
#[derive(Debug, Clone, Default)]
pub struct LayerCollection {
    entries: IndexMap<Handle, Layer, RandomState>,
}

impl LayerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, returning its position.
    ///
    /// A layer whose handle is already present replaces the earlier entry
    /// and keeps its position.
    pub fn add(&mut self, layer: Layer) -> usize {
        self.entries.insert_full(layer.handle, layer).0
    }

    pub fn get(&self, handle: Handle) -> Option<&Layer> {
        self.entries.get(&handle)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Layer> {
        self.entries
            .values()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Position of the layer with the given handle.
    pub fn index_of(&self, handle: Handle) -> Option<usize> {
        self.entries.get_index_of(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.entries.values()
    }
}

impl LayerTable for LayerCollection {
    fn layer(&self, index: usize) -> Option<&Layer> {
        self.entries.get_index(index).map(|(_, l)| l)
    }
}

impl FromIterator<Layer> for LayerCollection {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        let mut collection = Self::new();
        for layer in iter {
            collection.add(layer);
        }
        collection
    }
}
