//! Shared test utilities for the integration tests.
//!
//! Drawings are assembled in memory: object chunks are appended to a byte
//! vector and their offsets recorded in an [`ObjectIndex`], then served to
//! the reader through a `StreamSource` over a `Cursor`.

#![allow(dead_code)]

pub mod bit_writer;
pub mod builders;

use std::io::Cursor;

use dwg_geometry::classes::{DxfClass, DxfClassCollection};
use dwg_geometry::io::dwg::reader::DwgObjectReader;
use dwg_geometry::io::StreamSource;
use dwg_geometry::{DwgReader, Handle, ObjectIndex};

pub use bit_writer::BitWriter;
pub use builders::*;

pub type MemorySource = StreamSource<Cursor<Vec<u8>>>;

/// Bytes placed before the first object so no offset is zero.
const LEADING_BYTES: usize = 16;

/// An in-memory drawing under construction.
#[derive(Debug, Clone)]
pub struct TestDrawing {
    pub bytes: Vec<u8>,
    pub index: ObjectIndex,
    pub classes: DxfClassCollection,
}

impl Default for TestDrawing {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDrawing {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; LEADING_BYTES],
            index: ObjectIndex::new(),
            classes: DxfClassCollection::new(),
        }
    }

    /// Append a framed object and index it; returns its offset.
    pub fn add(&mut self, handle: u64, chunk: Vec<u8>) -> u64 {
        let offset = self.bytes.len() as u64;
        self.bytes.extend_from_slice(&chunk);
        self.index.insert(Handle::new(handle), offset);
        offset
    }

    pub fn add_entity(&mut self, chunk: &EntityChunk) -> u64 {
        self.add(chunk.handle, chunk.build())
    }

    pub fn add_object(&mut self, chunk: &ObjectChunk) -> u64 {
        self.add(chunk.handle, chunk.build())
    }

    /// Register a custom class produced by entities (`0x1F2`) or objects.
    pub fn add_class(&mut self, number: i16, cpp_class_name: &str, dxf_name: &str, entity: bool) {
        let mut class = DxfClass::new(number, cpp_class_name, dxf_name);
        class.item_class_id = if entity { 0x1F2 } else { 0x1F3 };
        self.classes.add_or_update(class);
    }

    pub fn source(&self) -> MemorySource {
        StreamSource::new(Cursor::new(self.bytes.clone()))
    }

    pub fn object_reader(&self) -> DwgObjectReader<MemorySource> {
        DwgObjectReader::new(self.source(), self.index.clone(), Box::new(self.classes.clone()))
    }

    pub fn reader(&self) -> DwgReader<MemorySource> {
        DwgReader::new(self.source(), self.index.clone(), self.classes.clone())
    }
}

/// Assert two floats are within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
