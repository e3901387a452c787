//! DWG reader: the entry point for decoding objects and geometry.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dwg_geometry::io::{DwgReader, FileSource};
//!
//! let source = FileSource::open("sample.dwg")?;
//! let mut reader = DwgReader::from_sections(source, handles_section, classes_section)?;
//! let geometry = reader.get_geometry(0, handle, Handle::NULL)?;
//! ```
//!
//! Locating the handles and classes sections inside a file is left to the
//! caller; the reader starts from their bytes.

use encoding_rs::Encoding;

use crate::classes::ClassRegistry;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::io::dwg::builder::{GeometryBuilder, DEFAULT_MAX_CHAIN_LENGTH};
use crate::io::dwg::object_index::ObjectIndex;
use crate::io::ByteSource;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tables::{Layer, LayerCollection, LayerFlags, LayerTable};
use crate::types::{AciPalette, ColorTable, Handle};

use super::object_reader::{DwgObjectReader, LayerObject, RawObject};
use super::{DwgClassesReader, DwgHandleReader};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the DWG reader.
#[derive(Debug, Clone)]
pub struct DwgReaderConfiguration {
    /// Check the CRC stored after every object chunk.
    ///
    /// Default: `false`.
    pub verify_crc: bool,

    /// When `true`, bulk reads turn per-object failures into
    /// notifications and carry on with the next object.
    ///
    /// Default: `true`.
    pub failsafe: bool,

    /// Upper bound on the members read from one vertex or attribute chain.
    pub max_chain_length: usize,
}

impl Default for DwgReaderConfiguration {
    fn default() -> Self {
        Self {
            verify_crc: false,
            failsafe: true,
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
        }
    }
}

// ---------------------------------------------------------------------------
// DwgReader
// ---------------------------------------------------------------------------

/// Object and geometry reader over one drawing.
///
/// Owns the byte source, the object index and the class registry, plus
/// the layer and color tables used to resolve entity colors. With no
/// layer table supplied, an empty one is used and every by-layer color
/// stays unresolved.
pub struct DwgReader<S: ByteSource> {
    objects: DwgObjectReader<S>,
    layers: Box<dyn LayerTable>,
    colors: Box<dyn ColorTable>,
    config: DwgReaderConfiguration,
}

impl<S: ByteSource> DwgReader<S> {
    pub fn new(source: S, index: ObjectIndex, classes: impl ClassRegistry + 'static) -> Self {
        Self {
            objects: DwgObjectReader::new(source, index, Box::new(classes)),
            layers: Box::new(LayerCollection::new()),
            colors: Box::new(AciPalette::new()),
            config: DwgReaderConfiguration::default(),
        }
    }

    /// Build the reader from the raw `AcDb:Handles` and `AcDb:Classes`
    /// section bytes.
    pub fn from_sections(source: S, handles: Vec<u8>, classes: Vec<u8>) -> Result<Self> {
        let index = DwgHandleReader::new(handles).read()?;
        let classes = DwgClassesReader::new(classes).read()?;
        Ok(Self::new(source, index, classes))
    }

    pub fn with_config(mut self, config: DwgReaderConfiguration) -> Self {
        self.objects.set_verify_crc(config.verify_crc);
        self.config = config;
        self
    }

    pub fn with_layers(mut self, layers: impl LayerTable + 'static) -> Self {
        self.layers = Box::new(layers);
        self
    }

    pub fn with_colors(mut self, colors: impl ColorTable + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.objects.set_encoding(encoding);
    }

    pub fn config(&self) -> &DwgReaderConfiguration {
        &self.config
    }

    pub fn index(&self) -> &ObjectIndex {
        self.objects.index()
    }

    pub fn notifications(&self) -> &NotificationCollection {
        self.objects.notifications()
    }

    pub fn into_source(self) -> S {
        self.objects.into_source()
    }

    /// Decode the object stored under `handle`.
    pub fn get_object(&mut self, handle: Handle, handles_only: bool) -> Result<RawObject> {
        self.objects.get_object(handle, handles_only)
    }

    /// Build the geometry of one entity.
    pub fn get_geometry(
        &mut self,
        layer_index: usize,
        handle: Handle,
        block_ref_handle: Handle,
    ) -> Result<Geometry> {
        GeometryBuilder::new(&mut self.objects, self.layers.as_ref(), self.colors.as_ref())
            .with_max_chain_length(self.config.max_chain_length)
            .get_geometry(layer_index, handle, block_ref_handle)
    }

    /// Build the geometry of every entity in `handles`.
    ///
    /// In failsafe mode an entity that fails to decode is reported and
    /// skipped; otherwise the first failure ends the pass.
    pub fn read_all_geometry<I>(&mut self, layer_index: usize, handles: I) -> Result<Vec<Geometry>>
    where
        I: IntoIterator<Item = Handle>,
    {
        let mut geometries = Vec::new();
        for handle in handles {
            match self.get_geometry(layer_index, handle, Handle::NULL) {
                Ok(geometry) => geometries.push(geometry),
                Err(e) if self.config.failsafe => self.notify_failure(handle, "Entity", e),
                Err(e) => return Err(e),
            }
        }
        Ok(geometries)
    }

    /// Decode the layers listed by a LAYER_CONTROL object.
    ///
    /// The result can be handed back through [`with_layers`](Self::with_layers)
    /// so by-layer colors resolve against the drawing's own layers.
    pub fn read_layers(&mut self, layer_control: Handle) -> Result<LayerCollection> {
        let control = self.objects.get_object(layer_control, false)?.into_control()?;

        let mut layers = LayerCollection::new();
        for entry in &control.entries {
            let handle = entry.resolve(control.common.handle);
            let layer = self
                .objects
                .get_object(handle, false)
                .and_then(RawObject::into_layer);
            match layer {
                Ok(layer) => {
                    layers.add(layer_from_record(&layer));
                }
                Err(e) if self.config.failsafe => self.notify_failure(handle, "Layer", e),
                Err(e) => return Err(e),
            }
        }
        Ok(layers)
    }

    fn notify_failure(&mut self, handle: Handle, what: &str, error: crate::error::DwgError) {
        let notification_type = if error.is_not_implemented() {
            NotificationType::NotImplemented
        } else {
            NotificationType::Error
        };
        self.objects.notifications_mut().notify_for(
            handle,
            notification_type,
            format!("{what} skipped: {error}"),
        );
    }
}

fn layer_from_record(record: &LayerObject) -> Layer {
    let mut layer = Layer::with_color(record.name.clone(), record.color_index);
    layer.handle = record.common.handle;
    layer.flags.set(LayerFlags::FROZEN, record.is_frozen());
    layer
        .flags
        .set(LayerFlags::FROZEN_IN_NEW_VIEWPORTS, record.is_frozen_in_new_viewports());
    layer.flags.set(LayerFlags::LOCKED, record.is_locked());
    if record.is_off() {
        layer.flags.insert(LayerFlags::OFF);
    }
    layer.line_weight = record.line_weight();
    layer.is_plottable = record.is_plottable();
    layer
}
