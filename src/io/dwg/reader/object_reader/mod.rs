//! DWG Object Reader: decodes single objects addressed by handle.
//!
//! # Framing
//!
//! Every stored object is `MS size | data (size bytes) | RS crc`:
//!
//! 1. Look up the byte offset in the object index.
//! 2. Read the MS size, then the whole chunk: `size + ms_bytes + 2`.
//! 3. Over the chunk, re-read the MS (it must agree), the BS type code
//!    and the RL bit size of the data stream.
//! 4. The handle stream starts at `bit(after MS) + RL`; a second cursor is
//!    placed there so data fields and handles can be read side by side.
//! 5. Read the common data, then dispatch on the type code.
//!
//! Each call owns its chunk; nothing is cached between calls.

pub mod common;
pub mod raw_object;
pub mod read_entities;
pub mod read_objects;

use std::io;

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::classes::ClassRegistry;
use crate::error::{DwgError, Result};
use crate::io::dwg::crc::{crc8, OBJECT_CRC_SEED};
use crate::io::dwg::object_index::ObjectIndex;
use crate::io::dwg::object_type::{DwgObjectType, FIRST_CLASS_NUMBER};
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reader::stream_reader_base::DwgStreamReaderBase;
use crate::io::dwg::reference_type::HandleReference;
use crate::io::ByteSource;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::Handle;

pub use self::common::{EntityCommon, ObjectCommon};
pub use self::raw_object::*;

use self::read_entities as ent;
use self::read_objects as obj;

/// Longest MS header: two 16-bit words
const MS_HEADER_BYTES: usize = 4;

/// Largest declared object size accepted before the chunk is read.
const MAX_OBJECT_BYTES: u64 = 1 << 24;

/// Where the stored type code leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeRoute {
    /// Known entity kind with a field decoder (or the generic entity path)
    Entity(DwgObjectType),
    /// Custom class whose instances are entities, decoded generically
    ClassEntity,
    /// Non-entity kind
    Object(DwgObjectType),
}

/// The object decoder.
pub struct DwgObjectReader<S: ByteSource> {
    source: S,
    index: ObjectIndex,
    classes: Box<dyn ClassRegistry>,
    encoding: &'static Encoding,
    verify_crc: bool,
    notifications: NotificationCollection,
}

impl<S: ByteSource> DwgObjectReader<S> {
    pub fn new(source: S, index: ObjectIndex, classes: Box<dyn ClassRegistry>) -> Self {
        Self {
            source,
            index,
            classes,
            encoding: WINDOWS_1252,
            verify_crc: false,
            notifications: NotificationCollection::new(),
        }
    }

    /// Encoding of TV strings and EED text.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    pub fn set_verify_crc(&mut self, verify: bool) {
        self.verify_crc = verify;
    }

    pub fn index(&self) -> &ObjectIndex {
        &self.index
    }

    pub fn classes(&self) -> &dyn ClassRegistry {
        self.classes.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCollection {
        &mut self.notifications
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Decode the object stored under `handle`.
    ///
    /// With `handles_only` set, entities stop after the common data and
    /// come back as [`RawObject::Entity`]; the common handles (owner,
    /// chain links, layer) are all there. Non-entities ignore the flag.
    pub fn get_object(&mut self, handle: Handle, handles_only: bool) -> Result<RawObject> {
        let offset = self.index.lookup(handle)?;
        let (mut streams, raw_type) = self.frame_object(offset)?;

        let object = match self.route(raw_type)? {
            TypeRoute::Entity(object_type) => {
                let common = self.read_common_entity_data(&mut streams, object_type)?;
                if handles_only {
                    return Ok(RawObject::Entity(GenericEntity { common }));
                }
                Self::read_entity(&mut streams, common)?
            }
            TypeRoute::ClassEntity => {
                let common =
                    self.read_common_entity_data(&mut streams, DwgObjectType::Unlisted)?;
                RawObject::Entity(GenericEntity { common })
            }
            TypeRoute::Object(object_type) => self.read_object(&mut streams, object_type)?,
        };

        if streams.object_reader.position_in_bits() > streams.handles_start {
            self.notifications.notify_for(
                object.handle(),
                NotificationType::Warning,
                format!(
                    "Object data overruns its handle stream by {} bits",
                    streams.object_reader.position_in_bits() - streams.handles_start
                ),
            );
        }

        Ok(object)
    }

    // -----------------------------------------------------------------------
    // Framing
    // -----------------------------------------------------------------------

    /// Read the chunk at `offset` and set up both cursors.
    ///
    /// Returns the stream set positioned after the RL bit size, and the
    /// stored type code.
    fn frame_object(&mut self, offset: u64) -> Result<(StreamSet, i16)> {
        let header = self.read_at(offset, MS_HEADER_BYTES)?;
        let mut header = DwgStreamReaderBase::new(header);
        let size = header.read_modular_short()? as u64;
        let ms_bytes = header.position_in_bits() / 8;
        if size > MAX_OBJECT_BYTES {
            return Err(DwgError::FramingMismatch(format!(
                "object at offset {offset} declares {size} bytes, more than {MAX_OBJECT_BYTES}"
            )));
        }

        // The trailing CRC is not counted in the declared size.
        let chunk_bytes = size + ms_bytes + 2;
        let data = self.read_at(offset, chunk_bytes as usize)?;

        if self.verify_crc {
            let body = (ms_bytes + size) as usize;
            let stored = LittleEndian::read_u16(&data[body..body + 2]);
            let computed = crc8(OBJECT_CRC_SEED, &data[..body]);
            if stored != computed {
                return Err(DwgError::FramingMismatch(format!(
                    "CRC mismatch at offset {offset}: stored {stored:#06X}, computed {computed:#06X}"
                )));
            }
        }

        let mut object_reader = DwgStreamReaderBase::new(data);
        object_reader.set_encoding(self.encoding);

        let declared = object_reader.read_modular_short()? as u64;
        if declared != size {
            return Err(DwgError::FramingMismatch(format!(
                "size {declared} re-read at offset {offset}, expected {size}"
            )));
        }
        let object_initial_pos = object_reader.position_in_bits();

        let raw_type = object_reader.read_object_type()?;

        let size_in_bits = object_reader.read_raw_long()? as u32;
        if size_in_bits as u64 > size * 8 {
            return Err(DwgError::FramingMismatch(format!(
                "data stream of {size_in_bits} bits does not fit an object of {size} bytes"
            )));
        }
        let handles_start = object_initial_pos + size_in_bits as u64;
        if handles_start < object_reader.position_in_bits() {
            return Err(DwgError::FramingMismatch(format!(
                "handle stream at bit {handles_start} starts inside the object header"
            )));
        }

        let handles_reader =
            DwgStreamReaderBase::new_at_bit(object_reader.data().to_vec(), handles_start)?;

        let streams = StreamSet {
            object_reader,
            handles_reader,
            current_handle: Handle::NULL,
            size_in_bits,
            handles_start,
        };
        Ok((streams, raw_type))
    }

    /// Seek, then read exactly `length` bytes; running out of file means
    /// the declared size cannot be right.
    fn read_at(&mut self, offset: u64, length: usize) -> Result<Vec<u8>> {
        self.source.seek(offset)?;
        self.source.read(length).map_err(|e| match e {
            DwgError::Io(ref err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                DwgError::FramingMismatch(format!(
                    "object at offset {offset} needs {length} bytes past the end of the source"
                ))
            }
            other => other,
        })
    }

    // -----------------------------------------------------------------------
    // Type dispatch
    // -----------------------------------------------------------------------

    /// Map a stored type code to a decode route.
    ///
    /// Codes from 500 up are class numbers. The raster classes map to
    /// fixed kinds by C++ class name; other entity classes get the generic
    /// entity decode; anything else has no decoder.
    fn route(&self, raw_type: i16) -> Result<TypeRoute> {
        if raw_type < FIRST_CLASS_NUMBER {
            let object_type = DwgObjectType::from_raw(raw_type);
            return Ok(if object_type.is_entity() {
                TypeRoute::Entity(object_type)
            } else {
                TypeRoute::Object(object_type)
            });
        }

        let class = self
            .classes
            .class_by_number(raw_type)
            .ok_or_else(|| DwgError::ClassNotImplemented(format!("class number {raw_type}")))?;

        match DwgObjectType::from_class_name(&class.cpp_class_name) {
            Some(t) if t.is_entity() => Ok(TypeRoute::Entity(t)),
            Some(t) => Ok(TypeRoute::Object(t)),
            None if class.is_an_entity() => Ok(TypeRoute::ClassEntity),
            None => Err(DwgError::ClassNotImplemented(class.dxf_name.clone())),
        }
    }

    fn read_entity(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
        use DwgObjectType::*;

        match common.object_type {
            Text => ent::read_text(streams, common),
            Attrib => ent::read_attribute(streams, common, false),
            Attdef => ent::read_attribute(streams, common, true),
            Block => ent::read_block(streams, common),
            Insert => ent::read_insert(streams, common, false),
            Minsert => ent::read_insert(streams, common, true),
            Vertex2D => ent::read_vertex_2d(streams, common),
            Vertex3D | VertexMesh | VertexPface => ent::read_vertex(streams, common),
            VertexPfaceFace => ent::read_pface_face(streams, common),
            Polyline2D => ent::read_polyline_2d(streams, common),
            Polyline3D => ent::read_polyline_3d(streams, common),
            PolylinePface => ent::read_polyline_pface(streams, common),
            Arc => ent::read_arc(streams, common),
            Circle => ent::read_circle(streams, common),
            Line => ent::read_line(streams, common),
            Point => ent::read_point(streams, common),
            Face3D => ent::read_3d_face(streams, common),
            Solid | Trace => ent::read_solid(streams, common),
            Ellipse => ent::read_ellipse(streams, common),
            Spline => ent::read_spline(streams, common),
            Ray | Xline => ent::read_ray(streams, common),
            Mtext => ent::read_mtext(streams, common),
            Mline => ent::read_mline(streams, common),
            LwPolyline => ent::read_lwpolyline(streams, common),
            Image | Wipeout => ent::read_image(streams, common),
            // ENDBLK, SEQEND and kinds without a field decoder
            _ => Ok(RawObject::Entity(GenericEntity { common })),
        }
    }

    fn read_object(
        &mut self,
        streams: &mut StreamSet,
        object_type: DwgObjectType,
    ) -> Result<RawObject> {
        use DwgObjectType::*;

        let reader: fn(&mut StreamSet, ObjectCommon) -> Result<RawObject> = match object_type {
            Dictionary => obj::read_dictionary,
            Layer => obj::read_layer,
            LayerControlObj | BlockControlObj | LtypeControlObj => obj::read_table_control,
            BlockHeader => obj::read_block_header,
            Ltype => obj::read_ltype,
            ImageDef => obj::read_image_def,
            ImageDefReactor => obj::read_image_def_reactor,
            XRecord => obj::read_xrecord,
            other => return Err(DwgError::NotImplemented(other)),
        };

        let common = self.read_common_non_entity_data(streams, object_type)?;
        reader(streams, common)
    }
}

// ---------------------------------------------------------------------------
// Stream set: the two cursors over one object
// ---------------------------------------------------------------------------

/// Cursors over a single framed object.
///
/// Data fields are read from `object_reader`, handles from
/// `handles_reader`. Both walk the same chunk.
pub struct StreamSet {
    pub object_reader: DwgStreamReaderBase,
    pub handles_reader: DwgStreamReaderBase,
    /// Handle of the object being read, once known
    pub current_handle: Handle,
    /// RL bit size of the data stream
    pub size_in_bits: u32,
    /// Bit offset of the handle stream in the chunk
    pub handles_start: u64,
}

impl StreamSet {
    /// Next reference from the handle stream, unresolved.
    pub fn handle_ref(&mut self) -> Result<HandleReference> {
        self.handles_reader.handle_reference()
    }

    /// Next reference from the handle stream, resolved against the object
    /// being read.
    pub fn handle_resolved(&mut self) -> Result<Handle> {
        self.handles_reader.handle_reference_resolved(self.current_handle)
    }

    /// TV from the data stream.
    pub fn read_text(&mut self) -> Result<String> {
        self.object_reader.read_variable_text()
    }
}
