//! Common entity/object data.
//!
//! Every R2000 object starts its data stream with the same header (size in
//! bits, own handle, EED) and every entity continues with a fixed block of
//! display properties. The matching handles sit at the start of the handle
//! stream. Both are read here, before the type-specific fields.

use crate::error::{DwgError, Result};
use crate::io::dwg::object_type::DwgObjectType;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reference_type::HandleReference;
use crate::io::ByteSource;
use crate::types::{Handle, LineWeight};
use crate::xdata::EedRecord;

use super::{DwgObjectReader, StreamSet};

/// Header and handles shared by every entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityCommon {
    /// Kind of the entity this header belongs to
    pub object_type: DwgObjectType,
    pub handle: Handle,
    /// Bit length of the data stream (RL)
    pub size_in_bits: u32,
    pub eed: Vec<EedRecord>,
    /// Byte length of the skipped proxy graphics, if present
    pub graphics_size: Option<u32>,
    /// 0 owner stored, 1 paper space, 2 model space
    pub entity_mode: u8,
    pub reactor_count: u32,
    /// Chain neighbour is the next handle rather than stored links
    pub no_links: bool,
    pub color_index: i16,
    pub linetype_scale: f64,
    /// 0 bylayer, 1 byblock, 2 continuous, 3 handle stored
    pub linetype_flags: u8,
    /// 0 bylayer, 1 byblock, 2 continuous, 3 handle stored
    pub plotstyle_flags: u8,
    pub invisibility: i16,
    pub line_weight: LineWeight,

    // Handle stream
    pub owner: Option<HandleReference>,
    pub reactors: Vec<HandleReference>,
    pub xdictionary: HandleReference,
    pub prev_entity: Option<HandleReference>,
    pub next_entity: Option<HandleReference>,
    pub layer: HandleReference,
    pub linetype: Option<HandleReference>,
    pub plot_style: Option<HandleReference>,
}

impl EntityCommon {
    /// Handle of the next entity in an owner's chain.
    ///
    /// With no-links set the next entity is the next handle; otherwise the
    /// stored next-entity reference resolved against this entity's handle.
    /// `None` at the end of the chain.
    pub fn next_link(&self) -> Option<Handle> {
        let next = if self.no_links {
            self.handle.next()
        } else {
            self.next_entity?.resolve(self.handle)
        };
        (!next.is_null()).then_some(next)
    }

    pub fn is_invisible(&self) -> bool {
        self.invisibility & 1 != 0
    }
}

/// Header and handles shared by every non-entity object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectCommon {
    pub object_type: DwgObjectType,
    pub handle: Handle,
    pub size_in_bits: u32,
    pub eed: Vec<EedRecord>,
    pub reactor_count: u32,
    pub owner: HandleReference,
    pub reactors: Vec<HandleReference>,
    pub xdictionary: HandleReference,
}

/// Reactor counts above this mean the stream is misaligned.
const MAX_REACTORS: u32 = 10_000;

impl<S: ByteSource> DwgObjectReader<S> {
    // -----------------------------------------------------------------------
    // Entity header
    // -----------------------------------------------------------------------

    /// Read the common entity data and the common entity handles.
    pub(super) fn read_common_entity_data(
        &mut self,
        streams: &mut StreamSet,
        object_type: DwgObjectType,
    ) -> Result<EntityCommon> {
        let mut common = EntityCommon {
            object_type,
            size_in_bits: streams.size_in_bits,
            ..Default::default()
        };

        // Handle (H), absolute.
        common.handle = Handle::new(streams.object_reader.handle_reference()?.value);
        streams.current_handle = common.handle;

        common.eed = self.read_extended_data(streams)?;

        // Graphic present flag (B), then RL byte count of opaque graphics.
        if streams.object_reader.read_bit()? {
            let size = streams.object_reader.read_raw_long()? as u32;
            streams.object_reader.advance_bits(size as u64 * 8)?;
            common.graphics_size = Some(size);
        }

        common.entity_mode = streams.object_reader.read_2bits()?;
        common.reactor_count = read_reactor_count(&mut streams.object_reader)?;
        common.no_links = streams.object_reader.read_bit()?;
        common.color_index = streams.object_reader.read_color_index()?;
        common.linetype_scale = streams.object_reader.read_bit_double()?;
        common.linetype_flags = streams.object_reader.read_2bits()?;
        common.plotstyle_flags = streams.object_reader.read_2bits()?;
        common.invisibility = streams.object_reader.read_bit_short()?;
        common.line_weight = LineWeight::from_index(streams.object_reader.read_raw_char()?);

        // Handle stream, in storage order.
        if common.entity_mode == 0 {
            common.owner = Some(streams.handle_ref()?);
        }
        for _ in 0..common.reactor_count {
            common.reactors.push(streams.handle_ref()?);
        }
        common.xdictionary = streams.handle_ref()?;
        if !common.no_links {
            common.prev_entity = Some(streams.handle_ref()?);
            common.next_entity = Some(streams.handle_ref()?);
        }
        common.layer = streams.handle_ref()?;
        if common.linetype_flags == 3 {
            common.linetype = Some(streams.handle_ref()?);
        }
        if common.plotstyle_flags == 3 {
            common.plot_style = Some(streams.handle_ref()?);
        }

        Ok(common)
    }

    // -----------------------------------------------------------------------
    // Non-entity header
    // -----------------------------------------------------------------------

    pub(super) fn read_common_non_entity_data(
        &mut self,
        streams: &mut StreamSet,
        object_type: DwgObjectType,
    ) -> Result<ObjectCommon> {
        let mut common = ObjectCommon {
            object_type,
            size_in_bits: streams.size_in_bits,
            ..Default::default()
        };

        common.handle = Handle::new(streams.object_reader.handle_reference()?.value);
        streams.current_handle = common.handle;

        common.eed = self.read_extended_data(streams)?;
        common.reactor_count = read_reactor_count(&mut streams.object_reader)?;

        common.owner = streams.handle_ref()?;
        for _ in 0..common.reactor_count {
            common.reactors.push(streams.handle_ref()?);
        }
        common.xdictionary = streams.handle_ref()?;

        Ok(common)
    }

    // -----------------------------------------------------------------------
    // EED
    // -----------------------------------------------------------------------

    /// Read the EED chain up to its zero-size terminator.
    ///
    /// Payloads are kept as raw bytes; they are interpreted on demand by
    /// [`EedRecord::render`] and [`EedRecord::values`].
    fn read_extended_data(&mut self, streams: &mut StreamSet) -> Result<Vec<EedRecord>> {
        let mut records = Vec::new();

        loop {
            // BS: size of next app group (0 = end of EED).
            let size = streams.object_reader.read_bit_short()?;
            if size == 0 {
                break;
            }
            if size < 0 {
                return Err(DwgError::InvalidFormat(format!("negative EED size {size}")));
            }

            let application = streams.object_reader.handle_reference()?;
            let data = streams.object_reader.read_bytes(size as usize)?;
            records.push(EedRecord {
                length: size,
                application,
                data,
            });
        }

        Ok(records)
    }
}

/// Read the R2000 xref-dependent bits of a table entry: 64-flag (B),
/// xref index + 1 (BS), xref dependent (B).
pub(super) fn read_xref_dependant_bit(reader: &mut dyn IDwgStreamReader) -> Result<bool> {
    let _referenced = reader.read_bit()?;
    let _xref_index = reader.read_bit_short()?;
    reader.read_bit()
}

fn read_reactor_count(reader: &mut dyn IDwgStreamReader) -> Result<u32> {
    let count = reader.read_bit_long()?;
    if count < 0 || count as u32 > MAX_REACTORS {
        return Err(DwgError::InvalidFormat(format!(
            "reactor count {count} is out of range"
        )));
    }
    Ok(count as u32)
}
