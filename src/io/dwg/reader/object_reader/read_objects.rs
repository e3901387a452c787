//! Non-entity object decoders (R2000 layouts).
//!
//! Called with the cursor just past the common non-entity data and the
//! handle stream just past owner, reactors and xdictionary.

use crate::error::Result;
use crate::io::dwg::object_type::DwgObjectType;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;

use super::common::{read_xref_dependant_bit, ObjectCommon};
use super::raw_object::*;
use super::read_entities::count;
use super::StreamSet;

/// Size of the R2000 linetype text area
const LTYPE_STRINGS_AREA: usize = 256;

pub(super) fn read_dictionary(streams: &mut StreamSet, common: ObjectCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let entry_count = count(reader.read_bit_long()?, "dictionary entry")?;
    let cloning_flags = reader.read_bit_short()?;
    let hard_owner = reader.read_raw_char()?;

    let mut names = Vec::new();
    for _ in 0..entry_count {
        names.push(reader.read_variable_text()?);
    }

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        entries.push((name, streams.handle_ref()?));
    }

    Ok(RawObject::Dictionary(DictionaryObject {
        common,
        cloning_flags,
        hard_owner,
        entries,
    }))
}

pub(super) fn read_layer(streams: &mut StreamSet, common: ObjectCommon) -> Result<RawObject> {
    let name = streams.read_text()?;
    let xref_dependent = read_xref_dependant_bit(&mut streams.object_reader)?;
    let flags = streams.object_reader.read_bit_short()?;
    let color_index = streams.object_reader.read_color_index()?;

    Ok(RawObject::Layer(LayerObject {
        common,
        name,
        xref_dependent,
        flags,
        color_index,
        xref_block: streams.handle_ref()?,
        plot_style: streams.handle_ref()?,
        linetype: streams.handle_ref()?,
    }))
}

/// LAYER_CONTROL, BLOCK_CONTROL and LTYPE_CONTROL.
///
/// Block and linetype controls keep two special entries after the list.
pub(super) fn read_table_control(
    streams: &mut StreamSet,
    common: ObjectCommon,
) -> Result<RawObject> {
    let entry_count = count(streams.object_reader.read_bit_long()?, "table entry")?;

    let mut control = ControlObject::default();
    for _ in 0..entry_count {
        control.entries.push(streams.handle_ref()?);
    }

    match common.object_type {
        DwgObjectType::BlockControlObj => {
            control.model_space = Some(streams.handle_ref()?);
            control.paper_space = Some(streams.handle_ref()?);
        }
        DwgObjectType::LtypeControlObj => {
            control.by_layer = Some(streams.handle_ref()?);
            control.by_block = Some(streams.handle_ref()?);
        }
        _ => {}
    }

    control.common = common;
    Ok(RawObject::Control(control))
}

pub(super) fn read_block_header(streams: &mut StreamSet, common: ObjectCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let mut block = BlockHeaderObject {
        name: reader.read_variable_text()?,
        xref_dependent: read_xref_dependant_bit(&mut *reader)?,
        anonymous: reader.read_bit()?,
        has_attributes: reader.read_bit()?,
        is_xref: reader.read_bit()?,
        is_overlaid: reader.read_bit()?,
        loaded: reader.read_bit()?,
        base_point: reader.read_3bit_double()?,
        xref_path: reader.read_variable_text()?,
        ..Default::default()
    };

    // A run of non-zero bytes, one per insert, closed by a zero.
    let mut insert_count = 0usize;
    while reader.read_raw_char()? != 0 {
        insert_count += 1;
    }

    block.description = reader.read_variable_text()?;
    let preview_size = count(reader.read_bit_long()?, "preview byte")?;
    block.preview = reader.read_bytes(preview_size)?;

    block.xref_block = streams.handle_ref()?;
    block.block_entity = streams.handle_ref()?;
    if !block.is_xref && !block.is_overlaid {
        block.first_entity = Some(streams.handle_ref()?);
        block.last_entity = Some(streams.handle_ref()?);
    }
    block.end_block = streams.handle_ref()?;
    for _ in 0..insert_count {
        block.inserts.push(streams.handle_ref()?);
    }
    block.layout = streams.handle_ref()?;

    block.common = common;
    Ok(RawObject::BlockHeader(block))
}

pub(super) fn read_ltype(streams: &mut StreamSet, common: ObjectCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let mut ltype = LtypeObject {
        name: reader.read_variable_text()?,
        xref_dependent: read_xref_dependant_bit(&mut *reader)?,
        description: reader.read_variable_text()?,
        pattern_length: reader.read_bit_double()?,
        alignment: reader.read_raw_char()?,
        ..Default::default()
    };

    let dash_count = reader.read_raw_char()?;
    for _ in 0..dash_count {
        ltype.dashes.push(LtypeDash {
            length: reader.read_bit_double()?,
            shape_code: reader.read_bit_short()?,
            offset: reader.read_2raw_double()?,
            scale: reader.read_bit_double()?,
            rotation: reader.read_bit_double()?,
            shape_flag: reader.read_bit_short()?,
        });
    }
    ltype.strings_area = reader.read_bytes(LTYPE_STRINGS_AREA)?;

    ltype.xref_block = streams.handle_ref()?;
    for _ in 0..dash_count {
        ltype.shape_files.push(streams.handle_ref()?);
    }

    ltype.common = common;
    Ok(RawObject::Ltype(ltype))
}

pub(super) fn read_image_def(streams: &mut StreamSet, common: ObjectCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    Ok(RawObject::ImageDef(ImageDefObject {
        class_version: reader.read_bit_long()?,
        size_in_pixels: reader.read_2raw_double()?,
        file_path: reader.read_variable_text()?,
        loaded: reader.read_bit()?,
        resolution_units: reader.read_raw_char()?,
        pixel_size: reader.read_2raw_double()?,
        common,
    }))
}

pub(super) fn read_image_def_reactor(
    streams: &mut StreamSet,
    common: ObjectCommon,
) -> Result<RawObject> {
    let class_version = streams.object_reader.read_bit_long()?;
    Ok(RawObject::ImageDefReactor(ImageDefReactorObject {
        common,
        class_version,
    }))
}

/// XRECORD keeps its group-code payload as raw bytes.
pub(super) fn read_xrecord(streams: &mut StreamSet, common: ObjectCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let size = count(reader.read_bit_long()?, "xrecord byte")?;
    let data = reader.read_bytes(size)?;
    let cloning_flags = reader.read_bit_short()?;

    Ok(RawObject::XRecord(XRecordObject {
        common,
        data,
        cloning_flags,
    }))
}
