//! Entity field decoders (R2000 layouts).
//!
//! Each reader is called with the stream cursor just past the common entity
//! data, and with the handle stream just past the common entity handles.
//! Fields are read in storage order; the order is fixed by the format.

use crate::error::{DwgError, Result};
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::types::{Vector2, Vector3};

use super::common::EntityCommon;
use super::raw_object::*;
use super::StreamSet;

/// Validate a stored element count.
pub(super) fn count(value: i32, what: &str) -> Result<usize> {
    usize::try_from(value).map_err(|_| DwgError::InvalidFormat(format!("negative {what} count {value}")))
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn read_text_data(streams: &mut StreamSet) -> Result<TextData> {
    let reader = &mut streams.object_reader;
    let mut text = TextData {
        data_flags: reader.read_raw_char()?,
        width_factor: 1.0,
        ..Default::default()
    };
    let flags = text.data_flags;

    if flags & 0x01 == 0 {
        text.elevation = reader.read_raw_double()?;
    }
    text.insertion_point = reader.read_2raw_double()?;
    text.alignment_point = if flags & 0x02 == 0 {
        reader.read_2bit_double_with_default(text.insertion_point)?
    } else {
        text.insertion_point
    };
    text.extrusion = reader.read_bit_extrusion()?;
    text.thickness = reader.read_bit_thickness()?;
    if flags & 0x04 == 0 {
        text.oblique_angle = reader.read_raw_double()?;
    }
    if flags & 0x08 == 0 {
        text.rotation = reader.read_raw_double()?;
    }
    text.height = reader.read_raw_double()?;
    if flags & 0x10 == 0 {
        text.width_factor = reader.read_raw_double()?;
    }
    text.value = reader.read_variable_text()?;
    if flags & 0x20 == 0 {
        text.generation = reader.read_bit_short()?;
    }
    if flags & 0x40 == 0 {
        text.horizontal_alignment = reader.read_bit_short()?;
    }
    if flags & 0x80 == 0 {
        text.vertical_alignment = reader.read_bit_short()?;
    }

    Ok(text)
}

pub(super) fn read_text(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let text = read_text_data(streams)?;
    let style = streams.handle_ref()?;
    Ok(RawObject::Text(TextObject {
        common,
        text,
        style,
    }))
}

/// ATTRIB, or ATTDEF when `definition` is set (adds the prompt).
pub(super) fn read_attribute(
    streams: &mut StreamSet,
    common: EntityCommon,
    definition: bool,
) -> Result<RawObject> {
    let text = read_text_data(streams)?;
    let tag = streams.read_text()?;
    let field_length = streams.object_reader.read_bit_short()?;
    let flags = streams.object_reader.read_raw_char()?;
    let prompt = if definition {
        Some(streams.read_text()?)
    } else {
        None
    };
    let style = streams.handle_ref()?;

    Ok(RawObject::Attribute(AttributeObject {
        common,
        text,
        tag,
        field_length,
        flags,
        prompt,
        style,
    }))
}

// ---------------------------------------------------------------------------
// Blocks and inserts
// ---------------------------------------------------------------------------

pub(super) fn read_block(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let name = streams.read_text()?;
    Ok(RawObject::Block(BlockObject { common, name }))
}

/// INSERT, or MINSERT when `multiple` is set.
pub(super) fn read_insert(
    streams: &mut StreamSet,
    common: EntityCommon,
    multiple: bool,
) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let insertion_point = reader.read_3bit_double()?;

    // Scale: BB selects which components are stored.
    let scale = match reader.read_2bits()? {
        3 => Vector3::new(1.0, 1.0, 1.0),
        1 => {
            let y = reader.read_bit_double_with_default(1.0)?;
            let z = reader.read_bit_double_with_default(1.0)?;
            Vector3::new(1.0, y, z)
        }
        2 => {
            let x = reader.read_raw_double()?;
            Vector3::new(x, x, x)
        }
        _ => {
            let x = reader.read_raw_double()?;
            let y = reader.read_bit_double_with_default(x)?;
            let z = reader.read_bit_double_with_default(x)?;
            Vector3::new(x, y, z)
        }
    };

    let rotation = reader.read_bit_double()?;
    let extrusion = reader.read_3bit_double()?;
    let has_attributes = reader.read_bit()?;

    let grid = if multiple {
        Some(MInsertGrid {
            column_count: reader.read_bit_short()?,
            row_count: reader.read_bit_short()?,
            column_spacing: reader.read_bit_double()?,
            row_spacing: reader.read_bit_double()?,
        })
    } else {
        None
    };

    let block_header = streams.handle_ref()?;
    let (first_attribute, last_attribute, seqend) = if has_attributes {
        (
            Some(streams.handle_ref()?),
            Some(streams.handle_ref()?),
            Some(streams.handle_ref()?),
        )
    } else {
        (None, None, None)
    };

    Ok(RawObject::Insert(InsertObject {
        common,
        insertion_point,
        scale,
        rotation,
        extrusion,
        has_attributes,
        grid,
        block_header,
        first_attribute,
        last_attribute,
        seqend,
    }))
}

// ---------------------------------------------------------------------------
// Vertices and polylines
// ---------------------------------------------------------------------------

pub(super) fn read_vertex_2d(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let flags = VertexFlags::from_bits_retain(reader.read_raw_char()?);
    let point = reader.read_3bit_double()?;

    // A negative start width stands for both widths.
    let mut start_width = reader.read_bit_double()?;
    let end_width = if start_width < 0.0 {
        start_width = start_width.abs();
        start_width
    } else {
        reader.read_bit_double()?
    };

    let bulge = reader.read_bit_double()?;
    let tangent_direction = reader.read_bit_double()?;

    Ok(RawObject::Vertex2D(Vertex2DObject {
        common,
        flags,
        point,
        start_width,
        end_width,
        bulge,
        tangent_direction,
    }))
}

/// VERTEX_3D, VERTEX_MESH and VERTEX_PFACE share one layout.
pub(super) fn read_vertex(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let flags = VertexFlags::from_bits_retain(streams.object_reader.read_raw_char()?);
    let point = streams.object_reader.read_3bit_double()?;
    Ok(RawObject::Vertex(VertexObject {
        common,
        flags,
        point,
    }))
}

pub(super) fn read_pface_face(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let mut indices = [0i16; 4];
    for index in indices.iter_mut() {
        *index = streams.object_reader.read_bit_short()?;
    }
    Ok(RawObject::PfaceFace(PfaceFaceObject { common, indices }))
}

fn read_vertex_chain(streams: &mut StreamSet) -> Result<VertexChain> {
    Ok(VertexChain {
        first_vertex: streams.handle_ref()?,
        last_vertex: streams.handle_ref()?,
        seqend: streams.handle_ref()?,
    })
}

pub(super) fn read_polyline_2d(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let flags = PolylineFlags::from_bits_retain(reader.read_bit_short()?);
    let curve_type = reader.read_bit_short()?;
    let start_width = reader.read_bit_double()?;
    let end_width = reader.read_bit_double()?;
    let thickness = reader.read_bit_thickness()?;
    let elevation = reader.read_bit_double()?;
    let extrusion = reader.read_bit_extrusion()?;
    let chain = read_vertex_chain(streams)?;

    Ok(RawObject::Polyline2D(Polyline2DObject {
        common,
        flags,
        curve_type,
        start_width,
        end_width,
        thickness,
        elevation,
        extrusion,
        chain,
    }))
}

pub(super) fn read_polyline_3d(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let spline_flags = streams.object_reader.read_raw_char()?;
    let closed_flags = streams.object_reader.read_raw_char()?;
    let chain = read_vertex_chain(streams)?;
    Ok(RawObject::Polyline3D(Polyline3DObject {
        common,
        spline_flags,
        closed_flags,
        chain,
    }))
}

pub(super) fn read_polyline_pface(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let vertex_count = streams.object_reader.read_bit_short()?;
    let face_count = streams.object_reader.read_bit_short()?;
    let chain = read_vertex_chain(streams)?;
    Ok(RawObject::PolylinePface(PolylinePfaceObject {
        common,
        vertex_count,
        face_count,
        chain,
    }))
}

// ---------------------------------------------------------------------------
// Basic geometry
// ---------------------------------------------------------------------------

pub(super) fn read_arc(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    Ok(RawObject::Arc(ArcObject {
        center: reader.read_3bit_double()?,
        radius: reader.read_bit_double()?,
        thickness: reader.read_bit_thickness()?,
        extrusion: reader.read_bit_extrusion()?,
        start_angle: reader.read_bit_double()?,
        end_angle: reader.read_bit_double()?,
        common,
    }))
}

pub(super) fn read_circle(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    Ok(RawObject::Circle(CircleObject {
        center: reader.read_3bit_double()?,
        radius: reader.read_bit_double()?,
        thickness: reader.read_bit_thickness()?,
        extrusion: reader.read_bit_extrusion()?,
        common,
    }))
}

pub(super) fn read_line(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let z_is_zero = reader.read_bit()?;

    let x1 = reader.read_raw_double()?;
    let x2 = reader.read_bit_double_with_default(x1)?;
    let y1 = reader.read_raw_double()?;
    let y2 = reader.read_bit_double_with_default(y1)?;
    let (z1, z2) = if z_is_zero {
        (0.0, 0.0)
    } else {
        let z1 = reader.read_raw_double()?;
        (z1, reader.read_bit_double_with_default(z1)?)
    };

    Ok(RawObject::Line(LineObject {
        start: Vector3::new(x1, y1, z1),
        end: Vector3::new(x2, y2, z2),
        thickness: reader.read_bit_thickness()?,
        extrusion: reader.read_bit_extrusion()?,
        common,
    }))
}

pub(super) fn read_point(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    Ok(RawObject::Point(PointObject {
        position: reader.read_3bit_double()?,
        thickness: reader.read_bit_thickness()?,
        extrusion: reader.read_bit_extrusion()?,
        x_axis_angle: reader.read_bit_double()?,
        common,
    }))
}

pub(super) fn read_3d_face(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let has_no_flags = reader.read_bit()?;
    let z_is_zero = reader.read_bit()?;

    let x = reader.read_raw_double()?;
    let y = reader.read_raw_double()?;
    let z = if z_is_zero { 0.0 } else { reader.read_raw_double()? };

    // Each later corner defaults to the one before it.
    let mut corners = [Vector3::new(x, y, z); 4];
    for i in 1..4 {
        let prev = corners[i - 1];
        corners[i] = Vector3::new(
            reader.read_bit_double_with_default(prev.x)?,
            reader.read_bit_double_with_default(prev.y)?,
            reader.read_bit_double_with_default(prev.z)?,
        );
    }

    let invisible_edges = if has_no_flags {
        0
    } else {
        reader.read_bit_short()?
    };

    Ok(RawObject::Face3D(Face3DObject {
        common,
        has_no_flags,
        corners,
        invisible_edges,
    }))
}

/// SOLID and TRACE share one layout.
pub(super) fn read_solid(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let thickness = reader.read_bit_thickness()?;
    let elevation = reader.read_bit_double()?;
    let mut corners = [Vector2::ZERO; 4];
    for corner in corners.iter_mut() {
        *corner = reader.read_2raw_double()?;
    }
    let extrusion = reader.read_bit_extrusion()?;

    Ok(RawObject::Solid(SolidObject {
        common,
        thickness,
        elevation,
        corners,
        extrusion,
    }))
}

pub(super) fn read_ellipse(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    Ok(RawObject::Ellipse(EllipseObject {
        center: reader.read_3bit_double()?,
        major_axis: reader.read_3bit_double()?,
        extrusion: reader.read_3bit_double()?,
        axis_ratio: reader.read_bit_double()?,
        start_angle: reader.read_bit_double()?,
        end_angle: reader.read_bit_double()?,
        common,
    }))
}

pub(super) fn read_spline(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let mut spline = SplineObject {
        scenario: reader.read_bit_long()?,
        degree: reader.read_bit_long()?,
        ..Default::default()
    };

    let mut knot_count = 0;
    let mut control_count = 0;
    let mut fit_count = 0;

    match spline.scenario {
        2 => {
            spline.fit_tolerance = reader.read_bit_double()?;
            spline.begin_tangent = reader.read_3bit_double()?;
            spline.end_tangent = reader.read_3bit_double()?;
            fit_count = count(reader.read_bit_long()?, "fit point")?;
        }
        1 => {
            spline.rational = reader.read_bit()?;
            spline.closed = reader.read_bit()?;
            spline.periodic = reader.read_bit()?;
            spline.knot_tolerance = reader.read_bit_double()?;
            spline.control_tolerance = reader.read_bit_double()?;
            knot_count = count(reader.read_bit_long()?, "knot")?;
            control_count = count(reader.read_bit_long()?, "control point")?;
            spline.weighted = reader.read_bit()?;
        }
        other => {
            return Err(DwgError::InvalidFormat(format!(
                "unknown spline scenario {other}"
            )))
        }
    }

    for _ in 0..knot_count {
        spline.knots.push(reader.read_bit_double()?);
    }
    for _ in 0..control_count {
        spline.control_points.push(reader.read_3bit_double()?);
        if spline.weighted {
            spline.weights.push(reader.read_bit_double()?);
        }
    }
    for _ in 0..fit_count {
        spline.fit_points.push(reader.read_3bit_double()?);
    }

    spline.common = common;
    Ok(RawObject::Spline(spline))
}

/// RAY and XLINE share one layout.
pub(super) fn read_ray(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let point = streams.object_reader.read_3bit_double()?;
    let vector = streams.object_reader.read_3bit_double()?;
    Ok(RawObject::Ray(RayObject {
        common,
        point,
        vector,
    }))
}

// ---------------------------------------------------------------------------
// Complex entities
// ---------------------------------------------------------------------------

pub(super) fn read_mtext(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let mut mtext = MTextObject {
        insertion_point: reader.read_3bit_double()?,
        extrusion: reader.read_3bit_double()?,
        x_axis_direction: reader.read_3bit_double()?,
        rect_width: reader.read_bit_double()?,
        height: reader.read_bit_double()?,
        attachment: reader.read_bit_short()?,
        drawing_direction: reader.read_bit_short()?,
        extents_height: reader.read_bit_double()?,
        extents_width: reader.read_bit_double()?,
        text: reader.read_variable_text()?,
        linespacing_style: reader.read_bit_short()?,
        linespacing_factor: reader.read_bit_double()?,
        ..Default::default()
    };
    // Unknown bit
    let _ = reader.read_bit()?;

    mtext.style = streams.handle_ref()?;
    mtext.common = common;
    Ok(RawObject::MText(mtext))
}

pub(super) fn read_mline(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let mut mline = MLineObject {
        scale: reader.read_bit_double()?,
        justification: reader.read_raw_char()?,
        base_point: reader.read_3bit_double()?,
        extrusion: reader.read_3bit_double()?,
        open_closed: reader.read_bit_short()?,
        line_count: reader.read_raw_char()?,
        ..Default::default()
    };

    let vertex_count = count(reader.read_bit_short()? as i32, "mline vertex")?;
    for _ in 0..vertex_count {
        let mut vertex = MLineVertex {
            position: reader.read_3bit_double()?,
            direction: reader.read_3bit_double()?,
            miter_direction: reader.read_3bit_double()?,
            segments: Vec::with_capacity(mline.line_count as usize),
        };
        for _ in 0..mline.line_count {
            let mut segment = MLineSegment::default();
            let parameter_count = count(reader.read_bit_short()? as i32, "mline parameter")?;
            for _ in 0..parameter_count {
                segment.parameters.push(reader.read_bit_double()?);
            }
            let fill_count = count(reader.read_bit_short()? as i32, "mline area fill")?;
            for _ in 0..fill_count {
                segment.area_fill_parameters.push(reader.read_bit_double()?);
            }
            vertex.segments.push(segment);
        }
        mline.vertices.push(vertex);
    }

    mline.style = streams.handle_ref()?;
    mline.common = common;
    Ok(RawObject::MLine(mline))
}

pub(super) fn read_lwpolyline(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let flags = LwPolylineFlags::from_bits_retain(reader.read_bit_short()?);

    let mut lw = LwPolylineObject {
        flags,
        extrusion: Vector3::UNIT_Z,
        ..Default::default()
    };

    if flags.contains(LwPolylineFlags::HAS_CONST_WIDTH) {
        lw.const_width = reader.read_bit_double()?;
    }
    if flags.contains(LwPolylineFlags::HAS_ELEVATION) {
        lw.elevation = reader.read_bit_double()?;
    }
    if flags.contains(LwPolylineFlags::HAS_THICKNESS) {
        lw.thickness = reader.read_bit_double()?;
    }
    if flags.contains(LwPolylineFlags::HAS_EXTRUSION) {
        lw.extrusion = reader.read_3bit_double()?;
    }

    let point_count = count(reader.read_bit_long()?, "lwpolyline point")?;
    let bulge_count = if flags.contains(LwPolylineFlags::HAS_BULGES) {
        count(reader.read_bit_long()?, "lwpolyline bulge")?
    } else {
        0
    };
    let width_count = if flags.contains(LwPolylineFlags::HAS_WIDTHS) {
        count(reader.read_bit_long()?, "lwpolyline width")?
    } else {
        0
    };

    // The first point is raw, each later one defaults to its predecessor.
    let mut previous = None;
    for _ in 0..point_count {
        let point = match previous {
            None => reader.read_2raw_double()?,
            Some(prev) => reader.read_2bit_double_with_default(prev)?,
        };
        lw.points.push(point);
        previous = Some(point);
    }
    for _ in 0..bulge_count {
        lw.bulges.push(reader.read_bit_double()?);
    }
    for _ in 0..width_count {
        let start = reader.read_bit_double()?;
        let end = reader.read_bit_double()?;
        lw.widths.push((start, end));
    }

    lw.common = common;
    Ok(RawObject::LwPolyline(lw))
}

/// IMAGE and WIPEOUT share one layout.
pub(super) fn read_image(streams: &mut StreamSet, common: EntityCommon) -> Result<RawObject> {
    let reader = &mut streams.object_reader;
    let mut image = ImageObject {
        class_version: reader.read_bit_long()?,
        insertion_point: reader.read_3bit_double()?,
        u_vector: reader.read_3bit_double()?,
        v_vector: reader.read_3bit_double()?,
        size: reader.read_2raw_double()?,
        display_flags: reader.read_bit_short()?,
        clipping: reader.read_bit()?,
        brightness: reader.read_raw_char()?,
        contrast: reader.read_raw_char()?,
        fade: reader.read_raw_char()?,
        clip_type: reader.read_bit_short()?,
        ..Default::default()
    };

    if image.clip_type == 1 {
        image.clip_vertices.push(reader.read_2raw_double()?);
        image.clip_vertices.push(reader.read_2raw_double()?);
    } else {
        let vertex_count = count(reader.read_bit_long()?, "clip vertex")?;
        for _ in 0..vertex_count {
            image.clip_vertices.push(reader.read_2raw_double()?);
        }
    }

    image.image_def = streams.handle_ref()?;
    image.image_def_reactor = streams.handle_ref()?;
    image.common = common;
    Ok(RawObject::Image(image))
}
