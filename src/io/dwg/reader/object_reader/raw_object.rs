//! Decoded object records.
//!
//! A [`RawObject`] is the field-for-field content of one stored object.
//! Handles are kept as [`HandleReference`]s; resolve them against the
//! record's own handle before following them.

use bitflags::bitflags;

use super::common::{EntityCommon, ObjectCommon};
use crate::error::{DwgError, Result};
use crate::io::dwg::object_type::DwgObjectType;
use crate::io::dwg::reference_type::HandleReference;
use crate::types::{Handle, LineWeight, Vector2, Vector3};

bitflags! {
    /// Per-vertex flags of heavy polyline vertices
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VertexFlags: u8 {
        /// Extra vertex created by curve fitting
        const CURVE_FIT_EXTRA = 0x01;
        /// Curve-fit tangent defined for this vertex
        const CURVE_FIT_TANGENT = 0x02;
        const SPLINE_FIT = 0x08;
        const SPLINE_FRAME_CONTROL_POINT = 0x10;
        const POLYLINE_3D = 0x20;
        const POLYGON_MESH = 0x40;
        const POLYFACE_MESH = 0x80;
    }
}

impl VertexFlags {
    /// Tangent and spline-frame vertices are not part of the drawn shape.
    pub fn is_construction(&self) -> bool {
        self.intersects(VertexFlags::CURVE_FIT_TANGENT | VertexFlags::SPLINE_FRAME_CONTROL_POINT)
    }
}

bitflags! {
    /// 2D polyline flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PolylineFlags: i16 {
        const CLOSED = 0x01;
        const CURVE_FIT = 0x02;
        const SPLINE_FIT = 0x04;
        const POLYLINE_3D = 0x08;
        const POLYGON_MESH = 0x10;
        const CLOSED_N = 0x20;
        const POLYFACE_MESH = 0x40;
        const CONTINUOUS_LINETYPE = 0x80;
    }
}

bitflags! {
    /// Lightweight polyline flags; most bits say which optional fields follow
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LwPolylineFlags: i16 {
        const HAS_EXTRUSION = 0x001;
        const HAS_THICKNESS = 0x002;
        const HAS_CONST_WIDTH = 0x004;
        const HAS_ELEVATION = 0x008;
        const HAS_BULGES = 0x010;
        const HAS_WIDTHS = 0x020;
        const PLINEGEN = 0x100;
        const CLOSED = 0x200;
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Fields shared by TEXT, ATTRIB and ATTDEF
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextData {
    /// Which optional fields were stored
    pub data_flags: u8,
    pub elevation: f64,
    pub insertion_point: Vector2,
    pub alignment_point: Vector2,
    pub extrusion: Vector3,
    pub thickness: f64,
    pub oblique_angle: f64,
    pub rotation: f64,
    pub height: f64,
    pub width_factor: f64,
    pub value: String,
    pub generation: i16,
    pub horizontal_alignment: i16,
    pub vertical_alignment: i16,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextObject {
    pub common: EntityCommon,
    pub text: TextData,
    pub style: HandleReference,
}

/// ATTRIB or ATTDEF
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeObject {
    pub common: EntityCommon,
    pub text: TextData,
    pub tag: String,
    pub field_length: i16,
    pub flags: u8,
    /// ATTDEF only
    pub prompt: Option<String>,
    pub style: HandleReference,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockObject {
    pub common: EntityCommon,
    pub name: String,
}

/// Array layout of a MINSERT
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MInsertGrid {
    pub column_count: i16,
    pub row_count: i16,
    pub column_spacing: f64,
    pub row_spacing: f64,
}

/// INSERT or MINSERT
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertObject {
    pub common: EntityCommon,
    pub insertion_point: Vector3,
    pub scale: Vector3,
    pub rotation: f64,
    pub extrusion: Vector3,
    pub has_attributes: bool,
    /// MINSERT only
    pub grid: Option<MInsertGrid>,
    pub block_header: HandleReference,
    pub first_attribute: Option<HandleReference>,
    pub last_attribute: Option<HandleReference>,
    pub seqend: Option<HandleReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vertex2DObject {
    pub common: EntityCommon,
    pub flags: VertexFlags,
    pub point: Vector3,
    pub start_width: f64,
    pub end_width: f64,
    pub bulge: f64,
    pub tangent_direction: f64,
}

/// VERTEX_3D, VERTEX_MESH or VERTEX_PFACE
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexObject {
    pub common: EntityCommon,
    pub flags: VertexFlags,
    pub point: Vector3,
}

/// Face record of a polyface mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PfaceFaceObject {
    pub common: EntityCommon,
    /// One-based vertex indices, negative for an invisible edge
    pub indices: [i16; 4],
}

/// Owner of a vertex chain: first and last vertex plus the closing SEQEND.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexChain {
    pub first_vertex: HandleReference,
    pub last_vertex: HandleReference,
    pub seqend: HandleReference,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline2DObject {
    pub common: EntityCommon,
    pub flags: PolylineFlags,
    pub curve_type: i16,
    pub start_width: f64,
    pub end_width: f64,
    pub thickness: f64,
    pub elevation: f64,
    pub extrusion: Vector3,
    pub chain: VertexChain,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline3DObject {
    pub common: EntityCommon,
    pub spline_flags: u8,
    pub closed_flags: u8,
    pub chain: VertexChain,
}

impl Polyline3DObject {
    pub fn is_closed(&self) -> bool {
        self.closed_flags & 1 != 0
    }

    pub fn is_splined(&self) -> bool {
        self.spline_flags != 0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolylinePfaceObject {
    pub common: EntityCommon,
    pub vertex_count: i16,
    pub face_count: i16,
    pub chain: VertexChain,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcObject {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub extrusion: Vector3,
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleObject {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub extrusion: Vector3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineObject {
    pub common: EntityCommon,
    pub start: Vector3,
    pub end: Vector3,
    pub thickness: f64,
    pub extrusion: Vector3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointObject {
    pub common: EntityCommon,
    pub position: Vector3,
    pub thickness: f64,
    pub extrusion: Vector3,
    pub x_axis_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face3DObject {
    pub common: EntityCommon,
    pub has_no_flags: bool,
    pub corners: [Vector3; 4],
    pub invisible_edges: i16,
}

/// SOLID or TRACE
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolidObject {
    pub common: EntityCommon,
    pub thickness: f64,
    pub elevation: f64,
    pub corners: [Vector2; 4],
    pub extrusion: Vector3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EllipseObject {
    pub common: EntityCommon,
    pub center: Vector3,
    pub major_axis: Vector3,
    pub extrusion: Vector3,
    pub axis_ratio: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplineObject {
    pub common: EntityCommon,
    /// 1 control points and knots, 2 fit points
    pub scenario: i32,
    pub degree: i32,
    pub fit_tolerance: f64,
    pub begin_tangent: Vector3,
    pub end_tangent: Vector3,
    pub rational: bool,
    pub closed: bool,
    pub periodic: bool,
    pub knot_tolerance: f64,
    pub control_tolerance: f64,
    pub weighted: bool,
    pub knots: Vec<f64>,
    pub control_points: Vec<Vector3>,
    /// Empty unless `weighted`
    pub weights: Vec<f64>,
    pub fit_points: Vec<Vector3>,
}

/// RAY or XLINE
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RayObject {
    pub common: EntityCommon,
    pub point: Vector3,
    pub vector: Vector3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MTextObject {
    pub common: EntityCommon,
    pub insertion_point: Vector3,
    pub extrusion: Vector3,
    pub x_axis_direction: Vector3,
    pub rect_width: f64,
    pub height: f64,
    pub attachment: i16,
    pub drawing_direction: i16,
    pub extents_height: f64,
    pub extents_width: f64,
    pub text: String,
    pub linespacing_style: i16,
    pub linespacing_factor: f64,
    pub style: HandleReference,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MLineSegment {
    pub parameters: Vec<f64>,
    pub area_fill_parameters: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MLineVertex {
    pub position: Vector3,
    pub direction: Vector3,
    pub miter_direction: Vector3,
    /// One entry per line of the style
    pub segments: Vec<MLineSegment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MLineObject {
    pub common: EntityCommon,
    pub scale: f64,
    pub justification: u8,
    pub base_point: Vector3,
    pub extrusion: Vector3,
    /// 1 open, 3 closed
    pub open_closed: i16,
    pub line_count: u8,
    pub vertices: Vec<MLineVertex>,
    pub style: HandleReference,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LwPolylineObject {
    pub common: EntityCommon,
    pub flags: LwPolylineFlags,
    pub const_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub extrusion: Vector3,
    pub points: Vec<Vector2>,
    pub bulges: Vec<f64>,
    pub widths: Vec<(f64, f64)>,
}

/// IMAGE or WIPEOUT
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageObject {
    pub common: EntityCommon,
    pub class_version: i32,
    pub insertion_point: Vector3,
    pub u_vector: Vector3,
    pub v_vector: Vector3,
    pub size: Vector2,
    /// 1 show, 2 show unaligned, 4 clip, 8 transparency
    pub display_flags: i16,
    pub clipping: bool,
    pub brightness: u8,
    pub contrast: u8,
    pub fade: u8,
    /// 1 rectangular, 2 polygonal
    pub clip_type: i16,
    pub clip_vertices: Vec<Vector2>,
    pub image_def: HandleReference,
    pub image_def_reactor: HandleReference,
}

/// An entity decoded only as far as its common data.
///
/// Produced for entity kinds without a field decoder and for handles-only
/// decodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenericEntity {
    pub common: EntityCommon,
}

// ---------------------------------------------------------------------------
// Non-entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DictionaryObject {
    pub common: ObjectCommon,
    pub cloning_flags: i16,
    pub hard_owner: u8,
    pub entries: Vec<(String, HandleReference)>,
}

impl DictionaryObject {
    pub fn get(&self, name: &str) -> Option<HandleReference> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, h)| *h)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerObject {
    pub common: ObjectCommon,
    pub name: String,
    pub xref_dependent: bool,
    /// Raw state bits
    pub flags: i16,
    pub color_index: i16,
    pub xref_block: HandleReference,
    pub plot_style: HandleReference,
    pub linetype: HandleReference,
}

impl LayerObject {
    pub fn is_frozen(&self) -> bool {
        self.flags & 0x01 != 0
    }

    pub fn is_off(&self) -> bool {
        self.flags & 0x02 != 0
    }

    pub fn is_frozen_in_new_viewports(&self) -> bool {
        self.flags & 0x04 != 0
    }

    pub fn is_locked(&self) -> bool {
        self.flags & 0x08 != 0
    }

    pub fn is_plottable(&self) -> bool {
        self.flags & 0x10 != 0
    }

    pub fn line_weight(&self) -> LineWeight {
        LineWeight::from_index(((self.flags & 0x3E0) >> 5) as u8)
    }
}

/// A table control object (LAYER_CONTROL, BLOCK_CONTROL, LTYPE_CONTROL)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlObject {
    pub common: ObjectCommon,
    pub entries: Vec<HandleReference>,
    /// BLOCK_CONTROL only
    pub model_space: Option<HandleReference>,
    /// BLOCK_CONTROL only
    pub paper_space: Option<HandleReference>,
    /// LTYPE_CONTROL only
    pub by_layer: Option<HandleReference>,
    /// LTYPE_CONTROL only
    pub by_block: Option<HandleReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockHeaderObject {
    pub common: ObjectCommon,
    pub name: String,
    pub xref_dependent: bool,
    pub anonymous: bool,
    pub has_attributes: bool,
    pub is_xref: bool,
    pub is_overlaid: bool,
    pub loaded: bool,
    pub base_point: Vector3,
    pub xref_path: String,
    pub description: String,
    pub preview: Vec<u8>,
    pub xref_block: HandleReference,
    pub block_entity: HandleReference,
    /// Absent for xrefs
    pub first_entity: Option<HandleReference>,
    pub last_entity: Option<HandleReference>,
    pub end_block: HandleReference,
    pub inserts: Vec<HandleReference>,
    pub layout: HandleReference,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LtypeDash {
    pub length: f64,
    pub shape_code: i16,
    pub offset: Vector2,
    pub scale: f64,
    pub rotation: f64,
    pub shape_flag: i16,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LtypeObject {
    pub common: ObjectCommon,
    pub name: String,
    pub xref_dependent: bool,
    pub description: String,
    pub pattern_length: f64,
    pub alignment: u8,
    pub dashes: Vec<LtypeDash>,
    pub strings_area: Vec<u8>,
    pub xref_block: HandleReference,
    /// One per dash
    pub shape_files: Vec<HandleReference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageDefObject {
    pub common: ObjectCommon,
    pub class_version: i32,
    pub size_in_pixels: Vector2,
    pub file_path: String,
    pub loaded: bool,
    pub resolution_units: u8,
    pub pixel_size: Vector2,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageDefReactorObject {
    pub common: ObjectCommon,
    pub class_version: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XRecordObject {
    pub common: ObjectCommon,
    pub data: Vec<u8>,
    pub cloning_flags: i16,
}

// ---------------------------------------------------------------------------
// RawObject
// ---------------------------------------------------------------------------

/// One decoded object.
///
/// Variants shared by several kinds (`Attribute`, `Insert`, `Vertex`,
/// `Solid`, `Ray`, `Image`, `Control`) tell them apart through
/// [`RawObject::object_type`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawObject {
    Text(TextObject),
    Attribute(AttributeObject),
    Block(BlockObject),
    Insert(InsertObject),
    Vertex2D(Vertex2DObject),
    Vertex(VertexObject),
    PfaceFace(PfaceFaceObject),
    Polyline2D(Polyline2DObject),
    Polyline3D(Polyline3DObject),
    PolylinePface(PolylinePfaceObject),
    Arc(ArcObject),
    Circle(CircleObject),
    Line(LineObject),
    Point(PointObject),
    Face3D(Face3DObject),
    Solid(SolidObject),
    Ellipse(EllipseObject),
    Spline(SplineObject),
    Ray(RayObject),
    MText(MTextObject),
    MLine(MLineObject),
    LwPolyline(LwPolylineObject),
    Image(ImageObject),
    Entity(GenericEntity),
    Dictionary(DictionaryObject),
    Layer(LayerObject),
    Control(ControlObject),
    BlockHeader(BlockHeaderObject),
    Ltype(LtypeObject),
    ImageDef(ImageDefObject),
    ImageDefReactor(ImageDefReactorObject),
    XRecord(XRecordObject),
}

macro_rules! variant_access {
    ($as_fn:ident, $into_fn:ident, $variant:ident, $ty:ty) => {
        pub fn $as_fn(&self) -> Result<&$ty> {
            match self {
                RawObject::$variant(v) => Ok(v),
                other => Err(other.mismatch(stringify!($variant))),
            }
        }

        pub fn $into_fn(self) -> Result<$ty> {
            match self {
                RawObject::$variant(v) => Ok(v),
                other => Err(other.mismatch(stringify!($variant))),
            }
        }
    };
}

impl RawObject {
    /// Common entity data, for entities.
    pub fn entity(&self) -> Option<&EntityCommon> {
        let common = match self {
            RawObject::Text(o) => &o.common,
            RawObject::Attribute(o) => &o.common,
            RawObject::Block(o) => &o.common,
            RawObject::Insert(o) => &o.common,
            RawObject::Vertex2D(o) => &o.common,
            RawObject::Vertex(o) => &o.common,
            RawObject::PfaceFace(o) => &o.common,
            RawObject::Polyline2D(o) => &o.common,
            RawObject::Polyline3D(o) => &o.common,
            RawObject::PolylinePface(o) => &o.common,
            RawObject::Arc(o) => &o.common,
            RawObject::Circle(o) => &o.common,
            RawObject::Line(o) => &o.common,
            RawObject::Point(o) => &o.common,
            RawObject::Face3D(o) => &o.common,
            RawObject::Solid(o) => &o.common,
            RawObject::Ellipse(o) => &o.common,
            RawObject::Spline(o) => &o.common,
            RawObject::Ray(o) => &o.common,
            RawObject::MText(o) => &o.common,
            RawObject::MLine(o) => &o.common,
            RawObject::LwPolyline(o) => &o.common,
            RawObject::Image(o) => &o.common,
            RawObject::Entity(o) => &o.common,
            _ => return None,
        };
        Some(common)
    }

    /// Common data, for non-entity objects.
    pub fn object(&self) -> Option<&ObjectCommon> {
        let common = match self {
            RawObject::Dictionary(o) => &o.common,
            RawObject::Layer(o) => &o.common,
            RawObject::Control(o) => &o.common,
            RawObject::BlockHeader(o) => &o.common,
            RawObject::Ltype(o) => &o.common,
            RawObject::ImageDef(o) => &o.common,
            RawObject::ImageDefReactor(o) => &o.common,
            RawObject::XRecord(o) => &o.common,
            _ => return None,
        };
        Some(common)
    }

    pub fn is_entity(&self) -> bool {
        self.entity().is_some()
    }

    pub fn object_type(&self) -> DwgObjectType {
        match (self.entity(), self.object()) {
            (Some(e), _) => e.object_type,
            (_, Some(o)) => o.object_type,
            _ => DwgObjectType::Undefined,
        }
    }

    pub fn handle(&self) -> Handle {
        match (self.entity(), self.object()) {
            (Some(e), _) => e.handle,
            (_, Some(o)) => o.handle,
            _ => Handle::NULL,
        }
    }

    fn mismatch(&self, expected: &'static str) -> DwgError {
        DwgError::VariantMismatch {
            expected,
            found: self.object_type(),
        }
    }

    variant_access!(as_text, into_text, Text, TextObject);
    variant_access!(as_attribute, into_attribute, Attribute, AttributeObject);
    variant_access!(as_block, into_block, Block, BlockObject);
    variant_access!(as_insert, into_insert, Insert, InsertObject);
    variant_access!(as_vertex_2d, into_vertex_2d, Vertex2D, Vertex2DObject);
    variant_access!(as_vertex, into_vertex, Vertex, VertexObject);
    variant_access!(as_pface_face, into_pface_face, PfaceFace, PfaceFaceObject);
    variant_access!(as_polyline_2d, into_polyline_2d, Polyline2D, Polyline2DObject);
    variant_access!(as_polyline_3d, into_polyline_3d, Polyline3D, Polyline3DObject);
    variant_access!(as_polyline_pface, into_polyline_pface, PolylinePface, PolylinePfaceObject);
    variant_access!(as_arc, into_arc, Arc, ArcObject);
    variant_access!(as_circle, into_circle, Circle, CircleObject);
    variant_access!(as_line, into_line, Line, LineObject);
    variant_access!(as_point, into_point, Point, PointObject);
    variant_access!(as_face_3d, into_face_3d, Face3D, Face3DObject);
    variant_access!(as_solid, into_solid, Solid, SolidObject);
    variant_access!(as_ellipse, into_ellipse, Ellipse, EllipseObject);
    variant_access!(as_spline, into_spline, Spline, SplineObject);
    variant_access!(as_ray, into_ray, Ray, RayObject);
    variant_access!(as_mtext, into_mtext, MText, MTextObject);
    variant_access!(as_mline, into_mline, MLine, MLineObject);
    variant_access!(as_lwpolyline, into_lwpolyline, LwPolyline, LwPolylineObject);
    variant_access!(as_image, into_image, Image, ImageObject);
    variant_access!(as_generic_entity, into_generic_entity, Entity, GenericEntity);
    variant_access!(as_dictionary, into_dictionary, Dictionary, DictionaryObject);
    variant_access!(as_layer, into_layer, Layer, LayerObject);
    variant_access!(as_control, into_control, Control, ControlObject);
    variant_access!(as_block_header, into_block_header, BlockHeader, BlockHeaderObject);
    variant_access!(as_ltype, into_ltype, Ltype, LtypeObject);
    variant_access!(as_image_def, into_image_def, ImageDef, ImageDefObject);
    variant_access!(as_image_def_reactor, into_image_def_reactor, ImageDefReactor, ImageDefReactorObject);
    variant_access!(as_xrecord, into_xrecord, XRecord, XRecordObject);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle() -> RawObject {
        RawObject::Circle(CircleObject {
            common: EntityCommon {
                object_type: DwgObjectType::Circle,
                handle: Handle::new(0x2E),
                ..Default::default()
            },
            radius: 2.5,
            ..Default::default()
        })
    }

    #[test]
    fn test_identity() {
        let obj = circle();
        assert_eq!(obj.object_type(), DwgObjectType::Circle);
        assert_eq!(obj.handle(), Handle::new(0x2E));
        assert!(obj.is_entity());
        assert!(obj.object().is_none());
    }

    #[test]
    fn test_variant_access() {
        let obj = circle();
        assert_eq!(obj.as_circle().unwrap().radius, 2.5);

        match obj.as_line() {
            Err(DwgError::VariantMismatch { expected, found }) => {
                assert_eq!(expected, "Line");
                assert_eq!(found, DwgObjectType::Circle);
            }
            other => panic!("unexpected {:?}", other),
        }

        let circle = obj.into_circle().unwrap();
        assert_eq!(circle.common.handle, Handle::new(0x2E));
    }

    #[test]
    fn test_non_entity_identity() {
        let obj = RawObject::Layer(LayerObject {
            common: ObjectCommon {
                object_type: DwgObjectType::Layer,
                handle: Handle::new(0x10),
                ..Default::default()
            },
            name: "WALLS".into(),
            flags: 0x10 | (5 << 5),
            ..Default::default()
        });
        assert!(!obj.is_entity());
        assert_eq!(obj.object_type(), DwgObjectType::Layer);
        assert_eq!(obj.handle(), Handle::new(0x10));

        let layer = obj.as_layer().unwrap();
        assert!(layer.is_plottable());
        assert!(!layer.is_frozen());
        assert_eq!(layer.line_weight(), LineWeight::from_index(5));
    }

    #[test]
    fn test_vertex_construction_flags() {
        assert!(VertexFlags::from_bits_truncate(0x02).is_construction());
        assert!(VertexFlags::from_bits_truncate(0x10).is_construction());
        assert!(!VertexFlags::from_bits_truncate(0x08).is_construction());
        assert!(!VertexFlags::empty().is_construction());
    }

    #[test]
    fn test_dictionary_lookup() {
        let dict = DictionaryObject {
            entries: vec![("ACAD_GROUP".into(), HandleReference::new(2, 1, 0x0D))],
            ..Default::default()
        };
        assert_eq!(dict.get("acad_group").map(|h| h.value), Some(0x0D));
        assert!(dict.get("ACAD_MLINESTYLE").is_none());
    }
}
