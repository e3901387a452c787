//! Drawable geometry
//!
//! [`Geometry`] is what the builder hands back for one entity: plain data
//! with the color already resolved and the EED already rendered. Every
//! variant carries a [`GeometryCommon`].

use crate::io::dwg::object_type::DwgObjectType;
use crate::types::{Handle, Rgb};

pub mod circle;
pub mod image;
pub mod line;
pub mod mline;
pub mod point;
pub mod polyline;
pub mod solid;
pub mod spline;
pub mod text;

pub use circle::{Arc, Circle, Ellipse};
pub use image::{Image, ResolutionUnit};
pub use line::{Line, Ray, XLine};
pub use mline::MLine;
pub use point::Point3D;
pub use polyline::{LwPolyline, Polyline2D, Polyline3D, PolylinePFace};
pub use solid::{Face3D, Solid};
pub use spline::Spline;
pub use text::{Attdef, Attrib, MText, Text};

/// Data shared by every geometry variant
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCommon {
    /// Handle of the entity the geometry was built from
    pub handle: Handle,
    /// Resolved color; `None` for BYBLOCK-like indices or a missing layer
    pub color: Option<Rgb>,
    /// Rendered EED records, one string per record that rendered
    pub eed: Vec<String>,
    /// Attributes of the block reference the geometry was requested for
    pub block_attributes: Vec<Attrib>,
}

impl GeometryCommon {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            ..Default::default()
        }
    }
}

/// Placeholder for entity kinds without a geometry mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Unknown {
    pub common: GeometryCommon,
    /// Kind of the decoded object
    pub object_type: DwgObjectType,
}

/// Geometry built from one entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Arc(Arc),
    Point3D(Point3D),
    Polyline3D(Polyline3D),
    LwPolyline(LwPolyline),
    Polyline2D(Polyline2D),
    Circle(Circle),
    Attrib(Attrib),
    Attdef(Attdef),
    Ellipse(Ellipse),
    Line(Line),
    Ray(Ray),
    Spline(Spline),
    Text(Text),
    Solid(Solid),
    Image(Image),
    MLine(MLine),
    MText(MText),
    PolylinePFace(PolylinePFace),
    XLine(XLine),
    Face3D(Face3D),
    Unknown(Unknown),
}

impl Geometry {
    pub fn common(&self) -> &GeometryCommon {
        match self {
            Geometry::Arc(g) => &g.common,
            Geometry::Point3D(g) => &g.common,
            Geometry::Polyline3D(g) => &g.common,
            Geometry::LwPolyline(g) => &g.common,
            Geometry::Polyline2D(g) => &g.common,
            Geometry::Circle(g) => &g.common,
            Geometry::Attrib(g) => &g.common,
            Geometry::Attdef(g) => &g.attrib.common,
            Geometry::Ellipse(g) => &g.common,
            Geometry::Line(g) => &g.common,
            Geometry::Ray(g) => &g.common,
            Geometry::Spline(g) => &g.common,
            Geometry::Text(g) => &g.common,
            Geometry::Solid(g) => &g.common,
            Geometry::Image(g) => &g.common,
            Geometry::MLine(g) => &g.common,
            Geometry::MText(g) => &g.common,
            Geometry::PolylinePFace(g) => &g.common,
            Geometry::XLine(g) => &g.common,
            Geometry::Face3D(g) => &g.common,
            Geometry::Unknown(g) => &g.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut GeometryCommon {
        match self {
            Geometry::Arc(g) => &mut g.common,
            Geometry::Point3D(g) => &mut g.common,
            Geometry::Polyline3D(g) => &mut g.common,
            Geometry::LwPolyline(g) => &mut g.common,
            Geometry::Polyline2D(g) => &mut g.common,
            Geometry::Circle(g) => &mut g.common,
            Geometry::Attrib(g) => &mut g.common,
            Geometry::Attdef(g) => &mut g.attrib.common,
            Geometry::Ellipse(g) => &mut g.common,
            Geometry::Line(g) => &mut g.common,
            Geometry::Ray(g) => &mut g.common,
            Geometry::Spline(g) => &mut g.common,
            Geometry::Text(g) => &mut g.common,
            Geometry::Solid(g) => &mut g.common,
            Geometry::Image(g) => &mut g.common,
            Geometry::MLine(g) => &mut g.common,
            Geometry::MText(g) => &mut g.common,
            Geometry::PolylinePFace(g) => &mut g.common,
            Geometry::XLine(g) => &mut g.common,
            Geometry::Face3D(g) => &mut g.common,
            Geometry::Unknown(g) => &mut g.common,
        }
    }

    pub fn handle(&self) -> Handle {
        self.common().handle
    }

    pub fn color(&self) -> Option<Rgb> {
        self.common().color
    }

    pub fn eed(&self) -> &[String] {
        &self.common().eed
    }

    pub fn block_attributes(&self) -> &[Attrib] {
        &self.common().block_attributes
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Geometry::Unknown(_))
    }

    /// Geometry type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Arc(_) => "ARC",
            Geometry::Point3D(_) => "POINT",
            Geometry::Polyline3D(_) => "POLYLINE3D",
            Geometry::LwPolyline(_) => "LWPOLYLINE",
            Geometry::Polyline2D(_) => "POLYLINE2D",
            Geometry::Circle(_) => "CIRCLE",
            Geometry::Attrib(_) => "ATTRIB",
            Geometry::Attdef(_) => "ATTDEF",
            Geometry::Ellipse(_) => "ELLIPSE",
            Geometry::Line(_) => "LINE",
            Geometry::Ray(_) => "RAY",
            Geometry::Spline(_) => "SPLINE",
            Geometry::Text(_) => "TEXT",
            Geometry::Solid(_) => "SOLID",
            Geometry::Image(_) => "IMAGE",
            Geometry::MLine(_) => "MLINE",
            Geometry::MText(_) => "MTEXT",
            Geometry::PolylinePFace(_) => "POLYLINE_PFACE",
            Geometry::XLine(_) => "XLINE",
            Geometry::Face3D(_) => "3DFACE",
            Geometry::Unknown(_) => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;

    #[test]
    fn test_common_access() {
        let mut g = Geometry::Circle(Circle {
            common: GeometryCommon::new(Handle::new(0x2F)),
            position: Vector3::new(1.0, 2.0, 0.0),
            radius: 3.0,
            thickness: 0.0,
            extrusion: Vector3::UNIT_Z,
        });
        assert_eq!(g.handle(), Handle::new(0x2F));
        assert!(g.color().is_none());

        g.common_mut().eed.push("ABC".into());
        assert_eq!(g.eed(), ["ABC".to_string()]);
        assert_eq!(g.type_name(), "CIRCLE");
        assert!(!g.is_unknown());
    }

    #[test]
    fn test_attdef_common_lives_in_attrib() {
        let mut attdef = Attdef::default();
        attdef.attrib.common.handle = Handle::new(9);
        let g = Geometry::Attdef(attdef);
        assert_eq!(g.handle(), Handle::new(9));
    }
}
