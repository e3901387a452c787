//! Text, attributes and multi-line text

use super::GeometryCommon;
use crate::types::Vector3;

/// Single-line text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub common: GeometryCommon,
    /// Insertion point; its Z is the elevation
    pub position: Vector3,
    pub alignment_point: Vector3,
    pub text: String,
    pub rotation: f64,
    pub oblique_angle: f64,
    pub thickness: f64,
    pub height: f64,
    pub elevation: f64,
    pub width_factor: f64,
    pub horizontal_alignment: i16,
    pub vertical_alignment: i16,
    pub extrusion: Vector3,
}

/// Attribute attached to a block reference
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attrib {
    pub common: GeometryCommon,
    pub position: Vector3,
    pub alignment_point: Vector3,
    pub extrusion: Vector3,
    pub rotation: f64,
    pub elevation: f64,
    pub height: f64,
    pub oblique_angle: f64,
    pub width_factor: f64,
    pub thickness: f64,
    pub position_locked: bool,
    pub tag: String,
    pub text: String,
    /// Bit 1 invisible, 2 constant, 4 verify, 8 preset
    pub flags: u8,
}

impl Attrib {
    pub fn is_invisible(&self) -> bool {
        self.flags & 1 != 0
    }
}

/// Attribute definition inside a block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attdef {
    pub attrib: Attrib,
    pub prompt: String,
}

/// Multi-line text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MText {
    pub common: GeometryCommon,
    pub position: Vector3,
    pub extrusion: Vector3,
    /// Direction of the text baseline
    pub x_axis_direction: Vector3,
    pub height: f64,
    /// Reference rectangle width
    pub rect_width: f64,
    /// Actual height of the laid out text
    pub extents: f64,
    pub extents_width: f64,
    pub text: String,
    /// 1 top left … 9 bottom right
    pub attachment: i16,
    pub drawing_direction: i16,
}

impl MText {
    /// Rotation of the baseline in radians.
    pub fn x_axis_angle(&self) -> f64 {
        self.x_axis_direction.y.atan2(self.x_axis_direction.x)
    }
}
