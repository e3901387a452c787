//! Multiline geometry

use super::GeometryCommon;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MLine {
    pub common: GeometryCommon,
    pub scale: f64,
    /// The open/closed code was 1
    pub opened: bool,
    /// 0 top, 1 zero, 2 bottom
    pub justification: u8,
    pub extrusion: Vector3,
    pub vertices: Vec<Vector3>,
}
