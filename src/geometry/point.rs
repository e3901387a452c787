//! Point geometry

use super::GeometryCommon;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct Point3D {
    pub common: GeometryCommon,
    pub position: Vector3,
    pub extrusion: Vector3,
    /// Angle of the point's X axis in the OCS, in radians
    pub x_axis_angle: f64,
    pub thickness: f64,
}
