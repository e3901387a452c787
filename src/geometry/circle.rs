//! Circular and elliptical geometry

use super::GeometryCommon;
use crate::types::Vector3;

/// A full circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub common: GeometryCommon,
    /// Center point
    pub position: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub extrusion: Vector3,
}

/// A circular arc, counter-clockwise from `start_angle` to `end_angle`
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: GeometryCommon,
    /// Center point
    pub position: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub extrusion: Vector3,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
}

impl Arc {
    /// Swept angle in radians, always in `[0, 2π)`.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).rem_euclid(std::f64::consts::TAU)
    }
}

/// An ellipse or elliptical arc
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub common: GeometryCommon,
    /// Center point
    pub position: Vector3,
    /// Semi-major axis, relative to the center
    pub major_axis: Vector3,
    pub extrusion: Vector3,
    /// Minor to major axis length ratio
    pub axis_ratio: f64,
    /// Start parameter in radians
    pub start_angle: f64,
    /// End parameter in radians
    pub end_angle: f64,
}
