//! Straight geometry: bounded lines and the two infinite kinds

use super::GeometryCommon;
use crate::types::Vector3;

/// A line segment
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub common: GeometryCommon,
    pub start: Vector3,
    pub end: Vector3,
    pub thickness: f64,
    pub extrusion: Vector3,
}

impl Line {
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }
}

/// A line infinite in one direction
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub common: GeometryCommon,
    /// Start point
    pub position: Vector3,
    /// Unit direction
    pub direction: Vector3,
}

/// A line infinite in both directions
#[derive(Debug, Clone, PartialEq)]
pub struct XLine {
    pub common: GeometryCommon,
    /// A point on the line
    pub position: Vector3,
    pub direction: Vector3,
}
