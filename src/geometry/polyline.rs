//! Polylines
//!
//! The heavy polylines (2D, 3D and polyface) are stored in the file as a
//! chain of vertex entities; by the time they get here the chain has been
//! walked and flattened into vertex lists.

use super::GeometryCommon;
use crate::types::{Vector2, Vector3};

/// A 3D polyline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline3D {
    pub common: GeometryCommon,
    pub closed: bool,
    pub splined: bool,
    pub vertices: Vec<Vector3>,
}

/// A 2D (heavy) polyline
///
/// `bulges` and `widths` are per vertex, aligned with `vertices`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline2D {
    pub common: GeometryCommon,
    pub closed: bool,
    pub splined: bool,
    /// Default start width of segments
    pub start_width: f64,
    /// Default end width of segments
    pub end_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub extrusion: Vector3,
    pub vertices: Vec<Vector3>,
    pub bulges: Vec<f64>,
    /// (start, end) width per vertex
    pub widths: Vec<(f64, f64)>,
}

/// A lightweight polyline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LwPolyline {
    pub common: GeometryCommon,
    pub closed: bool,
    pub const_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub extrusion: Vector3,
    pub vertices: Vec<Vector2>,
    /// Empty when no vertex has a bulge
    pub bulges: Vec<f64>,
    /// Empty when the polyline has no per-vertex widths
    pub widths: Vec<(f64, f64)>,
}

impl LwPolyline {
    /// Bulge of the segment starting at `index`
    pub fn bulge_at(&self, index: usize) -> f64 {
        self.bulges.get(index).copied().unwrap_or(0.0)
    }
}

/// A polyface mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolylinePFace {
    pub common: GeometryCommon,
    pub vertices: Vec<Vector3>,
    /// One-based vertex indices per face; a negative index marks an
    /// invisible edge, zero an unused corner
    pub faces: Vec<[i16; 4]>,
}
