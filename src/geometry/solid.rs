//! Filled and faceted quadrilaterals

use super::GeometryCommon;
use crate::types::Vector3;

/// 2D filled quadrilateral (SOLID or TRACE)
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub common: GeometryCommon,
    pub elevation: f64,
    pub thickness: f64,
    /// Corners in storage order; the Z of each is the elevation
    pub corners: [Vector3; 4],
    pub extrusion: Vector3,
}

/// 3D face
#[derive(Debug, Clone, PartialEq)]
pub struct Face3D {
    pub common: GeometryCommon,
    pub corners: [Vector3; 4],
    /// Bit n set: edge n is invisible
    pub invisible_edges: i16,
}

impl Face3D {
    /// A triangle repeats its third corner.
    pub fn is_triangle(&self) -> bool {
        self.corners[2] == self.corners[3]
    }

    pub fn is_edge_invisible(&self, edge: usize) -> bool {
        edge < 4 && self.invisible_edges & (1 << edge) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_edges() {
        let c = Vector3::new(1.0, 1.0, 0.0);
        let face = Face3D {
            common: GeometryCommon::default(),
            corners: [Vector3::ZERO, Vector3::UNIT_X, c, c],
            invisible_edges: 0b0101,
        };
        assert!(face.is_triangle());
        assert!(face.is_edge_invisible(0));
        assert!(!face.is_edge_invisible(1));
        assert!(face.is_edge_invisible(2));
        assert!(!face.is_edge_invisible(7));
    }
}
