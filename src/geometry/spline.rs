//! Spline geometry

use super::GeometryCommon;
use crate::types::Vector3;

/// A NURBS curve, given either by fit points (scenario 2) or by control
/// points and knots (scenario 1)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spline {
    pub common: GeometryCommon,
    pub scenario: i32,
    pub degree: i32,
    pub rational: bool,
    pub closed: bool,
    pub periodic: bool,
    /// Control points carry weights
    pub weighted: bool,
    pub fit_tolerance: f64,
    pub begin_tangent: Vector3,
    pub end_tangent: Vector3,
    pub knots: Vec<f64>,
    pub control_points: Vec<Vector3>,
    pub control_point_weights: Vec<f64>,
    pub fit_points: Vec<Vector3>,
}

impl Spline {
    pub fn is_fit_point_defined(&self) -> bool {
        self.scenario == 2
    }
}
