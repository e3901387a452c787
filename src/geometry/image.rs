//! Raster image geometry
//!
//! Image entities only describe placement; the file path and pixel
//! dimensions live in the referenced image definition object, which the
//! builder fetches and merges in.

use super::GeometryCommon;
use crate::types::{Vector2, Vector3};

/// Units of the image definition's pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionUnit {
    #[default]
    None,
    Centimeters,
    Inches,
}

impl ResolutionUnit {
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => ResolutionUnit::Centimeters,
            5 => ResolutionUnit::Inches,
            _ => ResolutionUnit::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub common: GeometryCommon,
    /// Lower left corner
    pub insertion_point: Vector3,
    /// One pixel along the image's X axis
    pub u_vector: Vector3,
    /// One pixel along the image's Y axis
    pub v_vector: Vector3,
    /// Size in pixels as placed
    pub image_size: Vector2,
    /// Size in pixels from the definition
    pub image_size_in_px: Vector2,
    /// Pixel size in drawing units from the definition
    pub pixel_size: Vector2,
    pub file_path: String,
    pub resolution_units: ResolutionUnit,
    pub show_image: bool,
    pub clipping: bool,
    pub brightness: u8,
    pub contrast: u8,
    pub fade: u8,
    /// 1 rectangular, 2 polygonal
    pub clip_boundary_type: i16,
    pub clipping_points: Vec<Vector2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_unit_codes() {
        assert_eq!(ResolutionUnit::from_code(0), ResolutionUnit::None);
        assert_eq!(ResolutionUnit::from_code(2), ResolutionUnit::Centimeters);
        assert_eq!(ResolutionUnit::from_code(5), ResolutionUnit::Inches);
        assert_eq!(ResolutionUnit::from_code(9), ResolutionUnit::None);
    }
}
