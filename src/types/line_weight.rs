//! Entity line weight

use std::fmt;

/// Line weight of an entity.
///
/// R2000 entities store an RC index into a fixed table of widths (in
/// 1/100 mm) with three special indices at the top of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LineWeight {
    /// Use the layer's line weight
    #[default]
    ByLayer,
    /// Use the block's line weight
    ByBlock,
    Default,
    /// Width in 1/100 mm
    Value(i16),
}

/// Widths addressed by the stored index, in 1/100 mm
const WIDTHS: [i16; 24] = [
    0, 5, 9, 13, 15, 18, 20, 25, 30, 35, 40, 50, 53, 60, 70, 80, 90, 100, 106, 120, 140, 158, 200,
    211,
];

impl LineWeight {
    /// Map a stored RC line weight index.
    pub fn from_index(index: u8) -> Self {
        match index {
            29 => LineWeight::ByLayer,
            30 => LineWeight::ByBlock,
            31 => LineWeight::Default,
            i => WIDTHS
                .get(i as usize)
                .map_or(LineWeight::Default, |&w| LineWeight::Value(w)),
        }
    }

    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Default => write!(f, "Default"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_weight_from_index() {
        assert_eq!(LineWeight::from_index(29), LineWeight::ByLayer);
        assert_eq!(LineWeight::from_index(30), LineWeight::ByBlock);
        assert_eq!(LineWeight::from_index(31), LineWeight::Default);
        assert_eq!(LineWeight::from_index(7), LineWeight::Value(25));
        assert_eq!(LineWeight::from_index(23), LineWeight::Value(211));
        assert_eq!(LineWeight::from_index(26), LineWeight::Default);
    }

    #[test]
    fn test_line_weight_display() {
        assert_eq!(LineWeight::ByLayer.to_string(), "ByLayer");
        assert_eq!(LineWeight::from_index(7).to_string(), "0.25mm");
        assert_eq!(LineWeight::from_index(17).millimeters(), Some(1.0));
    }
}
