//! Value types shared across the decoder

pub mod color;
pub mod handle;
pub mod line_weight;
pub mod vector;

pub use color::{AciPalette, ColorTable, Rgb, BY_BLOCK, BY_LAYER};
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::{Vector2, Vector3};
