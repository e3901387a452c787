//! Layer table entry

use bitflags::bitflags;

use crate::types::{Handle, LineWeight};

bitflags! {
    /// Layer state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayerFlags: u8 {
        const FROZEN = 0x01;
        const FROZEN_IN_NEW_VIEWPORTS = 0x02;
        const LOCKED = 0x04;
        /// Layer is off; stored as a negative color index
        const OFF = 0x08;
    }
}

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub handle: Handle,
    pub name: String,
    pub flags: LayerFlags,
    /// ACI color index; negative when the layer is off
    pub color_index: i16,
    pub line_weight: LineWeight,
    pub is_plottable: bool,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: Handle::NULL,
            name: name.into(),
            flags: LayerFlags::empty(),
            color_index: 7,
            line_weight: LineWeight::Default,
            is_plottable: true,
        }
    }

    /// Create a layer with a specific color index
    pub fn with_color(name: impl Into<String>, color_index: i16) -> Self {
        let mut layer = Self::new(name);
        layer.set_color_index(color_index);
        layer
    }

    /// Set the stored color index, keeping the off flag in sync with its sign.
    pub fn set_color_index(&mut self, color_index: i16) {
        self.color_index = color_index;
        self.flags.set(LayerFlags::OFF, color_index < 0);
    }

    /// Color index with the on/off sign removed
    pub fn color(&self) -> i16 {
        self.color_index.saturating_abs()
    }

    pub fn is_off(&self) -> bool {
        self.flags.contains(LayerFlags::OFF)
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new("0")
    }
}
