//! Custom class definitions
//!
//! Objects whose type code is 500 or above are instances of classes declared
//! in the drawing's class section. The decoder only needs the class number
//! and C++ class name, but the full record is kept.

use ahash::RandomState;
use bitflags::bitflags;
use indexmap::IndexMap;

bitflags! {
    /// Operations a proxy of the class is allowed to perform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProxyFlags: u16 {
        const ERASE_ALLOWED = 0x0001;
        const TRANSFORM_ALLOWED = 0x0002;
        const COLOR_CHANGE_ALLOWED = 0x0004;
        const LAYER_CHANGE_ALLOWED = 0x0008;
        const LINETYPE_CHANGE_ALLOWED = 0x0010;
        const LINETYPE_SCALE_CHANGE_ALLOWED = 0x0020;
        const VISIBILITY_CHANGE_ALLOWED = 0x0040;
        const CLONING_ALLOWED = 0x0080;
        const LINEWEIGHT_CHANGE_ALLOWED = 0x0100;
        const PLOT_STYLE_NAME_CHANGE_ALLOWED = 0x0200;
        const DISABLES_PROXY_WARNING_DIALOG = 0x0400;
        const IS_R13_FORMAT_PROXY = 0x8000;
    }
}

/// Item class id of classes whose instances are entities
pub const ENTITY_ITEM_CLASS_ID: i16 = 0x1F2;

/// One class section record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DxfClass {
    pub class_number: i16,
    pub proxy_flags: ProxyFlags,
    pub application_name: String,
    /// C++ class name, e.g. `AcDbRasterImage`
    pub cpp_class_name: String,
    pub dxf_name: String,
    pub was_zombie: bool,
    /// 0x1F2 for entities, 0x1F3 for objects
    pub item_class_id: i16,
}

impl DxfClass {
    pub fn new(class_number: i16, cpp_class_name: impl Into<String>, dxf_name: impl Into<String>) -> Self {
        Self {
            class_number,
            cpp_class_name: cpp_class_name.into(),
            dxf_name: dxf_name.into(),
            ..Default::default()
        }
    }

    /// Whether instances of this class carry the common entity header.
    pub fn is_an_entity(&self) -> bool {
        self.item_class_id == ENTITY_ITEM_CLASS_ID
    }
}

/// Lookup from class number to class record.
pub trait ClassRegistry {
    fn class_by_number(&self, number: i16) -> Option<&DxfClass>;
}

/// Classes keyed by class number, in section order.
#[derive(Debug, Clone, Default)]
pub struct DxfClassCollection {
    classes: IndexMap<i16, DxfClass, RandomState>,
}

impl DxfClassCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class, replacing any earlier record with the same number.
    pub fn add_or_update(&mut self, class: DxfClass) {
        self.classes.insert(class.class_number, class);
    }

    pub fn get_by_name(&self, dxf_name: &str) -> Option<&DxfClass> {
        self.classes
            .values()
            .find(|c| c.dxf_name.eq_ignore_ascii_case(dxf_name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DxfClass> {
        self.classes.values()
    }
}

impl ClassRegistry for DxfClassCollection {
    fn class_by_number(&self, number: i16) -> Option<&DxfClass> {
        self.classes.get(&number)
    }
}

impl FromIterator<DxfClass> for DxfClassCollection {
    fn from_iter<I: IntoIterator<Item = DxfClass>>(iter: I) -> Self {
        let mut collection = Self::new();
        for class in iter {
            collection.add_or_update(class);
        }
        collection
    }
}
