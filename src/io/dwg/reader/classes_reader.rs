//! Classes section reader.
//!
//! Reads the custom class definitions of an R2000 `AcDb:Classes` section.
//! Objects whose type code is 500 or more are instances of these classes.
//!
//! Layout: start sentinel, RL byte size of the class data, the class
//! records, RS CRC, end sentinel.

use crate::classes::{DxfClass, DxfClassCollection, ProxyFlags};
use crate::error::{DwgError, Result};
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reader::stream_reader_base::DwgStreamReaderBase;

pub const CLASSES_START_SENTINEL: [u8; 16] = [
    0x8D, 0xA1, 0xC4, 0xB8, 0xC4, 0xA9, 0xF8, 0xC5, 0xC0, 0xDC, 0xF4, 0x5F, 0xE7, 0xCF, 0xB6, 0x8A,
];

pub const CLASSES_END_SENTINEL: [u8; 16] = [
    0x72, 0x5E, 0x3B, 0x47, 0x3B, 0x56, 0x07, 0x3A, 0x3F, 0x23, 0x0B, 0xA0, 0x18, 0x30, 0x49, 0x75,
];

/// Reader for the `AcDb:Classes` section bytes.
pub struct DwgClassesReader {
    data: Vec<u8>,
}

impl DwgClassesReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read all class definitions.
    pub fn read(self) -> Result<DxfClassCollection> {
        let mut classes = DxfClassCollection::new();
        let mut reader = DwgStreamReaderBase::new(self.data);

        check_sentinel("start", &reader.read_sentinel()?, &CLASSES_START_SENTINEL)?;

        let size = reader.read_raw_long()?;
        let size = u64::try_from(size)
            .map_err(|_| DwgError::InvalidFormat(format!("class data size {size}")))?;
        let end_section = reader.position() + size;

        while reader.position() < end_section {
            classes.add_or_update(read_class(&mut reader)?);
        }

        // The CRC starts on the byte after the class data.
        reader.set_position_in_bits(end_section * 8)?;
        let _crc = reader.read_raw_ushort()?;

        check_sentinel("end", &reader.read_sentinel()?, &CLASSES_END_SENTINEL)?;

        Ok(classes)
    }
}

fn check_sentinel(which: &str, found: &[u8; 16], expected: &[u8; 16]) -> Result<()> {
    if found != expected {
        return Err(DwgError::InvalidFormat(format!(
            "bad {which} sentinel in classes section: {found:02X?}"
        )));
    }
    Ok(())
}

fn read_class(reader: &mut dyn IDwgStreamReader) -> Result<DxfClass> {
    let class_number = reader.read_bit_short()?;
    // Proxy capability flags (a version number before R14)
    let proxy_flags = ProxyFlags::from_bits_retain(reader.read_bit_short()? as u16);
    let application_name = reader.read_variable_text()?;
    let cpp_class_name = reader.read_variable_text()?;
    let dxf_name = reader.read_variable_text()?;
    let was_zombie = reader.read_bit()?;
    let item_class_id = reader.read_bit_short()?;

    Ok(DxfClass {
        class_number,
        proxy_flags,
        application_name,
        cpp_class_name,
        dxf_name,
        was_zombie,
        item_class_id,
    })
}
