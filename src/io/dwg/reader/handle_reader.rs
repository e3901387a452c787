//! Object map section reader.
//!
//! Builds the [`ObjectIndex`] from the `AcDb:Handles` section. The section
//! is a series of chunks, each holding delta-encoded handle/offset pairs
//! and capped at 2032 bytes of content.

use crate::error::{DwgError, Result};
use crate::io::dwg::object_index::ObjectIndex;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reader::stream_reader_base::DwgStreamReaderBase;
use crate::types::Handle;

/// Largest content size of one chunk
const MAX_CHUNK_CONTENT: u64 = 2032;

/// Reader for the `AcDb:Handles` section bytes.
pub struct DwgHandleReader {
    data: Vec<u8>,
}

impl DwgHandleReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read every handle → offset pair.
    pub fn read(self) -> Result<ObjectIndex> {
        let mut index = ObjectIndex::new();
        let mut reader = DwgStreamReaderBase::new(self.data);

        loop {
            // Deltas restart in every chunk.
            let mut last_handle: u64 = 0;
            let mut last_loc: i64 = 0;

            // Chunk size, big-endian, counting its own two bytes
            let size = u16::from_be_bytes([reader.read_byte()?, reader.read_byte()?]) as u64;
            if size == 2 {
                break;
            }
            if size < 2 {
                return Err(DwgError::InvalidFormat(format!(
                    "object map chunk of {size} bytes"
                )));
            }

            let end = reader.position() + (size - 2).min(MAX_CHUNK_CONTENT);
            while reader.position() < end {
                let handle_delta = reader.read_modular_char()?;
                last_handle = last_handle.wrapping_add(handle_delta);
                last_loc += reader.read_signed_modular_char()?;

                // A zero delta repeats the previous handle; skip it.
                if handle_delta == 0 {
                    continue;
                }
                let offset = u64::try_from(last_loc).map_err(|_| {
                    DwgError::InvalidFormat(format!(
                        "negative offset {last_loc} for handle {last_handle:#X}"
                    ))
                })?;
                index.insert(Handle::new(last_handle), offset);
            }

            // CRC, most significant byte first; not checked
            reader.read_byte()?;
            reader.read_byte()?;
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section() {
        let index = DwgHandleReader::new(vec![0x00, 0x02]).read().unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_deltas_accumulate() {
        let data = vec![
            0x00, 0x08, // size: 2 + 6 content bytes
            0x01, 0x10, // handle 1 at 0x10
            0x02, 0x20, // handle 3 at 0x30
            0x00, 0x05, // zero delta, skipped
            0xAB, 0xCD, // crc
            0x00, 0x02,
        ];
        let index = DwgHandleReader::new(data).read().unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(Handle::new(1)), Some(0x10));
        assert_eq!(index.get(Handle::new(3)), Some(0x30));
    }

    #[test]
    fn test_chunks_restart_deltas() {
        let data = vec![
            0x00, 0x04, 0x05, 0x08, 0x00, 0x00, // handle 5 at 8
            0x00, 0x04, 0x07, 0x09, 0x00, 0x00, // handle 7 at 9
            0x00, 0x02,
        ];
        let index = DwgHandleReader::new(data).read().unwrap();
        assert_eq!(index.get(Handle::new(5)), Some(8));
        assert_eq!(index.get(Handle::new(7)), Some(9));
    }

    #[test]
    fn test_negative_offset_rejected() {
        // Signed MC 0x41 is -1
        let data = vec![0x00, 0x04, 0x01, 0x41, 0x00, 0x00, 0x00, 0x02];
        assert!(matches!(
            DwgHandleReader::new(data).read(),
            Err(DwgError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_truncated_section_fails() {
        assert!(DwgHandleReader::new(vec![0x00, 0x08, 0x01]).read().is_err());
    }
}
