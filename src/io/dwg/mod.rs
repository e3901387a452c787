//! DWG object decoding.
//!
//! # Module Structure
//!
//! - [`reader`]: bit stream primitives, section readers and the object decoder
//! - [`builder`]: geometry built from decoded entities
//! - [`object_index`]: handle → file offset map
//! - [`object_type`]: stored object type codes
//! - [`reference_type`]: handle reference codes and resolution
//! - [`crc`]: CRC-8 (16-bit) object checksum

pub mod builder;
pub mod crc;
pub mod object_index;
pub mod object_type;
pub mod reader;
pub mod reference_type;

pub use builder::{GeometryBuilder, HandleChain};
pub use object_index::ObjectIndex;
pub use object_type::DwgObjectType;
pub use reader::{DwgReader, DwgReaderConfiguration};
pub use reference_type::{DwgReferenceType, HandleReference};
