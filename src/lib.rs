//! # dwg_geometry
//!
//! A pure Rust decoder for the object stream of R2000 DWG drawings.
//!
//! Objects are addressed by handle. The decoder looks up the object's file
//! offset, frames its chunk, reads the bit-packed fields and returns a
//! typed record. The geometry builder turns entity records into plain
//! geometry values with resolved colors, rendered extended data and the
//! vertices of chained polylines.
//!
//! ## Features
//!
//! - Bit-level primitives (BitShort, BitLong, BitDouble, modular values, handles)
//! - Object framing with optional CRC checks
//! - Decoders for 30 entity kinds and the common table objects
//! - Geometry for 20 entity kinds, with a placeholder for the rest
//! - Extended entity data rendering
//! - Vertex and attribute chains guarded against cycles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dwg_geometry::{DwgReader, Geometry, Handle};
//! use dwg_geometry::io::FileSource;
//!
//! let source = FileSource::open("sample.dwg")?;
//! let mut reader = DwgReader::from_sections(source, handles_section, classes_section)?;
//!
//! match reader.get_geometry(0, Handle::new(0x2A), Handle::NULL)? {
//!     Geometry::Circle(circle) => println!("circle r={}", circle.radius),
//!     other => println!("{}", other.type_name()),
//! }
//!
//! for notification in reader.notifications().iter() {
//!     eprintln!("{:?}", notification);
//! }
//! # Ok::<(), dwg_geometry::DwgError>(())
//! ```
//!
//! ## Architecture
//!
//! - `ByteSource` - seek-then-read access to the drawing bytes
//! - `DwgObjectReader` - framing and per-type field decoding
//! - `RawObject` - one variant per decoded record kind
//! - `GeometryBuilder` - entity records to `Geometry`
//! - `DwgReader` - bundles the above with layer and color tables

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classes;
pub mod error;
pub mod geometry;
pub mod io;
pub mod notification;
pub mod tables;
pub mod types;
pub mod xdata;

// Re-export commonly used types
pub use error::{DwgError, Result};
pub use types::{AciPalette, ColorTable, Handle, LineWeight, Rgb, Vector2, Vector3};

// Re-export geometry
pub use geometry::{Geometry, GeometryCommon};

// Re-export tables and classes
pub use classes::{ClassRegistry, DxfClass, DxfClassCollection};
pub use tables::{Layer, LayerCollection, LayerTable};

// Re-export I/O types
pub use io::dwg::reader::{DwgObjectReader, RawObject};
pub use io::dwg::{GeometryBuilder, ObjectIndex};
pub use io::{ByteSource, DwgReader, DwgReaderConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
