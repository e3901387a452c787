//! DWG bit-level stream readers and section readers.
//!
//! ## Stream readers
//! - [`stream_reader`]: the `IDwgStreamReader` trait
//! - [`stream_reader_base`]: the bit cursor over one byte buffer
//!
//! ## Section readers
//! - [`classes_reader`]: `AcDb:Classes` section (custom class definitions)
//! - [`handle_reader`]: `AcDb:Handles` section (object map)
//!
//! ## Objects
//! - [`object_reader`]: single-object decoding by handle
//! - [`dwg_reader`]: the reader facade

pub mod stream_reader;
pub mod stream_reader_base;

pub mod classes_reader;
pub mod dwg_reader;
pub mod handle_reader;
pub mod object_reader;

pub use stream_reader::IDwgStreamReader;
pub use stream_reader_base::DwgStreamReaderBase;

pub use classes_reader::DwgClassesReader;
pub use dwg_reader::{DwgReader, DwgReaderConfiguration};
pub use handle_reader::DwgHandleReader;
pub use object_reader::{DwgObjectReader, RawObject};
