//! Extended entity data (EED)
//!
//! Objects carry a chain of EED records, one per registered application.
//! Each record is kept as its raw payload; the payload is a sequence of
//! items, each introduced by a one-byte type code:
//!
//! | code | item |
//! |---|---|
//! | 0 | string: RC length, RS code page, bytes |
//! | 1 | invalid |
//! | 2 | control brace: RC, 0 = `{` |
//! | 3 | layer table reference: 8 bytes |
//! | 4 | binary chunk: RC length, bytes |
//! | 5 | entity handle: 8 bytes |
//! | 10–13 | point / position / displacement / direction: 3 RD |
//! | 40–42 | real / distance / scale factor: RD |
//! | 70 | RS |
//! | 71 | RL |

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::Encoding;

use crate::io::dwg::reference_type::HandleReference;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{Handle, Vector3};

/// One decoded EED item
#[derive(Debug, Clone, PartialEq)]
pub enum XDataValue {
    /// String (code 0)
    String(String),
    /// Control string (code 2), "{" or "}"
    ControlString(String),
    /// Layer table reference (code 3)
    LayerTableRef(Handle),
    /// Binary data (code 4)
    BinaryData(Vec<u8>),
    /// Entity handle (code 5)
    Handle(Handle),
    /// 3D point (code 10)
    Point3D(Vector3),
    /// 3D position (code 11)
    Position3D(Vector3),
    /// 3D displacement (code 12)
    Displacement3D(Vector3),
    /// 3D direction (code 13)
    Direction3D(Vector3),
    /// Real value (code 40)
    Real(f64),
    /// Distance (code 41)
    Distance(f64),
    /// Scale factor (code 42)
    ScaleFactor(f64),
    /// 16-bit integer (code 70)
    Integer16(i16),
    /// 32-bit integer (code 71)
    Integer32(i32),
}

/// One application's EED block as stored in the object.
#[derive(Debug, Clone, PartialEq)]
pub struct EedRecord {
    /// Declared payload size in bytes
    pub length: i16,
    /// Registered application owning the data
    pub application: HandleReference,
    pub data: Vec<u8>,
}

impl EedRecord {
    pub fn new(application: HandleReference, data: Vec<u8>) -> Self {
        Self {
            length: data.len() as i16,
            application,
            data,
        }
    }

    /// Type code of the first item.
    pub fn type_code(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// Render the first item as a single tagged string.
    ///
    /// Invalid (1) and unknown codes, as well as payloads too short for
    /// their code, produce no string and a notification instead.
    pub fn render(
        &self,
        owner: Handle,
        encoding: &'static Encoding,
        notifications: &mut NotificationCollection,
    ) -> Option<String> {
        let data = &self.data;
        let Some(&code) = data.first() else {
            notifications.notify_for(owner, NotificationType::Warning, "Empty EED record");
            return None;
        };

        let needed = match code {
            0 => 4 + data.get(1).copied().unwrap_or(0) as usize,
            2 => 2,
            3 | 5 => 9,
            4 => 2 + data.get(1).copied().unwrap_or(0) as usize,
            10..=13 => 25,
            40..=42 => 9,
            70 => 3,
            71 => 5,
            1 => {
                notifications.notify_for(
                    owner,
                    NotificationType::Warning,
                    "EED item type code 1 is invalid",
                );
                return None;
            }
            other => {
                notifications.notify_for(
                    owner,
                    NotificationType::Warning,
                    format!("Undefined EED item type code: {}", other),
                );
                return None;
            }
        };
        if data.len() < needed.max(2) {
            notifications.notify_for(
                owner,
                NotificationType::Warning,
                format!(
                    "EED item with type code {} needs {} bytes, record has {}",
                    code,
                    needed,
                    data.len()
                ),
            );
            return None;
        }

        let rendered = match code {
            0 => {
                let n = data[1] as usize;
                let (text, _, _) = encoding.decode(&data[4..4 + n]);
                text.into_owned()
            }
            2 => if data[1] == 0 { "{" } else { "}" }.to_string(),
            3 => format!("Layer table ref (handle):{}", latin1(&data[1..9])),
            4 => {
                let n = data[1] as usize;
                format!("Binary chunk (chars):{}", latin1(&data[2..2 + n]))
            }
            5 => format!("Entity handle ref (handle):{}", latin1(&data[1..9])),
            10..=13 => format!(
                "Point: {{{:.6};{:.6};{:.6}}}",
                LittleEndian::read_f64(&data[1..9]),
                LittleEndian::read_f64(&data[9..17]),
                LittleEndian::read_f64(&data[17..25])
            ),
            40..=42 => format!("Double:{:.6}", LittleEndian::read_f64(&data[1..9])),
            70 => format!("Short:{}", LittleEndian::read_i16(&data[1..3])),
            _ => format!("Long Int:{}", LittleEndian::read_i32(&data[1..5])),
        };
        Some(rendered)
    }

    /// Decode every item of the payload.
    ///
    /// Stops at the first invalid, unknown or truncated item with a warning;
    /// the items decoded before it are returned.
    pub fn values(
        &self,
        owner: Handle,
        encoding: &'static Encoding,
        notifications: &mut NotificationCollection,
    ) -> Vec<XDataValue> {
        let mut values = Vec::new();
        let mut rest: &[u8] = &self.data;

        while let Some((&code, body)) = rest.split_first() {
            match decode_item(code, body, encoding) {
                Some((value, used)) => {
                    values.push(value);
                    rest = &body[used..];
                }
                None => {
                    notifications.notify_for(
                        owner,
                        NotificationType::Warning,
                        format!("EED decoding stopped at item type code {}", code),
                    );
                    break;
                }
            }
        }
        values
    }
}

/// Decode one item body; returns the value and the body bytes it used.
fn decode_item(
    code: u8,
    body: &[u8],
    encoding: &'static Encoding,
) -> Option<(XDataValue, usize)> {
    let point = |body: &[u8]| -> Option<Vector3> {
        let b = body.get(..24)?;
        Some(Vector3::new(
            LittleEndian::read_f64(&b[0..8]),
            LittleEndian::read_f64(&b[8..16]),
            LittleEndian::read_f64(&b[16..24]),
        ))
    };
    let real = |body: &[u8]| body.get(..8).map(LittleEndian::read_f64);
    let handle = |body: &[u8]| body.get(..8).map(|b| Handle::new(LittleEndian::read_u64(b)));

    let item = match code {
        0 => {
            let n = *body.first()? as usize;
            let bytes = body.get(3..3 + n)?;
            let (text, _, _) = encoding.decode(bytes);
            (XDataValue::String(text.into_owned()), 3 + n)
        }
        2 => {
            let brace = if *body.first()? == 0 { "{" } else { "}" };
            (XDataValue::ControlString(brace.to_string()), 1)
        }
        3 => (XDataValue::LayerTableRef(handle(body)?), 8),
        4 => {
            let n = *body.first()? as usize;
            (XDataValue::BinaryData(body.get(1..1 + n)?.to_vec()), 1 + n)
        }
        5 => (XDataValue::Handle(handle(body)?), 8),
        10 => (XDataValue::Point3D(point(body)?), 24),
        11 => (XDataValue::Position3D(point(body)?), 24),
        12 => (XDataValue::Displacement3D(point(body)?), 24),
        13 => (XDataValue::Direction3D(point(body)?), 24),
        40 => (XDataValue::Real(real(body)?), 8),
        41 => (XDataValue::Distance(real(body)?), 8),
        42 => (XDataValue::ScaleFactor(real(body)?), 8),
        70 => (XDataValue::Integer16(LittleEndian::read_i16(body.get(..2)?)), 2),
        71 => (XDataValue::Integer32(LittleEndian::read_i32(body.get(..4)?)), 4),
        _ => return None,
    };
    Some(item)
}

/// Bytes as one character each.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
