//! Bit cursor over an owned byte buffer, implementing [`IDwgStreamReader`].

use encoding_rs::Encoding;

use crate::error::{DwgError, Result};
use crate::io::dwg::reference_type::HandleReference;

use super::stream_reader::IDwgStreamReader;

/// Bit-level reader over one object chunk (or one section).
///
/// The reader never looks past `data.len()`. A fixed-width read that needs
/// more bits than remain fails with [`DwgError::Overrun`] without moving the
/// cursor; prefixed codes (BS, BL, BD, DD) may have consumed their prefix.
#[derive(Debug, Clone)]
pub struct DwgStreamReaderBase {
    data: Vec<u8>,
    bit_position: u64,
    encoding: &'static Encoding,
}

impl DwgStreamReaderBase {
    /// Create a reader positioned at bit 0.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            bit_position: 0,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Create a reader positioned at the given bit.
    pub fn new_at_bit(data: Vec<u8>, bit_position: u64) -> Result<Self> {
        let mut reader = Self::new(data);
        reader.set_position_in_bits(bit_position)?;
        Ok(reader)
    }

    /// Code page used for **TV** strings.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    // ---------------------------------------------------------------
    // Internal helpers
    // ---------------------------------------------------------------

    fn ensure(&self, bits: u64) -> Result<()> {
        let available = self.remaining_bits();
        if bits > available {
            return Err(DwgError::Overrun {
                requested: bits,
                available,
            });
        }
        Ok(())
    }

    /// Read `count` (≤ 32) bits MSB-first into the low end of a u32.
    fn read_bits(&mut self, count: u32) -> Result<u32> {
        self.ensure(count as u64)?;
        let mut value = 0u32;
        for _ in 0..count {
            let byte = self.data[(self.bit_position >> 3) as usize];
            let bit = (byte >> (7 - (self.bit_position & 7))) & 1;
            value = (value << 1) | bit as u32;
            self.bit_position += 1;
        }
        Ok(value)
    }

    /// Byte at the cursor without any bounds check; callers `ensure(8)` first.
    fn byte_at_cursor(&self) -> u8 {
        let index = (self.bit_position >> 3) as usize;
        let shift = (self.bit_position & 7) as u32;
        if shift == 0 {
            return self.data[index];
        }
        let hi = self.data[index] << shift;
        let lo = self.data[index + 1] >> (8 - shift);
        hi | lo
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N as u64 * 8)?;
        let mut arr = [0u8; N];
        for slot in arr.iter_mut() {
            *slot = self.byte_at_cursor();
            self.bit_position += 8;
        }
        Ok(arr)
    }
}

impl IDwgStreamReader for DwgStreamReaderBase {
    fn position_in_bits(&self) -> u64 {
        self.bit_position
    }

    fn set_position_in_bits(&mut self, position: u64) -> Result<()> {
        let length = self.length_in_bits();
        if position > length {
            return Err(DwgError::Overrun {
                requested: position.saturating_sub(self.bit_position),
                available: self.remaining_bits(),
            });
        }
        self.bit_position = position;
        Ok(())
    }

    fn length_in_bits(&self) -> u64 {
        self.data.len() as u64 * 8
    }

    fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    fn read_2bits(&mut self) -> Result<u8> {
        Ok(self.read_bits(2)? as u8)
    }

    fn read_bit_short(&mut self) -> Result<i16> {
        match self.read_2bits()? {
            // 00: A short (2 bytes) follows, little-endian order (LSB first)
            0 => self.read_raw_short(),
            // 01: An unsigned char (1 byte) follows
            1 => Ok(self.read_byte()? as i16),
            // 10: 0
            2 => Ok(0),
            // 11: 256
            _ => Ok(256),
        }
    }

    fn read_bit_long(&mut self) -> Result<i32> {
        match self.read_2bits()? {
            0 => self.read_raw_long(),
            1 => Ok(self.read_byte()? as i32),
            2 => Ok(0),
            _ => Err(DwgError::InvalidFormat(
                "BitLong prefix 11 is reserved".into(),
            )),
        }
    }

    fn read_bit_double(&mut self) -> Result<f64> {
        match self.read_2bits()? {
            0 => self.read_raw_double(),
            1 => Ok(1.0),
            2 => Ok(0.0),
            _ => Err(DwgError::InvalidFormat(
                "BitDouble prefix 11 is reserved".into(),
            )),
        }
    }

    fn read_bit_double_with_default(&mut self, def: f64) -> Result<f64> {
        let mut arr = def.to_le_bytes();
        match self.read_2bits()? {
            // 00: use the default
            0 => Ok(def),
            // 01: 4 bytes patched into the first 4 bytes of the default
            1 => {
                let patch: [u8; 4] = self.read_array()?;
                arr[..4].copy_from_slice(&patch);
                Ok(f64::from_le_bytes(arr))
            }
            // 10: 6 bytes, the first 2 patch bytes [4..6], the last 4 patch bytes [0..4]
            2 => {
                let patch: [u8; 6] = self.read_array()?;
                arr[4..6].copy_from_slice(&patch[..2]);
                arr[..4].copy_from_slice(&patch[2..]);
                Ok(f64::from_le_bytes(arr))
            }
            // 11: a full RD follows
            _ => self.read_raw_double(),
        }
    }

    fn read_raw_short(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    fn read_raw_long(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn read_raw_double(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    fn read_byte(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        self.ensure(length as u64 * 8)?;
        let mut arr = Vec::with_capacity(length);
        for _ in 0..length {
            arr.push(self.byte_at_cursor());
            self.bit_position += 8;
        }
        Ok(arr)
    }

    fn read_modular_char(&mut self) -> Result<u64> {
        let start = self.bit_position;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = match self.read_byte() {
                Ok(b) => b,
                Err(e) => {
                    self.bit_position = start;
                    return Err(e);
                }
            };
            if shift < 64 {
                value |= ((byte & 0b0111_1111) as u64) << shift;
            }
            if byte & 0b1000_0000 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn read_signed_modular_char(&mut self) -> Result<i64> {
        let start = self.bit_position;
        let mut value = 0i64;
        let mut shift = 0u32;
        loop {
            let byte = match self.read_byte() {
                Ok(b) => b,
                Err(e) => {
                    self.bit_position = start;
                    return Err(e);
                }
            };
            if byte & 0b1000_0000 != 0 {
                if shift < 64 {
                    value |= ((byte & 0b0111_1111) as i64) << shift;
                }
                shift += 7;
                continue;
            }
            // Last byte: bit 6 carries the sign
            if shift < 64 {
                value |= ((byte & 0b0011_1111) as i64) << shift;
            }
            if byte & 0b0100_0000 != 0 {
                value = -value;
            }
            return Ok(value);
        }
    }

    fn read_modular_short(&mut self) -> Result<u32> {
        let start = self.bit_position;
        let mut value = 0u32;
        let mut shift = 0u32;
        loop {
            let pair: [u8; 2] = match self.read_array() {
                Ok(p) => p,
                Err(e) => {
                    self.bit_position = start;
                    return Err(e);
                }
            };
            if shift < 32 {
                value |= (pair[0] as u32) << shift;
            }
            if shift + 8 < 32 {
                value |= ((pair[1] & 0b0111_1111) as u32) << (shift + 8);
            }
            if pair[1] & 0b1000_0000 == 0 {
                return Ok(value);
            }
            shift += 15;
        }
    }

    fn handle_reference(&mut self) -> Result<HandleReference> {
        // |CODE (4 bits)|COUNTER (4 bits)|HANDLE or OFFSET|
        let start = self.bit_position;
        let form = self.read_byte()?;
        let code = form >> 4;
        let counter = form & 0b0000_1111;

        if counter > 8 {
            self.bit_position = start;
            return Err(DwgError::InvalidFormat(format!(
                "Handle byte count {} exceeds maximum of 8",
                counter
            )));
        }
        if !matches!(code, 0 | 2..=6 | 8 | 0xA | 0xC) {
            self.bit_position = start;
            return Err(DwgError::InvalidHandleCode(code));
        }

        let bytes = match self.read_bytes(counter as usize) {
            Ok(b) => b,
            Err(e) => {
                self.bit_position = start;
                return Err(e);
            }
        };
        // Value bytes are stored most significant first
        let value = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);

        Ok(HandleReference::new(code, counter, value))
    }

    fn read_variable_text(&mut self) -> Result<String> {
        let start = self.bit_position;
        let length = self.read_bit_short()?;
        if length == 0 {
            return Ok(String::new());
        }
        if length < 0 {
            self.bit_position = start;
            return Err(DwgError::InvalidFormat(format!(
                "Negative text length {}",
                length
            )));
        }
        let bytes = match self.read_bytes(length as usize) {
            Ok(b) => b,
            Err(e) => {
                self.bit_position = start;
                return Err(e);
            }
        };
        let (decoded, _, _) = self.encoding.decode(&bytes);
        Ok(decoded.replace('\0', ""))
    }
}

/// Map a stored code page byte to an encoding.
pub fn encoding_from_code_page(key: u8) -> &'static Encoding {
    match key {
        0x00 | 0x01 | 0x1E => encoding_rs::WINDOWS_1252,
        0x02 => encoding_rs::WINDOWS_1250,
        0x03 => encoding_rs::WINDOWS_1251,
        0x04 => encoding_rs::WINDOWS_1253,
        0x05 => encoding_rs::WINDOWS_1254,
        0x06 => encoding_rs::WINDOWS_1255,
        0x07 => encoding_rs::WINDOWS_1256,
        0x08 => encoding_rs::WINDOWS_1257,
        0x0A => encoding_rs::WINDOWS_874,
        0x0B => encoding_rs::SHIFT_JIS,
        0x0C => encoding_rs::GBK,
        0x0D => encoding_rs::EUC_KR,
        0x0E => encoding_rs::BIG5,
        _ => encoding_rs::WINDOWS_1252,
    }
}
