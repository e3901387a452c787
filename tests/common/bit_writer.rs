//! MSB-first bit writer producing the encodings the decoder reads.
//!
//! Each writer picks the shortest encoding for a value, the way a real
//! drawing would store it, so tests exercise every prefix branch.

#![allow(dead_code)]

use dwg_geometry::types::{Vector2, Vector3};

#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Written bytes, the last one zero-padded.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = (self.bit_len % 8) as u32;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }

    /// Low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, count: u32) -> &mut Self {
        for i in (0..count).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        self
    }

    pub fn append(&mut self, other: &BitWriter) -> &mut Self {
        for i in 0..other.bit_len {
            let byte = other.bytes[(i / 8) as usize];
            self.push_bit((byte >> (7 - (i % 8))) & 1 == 1);
        }
        self
    }

    // -- raw ---------------------------------------------------------------

    pub fn b(&mut self, value: bool) -> &mut Self {
        self.push_bit(value);
        self
    }

    pub fn bb(&mut self, value: u8) -> &mut Self {
        self.write_bits(value as u64, 2)
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        for &byte in data {
            self.write_bits(byte as u64, 8);
        }
        self
    }

    pub fn rc(&mut self, value: u8) -> &mut Self {
        self.bytes(&[value])
    }

    pub fn rs(&mut self, value: i16) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn rl(&mut self, value: i32) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn rd(&mut self, value: f64) -> &mut Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn two_rd(&mut self, value: Vector2) -> &mut Self {
        self.rd(value.x).rd(value.y)
    }

    // -- compressed --------------------------------------------------------

    pub fn bs(&mut self, value: i16) -> &mut Self {
        match value {
            0 => self.bb(2),
            256 => self.bb(3),
            1..=255 => self.bb(1).rc(value as u8),
            _ => self.bb(0).rs(value),
        }
    }

    /// BS with the 16-bit form even for small values.
    pub fn bs_long_form(&mut self, value: i16) -> &mut Self {
        self.bb(0).rs(value)
    }

    pub fn bl(&mut self, value: i32) -> &mut Self {
        match value {
            0 => self.bb(2),
            1..=255 => self.bb(1).rc(value as u8),
            _ => self.bb(0).rl(value),
        }
    }

    pub fn bd(&mut self, value: f64) -> &mut Self {
        if value == 0.0 {
            self.bb(2)
        } else if value == 1.0 {
            self.bb(1)
        } else {
            self.bb(0).rd(value)
        }
    }

    /// DD against `default`.
    pub fn dd(&mut self, value: f64, default: f64) -> &mut Self {
        if value.to_bits() == default.to_bits() {
            self.bb(0)
        } else {
            self.bb(3).rd(value)
        }
    }

    pub fn two_dd(&mut self, value: Vector2, default: Vector2) -> &mut Self {
        self.dd(value.x, default.x).dd(value.y, default.y)
    }

    pub fn three_bd(&mut self, value: Vector3) -> &mut Self {
        self.bd(value.x).bd(value.y).bd(value.z)
    }

    pub fn be(&mut self, value: Vector3) -> &mut Self {
        if value == Vector3::UNIT_Z {
            self.b(true)
        } else {
            self.b(false).three_bd(value)
        }
    }

    pub fn bt(&mut self, value: f64) -> &mut Self {
        if value == 0.0 {
            self.b(true)
        } else {
            self.b(false).bd(value)
        }
    }

    pub fn cmc(&mut self, index: i16) -> &mut Self {
        self.bs(index)
    }

    /// T: BS length, then the bytes.
    pub fn t(&mut self, text: &str) -> &mut Self {
        self.bs(text.len() as i16).bytes(text.as_bytes())
    }

    /// H: code and byte count in one byte, then the value most significant first.
    pub fn h(&mut self, code: u8, value: u64) -> &mut Self {
        let counter = (8 - value.leading_zeros() / 8) as u8;
        let counter = if value == 0 { 0 } else { counter };
        self.rc((code << 4) | counter);
        for i in (0..counter).rev() {
            self.rc((value >> (i as u32 * 8)) as u8);
        }
        self
    }
}

/// MS encoding of `value`: 15 bits per little-endian byte pair.
pub fn ms(mut value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let lo = (value & 0xFF) as u8;
        let mut hi = ((value >> 8) & 0x7F) as u8;
        value >>= 15;
        if value != 0 {
            hi |= 0x80;
        }
        out.push(lo);
        out.push(hi);
        if value == 0 {
            return out;
        }
    }
}

/// MC encoding of `value`.
pub fn mc(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}
