//! Bit-level stream reader trait.
//!
//! Object data is **bit-aligned**: fields follow each other without padding,
//! most significant bit first within every byte. Every read advances the
//! cursor by exactly the bits it consumed. A read that would go past the end
//! of the buffer fails with [`DwgError::Overrun`](crate::error::DwgError::Overrun);
//! the object being decoded is then abandoned.

use crate::error::Result;
use crate::io::dwg::reference_type::HandleReference;
use crate::types::{Handle, Vector2, Vector3};

/// Reading methods for every bit code used by object records:
///
/// - **B**: bit (1 bit)
/// - **BB**: 2-bit code
/// - **BS**: BitShort (2+0/8/16 bits)
/// - **BL**: BitLong (2+0/8/32 bits)
/// - **BD**: BitDouble (2+0/64 bits)
/// - **DD**: BitDouble with default
/// - **MC**: Modular Char (7-bit chunks)
/// - **MS**: Modular Short (15-bit chunks)
/// - **H**: Handle reference
/// - **TV**: Variable text
/// - **RC**: Raw Char, **RS**: Raw Short, **RL**: Raw Long, **RD**: Raw Double
/// - **SN**: Sentinel (16 bytes)
/// - **BE**: BitExtrusion, **BT**: BitThickness
/// - **CMC**: color (index only in R2000)
/// - **OT**: Object type
pub trait IDwgStreamReader {
    // ---------------------------------------------------------------
    // Position
    // ---------------------------------------------------------------

    /// Current position in bits from the start of the buffer.
    fn position_in_bits(&self) -> u64;

    /// Move to an absolute bit position. Positions past the end are an overrun.
    fn set_position_in_bits(&mut self, position: u64) -> Result<()>;

    /// Buffer length in bits.
    fn length_in_bits(&self) -> u64;

    /// Byte holding the current bit.
    fn position(&self) -> u64 {
        self.position_in_bits() >> 3
    }

    fn remaining_bits(&self) -> u64 {
        self.length_in_bits().saturating_sub(self.position_in_bits())
    }

    /// Skip `bits` bits without interpreting them.
    fn advance_bits(&mut self, bits: u64) -> Result<()> {
        let target = self.position_in_bits().saturating_add(bits);
        self.set_position_in_bits(target)
    }

    // ---------------------------------------------------------------
    // Bit codes
    // ---------------------------------------------------------------

    /// **B**
    fn read_bit(&mut self) -> Result<bool>;

    /// **BB**
    fn read_2bits(&mut self) -> Result<u8>;

    /// **BS**: `00` i16 follows, `01` u8 follows, `10` 0, `11` 256.
    fn read_bit_short(&mut self) -> Result<i16>;

    /// **BL**: `00` i32 follows, `01` u8 follows, `10` 0, `11` reserved.
    fn read_bit_long(&mut self) -> Result<i32>;

    /// **BD**: `00` RD follows, `01` 1.0, `10` 0.0, `11` reserved.
    fn read_bit_double(&mut self) -> Result<f64>;

    /// **DD**: a double expressed as a patch over `def`.
    fn read_bit_double_with_default(&mut self, def: f64) -> Result<f64>;

    /// **2DD**
    fn read_2bit_double_with_default(&mut self, def: Vector2) -> Result<Vector2> {
        let x = self.read_bit_double_with_default(def.x)?;
        let y = self.read_bit_double_with_default(def.y)?;
        Ok(Vector2::new(x, y))
    }

    /// **2BD**
    fn read_2bit_double(&mut self) -> Result<Vector2> {
        let x = self.read_bit_double()?;
        let y = self.read_bit_double()?;
        Ok(Vector2::new(x, y))
    }

    /// **3BD**
    fn read_3bit_double(&mut self) -> Result<Vector3> {
        let x = self.read_bit_double()?;
        let y = self.read_bit_double()?;
        let z = self.read_bit_double()?;
        Ok(Vector3::new(x, y, z))
    }

    // ---------------------------------------------------------------
    // Raw values (little-endian, bit-aligned)
    // ---------------------------------------------------------------

    /// **RC**
    fn read_raw_char(&mut self) -> Result<u8> {
        self.read_byte()
    }

    /// **RS**
    fn read_raw_short(&mut self) -> Result<i16>;

    fn read_raw_ushort(&mut self) -> Result<u16> {
        Ok(self.read_raw_short()? as u16)
    }

    /// **RL**
    fn read_raw_long(&mut self) -> Result<i32>;

    /// **RD**
    fn read_raw_double(&mut self) -> Result<f64>;

    /// **2RD**
    fn read_2raw_double(&mut self) -> Result<Vector2> {
        let x = self.read_raw_double()?;
        let y = self.read_raw_double()?;
        Ok(Vector2::new(x, y))
    }

    /// **3RD**
    fn read_3raw_double(&mut self) -> Result<Vector3> {
        let x = self.read_raw_double()?;
        let y = self.read_raw_double()?;
        let z = self.read_raw_double()?;
        Ok(Vector3::new(x, y, z))
    }

    /// Eight bits starting at the cursor.
    fn read_byte(&mut self) -> Result<u8>;

    fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>>;

    // ---------------------------------------------------------------
    // Modular values
    // ---------------------------------------------------------------

    /// **MC**: unsigned, 7 bits per byte, high bit means "more".
    fn read_modular_char(&mut self) -> Result<u64>;

    /// **MC**: signed variant, bit 6 of the final byte is the sign.
    fn read_signed_modular_char(&mut self) -> Result<i64>;

    /// **MS**: 15 bits per 2-byte pair, high bit of the second byte means "more".
    fn read_modular_short(&mut self) -> Result<u32>;

    // ---------------------------------------------------------------
    // Handles
    // ---------------------------------------------------------------

    /// **H**: raw reference, not resolved.
    fn handle_reference(&mut self) -> Result<HandleReference>;

    /// **H**: resolved against the handle of the object being read.
    fn handle_reference_resolved(&mut self, base: Handle) -> Result<Handle> {
        Ok(self.handle_reference()?.resolve(base))
    }

    // ---------------------------------------------------------------
    // Text, sentinels and special codes
    // ---------------------------------------------------------------

    /// **TV**: BS byte length, then code-page bytes. NULs are dropped.
    fn read_variable_text(&mut self) -> Result<String>;

    /// **SN**
    fn read_sentinel(&mut self) -> Result<[u8; 16]> {
        let bytes = self.read_bytes(16)?;
        let mut sentinel = [0u8; 16];
        sentinel.copy_from_slice(&bytes);
        Ok(sentinel)
    }

    /// **CMC**: a BS color index.
    fn read_color_index(&mut self) -> Result<i16> {
        self.read_bit_short()
    }

    /// **OT**: the raw BS type code.
    fn read_object_type(&mut self) -> Result<i16> {
        self.read_bit_short()
    }

    /// **BE**: flag bit set → (0, 0, 1), otherwise 3BD.
    fn read_bit_extrusion(&mut self) -> Result<Vector3> {
        if self.read_bit()? {
            Ok(Vector3::UNIT_Z)
        } else {
            self.read_3bit_double()
        }
    }

    /// **BT**: flag bit set → 0.0, otherwise BD.
    fn read_bit_thickness(&mut self) -> Result<f64> {
        if self.read_bit()? {
            Ok(0.0)
        } else {
            self.read_bit_double()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    fn _assert_object_safe(_: &dyn IDwgStreamReader) {}
}
