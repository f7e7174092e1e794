//! CRC parameter sets
//!
//! A parameter set follows the Rocksoft model: register width, generator
//! polynomial, input/output reflection, initial value and output XOR mask.
//! The derived constants used by the algorithms are computed once here.

use crate::error::{CrcError, Result};

/// Table index width supported by the table-driven algorithm
pub const TABLE_INDEX_WIDTH: u32 = 8;

/// Validated, immutable CRC parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrcParams {
    width: u32,
    poly: u64,
    reflect_in: bool,
    xor_in: u64,
    reflect_out: bool,
    xor_out: u64,
    table_idx_width: u32,

    msb_mask: u64,
    mask: u64,
    direct_init: u64,
    non_direct_init: u64,
    crc_shift: u32,
}

impl CrcParams {
    /// Create a parameter set with the default table index width
    ///
    /// `poly`, `xor_in` and `xor_out` are truncated to `width` bits.
    ///
    /// # Errors
    ///
    /// Returns [`CrcError::InvalidWidth`] when `width` is not in `1..=64` and
    /// [`CrcError::InvalidPolynomial`] when the truncated polynomial has no
    /// constant term while the truncated `xor_in` is non-zero. Such a set
    /// has no non-direct initial value.
    pub fn new(
        width: u32,
        poly: u64,
        reflect_in: bool,
        xor_in: u64,
        reflect_out: bool,
        xor_out: u64,
    ) -> Result<Self> {
        Self::with_table_index_width(
            width,
            poly,
            reflect_in,
            xor_in,
            reflect_out,
            xor_out,
            TABLE_INDEX_WIDTH,
        )
    }

    /// Create a parameter set with an explicit table index width
    ///
    /// # Errors
    ///
    /// Same as [`CrcParams::new`], plus [`CrcError::InvalidTableIndexWidth`]
    /// for any table index width other than 8.
    pub fn with_table_index_width(
        width: u32,
        poly: u64,
        reflect_in: bool,
        xor_in: u64,
        reflect_out: bool,
        xor_out: u64,
        table_idx_width: u32,
    ) -> Result<Self> {
        if width == 0 || width > 64 {
            return Err(CrcError::InvalidWidth(width));
        }
        if table_idx_width != TABLE_INDEX_WIDTH {
            return Err(CrcError::InvalidTableIndexWidth(table_idx_width));
        }

        let msb_mask = 1u64 << (width - 1);
        let mask = ((msb_mask - 1) << 1) | 1;
        let poly = poly & mask;
        let xor_in = xor_in & mask;
        if poly & 1 == 0 && xor_in != 0 {
            return Err(CrcError::InvalidPolynomial { poly, width });
        }

        let crc_shift = TABLE_INDEX_WIDTH.saturating_sub(width);

        Ok(Self {
            width,
            poly,
            reflect_in,
            xor_in,
            reflect_out,
            xor_out: xor_out & mask,
            table_idx_width,
            msb_mask,
            mask,
            direct_init: xor_in,
            non_direct_init: non_direct_init(xor_in, poly, width, msb_mask, mask),
            crc_shift,
        })
    }

    /// CRC-32/ISO-HDLC, the parameter set Steam uses for shortcut ids
    pub fn crc32() -> Self {
        Self {
            width: 32,
            poly: 0x04C1_1DB7,
            reflect_in: true,
            xor_in: 0xFFFF_FFFF,
            reflect_out: true,
            xor_out: 0xFFFF_FFFF,
            table_idx_width: TABLE_INDEX_WIDTH,
            msb_mask: 0x8000_0000,
            mask: 0xFFFF_FFFF,
            direct_init: 0xFFFF_FFFF,
            non_direct_init: non_direct_init(
                0xFFFF_FFFF,
                0x04C1_1DB7,
                32,
                0x8000_0000,
                0xFFFF_FFFF,
            ),
            crc_shift: 0,
        }
    }

    /// Register width in bits
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Generator polynomial, truncated to the width
    pub fn poly(&self) -> u64 {
        self.poly
    }

    /// Whether input bytes are reflected
    pub fn reflect_in(&self) -> bool {
        self.reflect_in
    }

    /// Initial register value (direct form)
    pub fn xor_in(&self) -> u64 {
        self.xor_in
    }

    /// Whether the final register is reflected
    pub fn reflect_out(&self) -> bool {
        self.reflect_out
    }

    /// Mask XORed into the final value
    pub fn xor_out(&self) -> u64 {
        self.xor_out
    }

    /// Table index width in bits
    pub fn table_idx_width(&self) -> u32 {
        self.table_idx_width
    }

    /// Mask selecting the most significant register bit
    pub fn msb_mask(&self) -> u64 {
        self.msb_mask
    }

    /// Mask covering the full register width
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Initial register for algorithms that do not augment the message
    pub fn direct_init(&self) -> u64 {
        self.direct_init
    }

    /// Initial register for the augmented bit-by-bit algorithm
    pub fn non_direct_init(&self) -> u64 {
        self.non_direct_init
    }

    /// Left shift aligning registers narrower than a table index
    pub fn crc_shift(&self) -> u32 {
        self.crc_shift
    }
}

/// Run the division state machine backwards `width` times
///
/// Each step is invertible when bit 0 of `poly` is set. A zero `init` maps
/// to zero for any polynomial.
fn non_direct_init(init: u64, poly: u64, width: u32, msb_mask: u64, mask: u64) -> u64 {
    let mut crc = init;
    for _ in 0..width {
        let bit = crc & 1;
        if bit != 0 {
            crc ^= poly;
        }
        crc >>= 1;
        if bit != 0 {
            crc |= msb_mask;
        }
    }
    crc & mask
}
