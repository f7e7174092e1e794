//! CRC computation over a parameter set
//!
//! Three interchangeable algorithms are provided. They differ only in speed:
//!
//! - [`Crc::bit_by_bit`]: the reference implementation, shifting the
//!   augmented message through the register one bit at a time
//! - [`Crc::bit_by_bit_fast`]: the same division without the augmentation
//!   pass, starting from the direct initial value
//! - [`Crc::table_driven`]: byte-at-a-time processing with a 256-entry table
//!
//! For every valid [`CrcParams`] and every input all three return the same
//! value.
//!
//! # Examples
//!
//! ```
//! use nonsteam_crc::{Crc, CrcParams};
//!
//! let crc = Crc::new(CrcParams::crc32());
//! assert_eq!(crc.table_driven(b"123456789"), 0xCBF4_3926);
//! ```

use crate::error::CrcError;
use crate::params::CrcParams;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Number of entries in the lookup table
const TABLE_LEN: usize = 256;

/// Reverse the bit order of the low `width` bits of `value`
///
/// Bits above `width` are discarded. A `width` of zero yields zero.
pub fn reflect(value: u64, width: u32) -> u64 {
    if width == 0 {
        return 0;
    }
    let mut data = value;
    let mut reflected = data & 0x01;
    for _ in 1..width {
        data >>= 1;
        reflected = (reflected << 1) | (data & 0x01);
    }
    reflected
}

/// CRC algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrcAlgorithm {
    /// Reference bit-by-bit algorithm over the augmented message
    BitByBit,
    /// Bit-by-bit algorithm without augmentation
    BitByBitFast,
    /// Table-driven algorithm with an 8-bit index
    TableDriven,
}

impl CrcAlgorithm {
    /// All algorithms in reference order
    pub const ALL: [Self; 3] = [Self::BitByBit, Self::BitByBitFast, Self::TableDriven];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::BitByBit => "bit-by-bit",
            Self::BitByBitFast => "bit-by-bit-fast",
            Self::TableDriven => "table-driven",
        }
    }
}

impl fmt::Display for CrcAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CrcAlgorithm {
    type Err = CrcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bit-by-bit" | "bbb" => Ok(Self::BitByBit),
            "bit-by-bit-fast" | "bbf" => Ok(Self::BitByBitFast),
            "table-driven" | "table" => Ok(Self::TableDriven),
            _ => Err(CrcError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// CRC engine bound to one parameter set
///
/// The lookup table for [`Crc::table_driven`] is generated on first use and
/// reused by later calls on the same engine.
#[derive(Debug, Clone)]
pub struct Crc {
    params: CrcParams,
    table: OnceLock<Box<[u64; TABLE_LEN]>>,
}

impl Crc {
    /// Create an engine for the given parameters
    pub fn new(params: CrcParams) -> Self {
        Self {
            params,
            table: OnceLock::new(),
        }
    }

    /// Parameters this engine was built with
    pub fn params(&self) -> &CrcParams {
        &self.params
    }

    /// Compute the CRC of `data` with the selected algorithm
    pub fn checksum(&self, algorithm: CrcAlgorithm, data: &[u8]) -> u64 {
        match algorithm {
            CrcAlgorithm::BitByBit => self.bit_by_bit(data),
            CrcAlgorithm::BitByBitFast => self.bit_by_bit_fast(data),
            CrcAlgorithm::TableDriven => self.table_driven(data),
        }
    }

    /// Classic bit-by-bit CRC over the augmented message
    ///
    /// Starts from the non-direct initial value, shifts every message bit
    /// through the register and then shifts in `width` zero bits.
    pub fn bit_by_bit(&self, data: &[u8]) -> u64 {
        let p = &self.params;
        let mut register = p.non_direct_init();

        for &byte in data {
            let octet = self.input_octet(byte);
            for i in 0..8 {
                let topbit = register & p.msb_mask();
                register = ((register << 1) & p.mask()) | ((octet >> (7 - i)) & 0x01);
                if topbit != 0 {
                    register ^= p.poly();
                }
            }
        }

        for _ in 0..p.width() {
            let topbit = register & p.msb_mask();
            register = (register << 1) & p.mask();
            if topbit != 0 {
                register ^= p.poly();
            }
        }

        self.finalize(register)
    }

    /// Bit-by-bit CRC without the augmentation pass
    ///
    /// The message bit is folded into the feedback decision before the
    /// shift, so the register starts from the direct initial value.
    pub fn bit_by_bit_fast(&self, data: &[u8]) -> u64 {
        let p = &self.params;
        let mut register = p.direct_init();

        for &byte in data {
            let octet = self.input_octet(byte);
            for i in 0..8 {
                let mut topbit = register & p.msb_mask();
                if octet & (0x80 >> i) != 0 {
                    topbit ^= p.msb_mask();
                }
                register = (register << 1) & p.mask();
                if topbit != 0 {
                    register ^= p.poly();
                }
            }
        }

        self.finalize(register)
    }

    /// Table-driven CRC, one table lookup per input byte
    pub fn table_driven(&self, data: &[u8]) -> u64 {
        let p = &self.params;
        let tbl = self.table();
        let shift = p.crc_shift();
        let idx_width = p.table_idx_width();
        let shifted_mask = p.mask() << shift;

        let mut register = p.direct_init() << shift;
        if p.reflect_in() {
            register = reflect(register, p.width() + shift) << shift;
            for &byte in data {
                let idx = ((register >> shift) ^ u64::from(byte)) & 0xFF;
                register = ((register >> idx_width) ^ tbl[idx as usize]) & shifted_mask;
            }
            register = reflect(register, p.width() + shift) & p.mask();
        } else {
            let idx_shift = p.width() + shift - idx_width;
            for &byte in data {
                let idx = ((register >> idx_shift) ^ u64::from(byte)) & 0xFF;
                register =
                    ((register << (idx_width - shift)) ^ tbl[idx as usize]) & shifted_mask;
            }
            register >>= shift;
        }

        self.finalize(register)
    }

    /// Lookup table for [`Crc::table_driven`]
    ///
    /// Entry `i` is the register contribution of input byte `i`, already
    /// reflected when input reflection is on and shifted left by
    /// [`CrcParams::crc_shift`].
    pub fn table(&self) -> &[u64; TABLE_LEN] {
        self.table.get_or_init(|| Box::new(self.gen_table()))
    }

    fn gen_table(&self) -> [u64; TABLE_LEN] {
        let p = &self.params;
        let shift = p.crc_shift();
        let idx_width = p.table_idx_width();
        let top = p.msb_mask() << shift;
        let poly = p.poly() << shift;

        let mut tbl = [0u64; TABLE_LEN];
        for (i, entry) in (0u64..).zip(tbl.iter_mut()) {
            let mut register = i;
            if p.reflect_in() {
                register = reflect(register, idx_width);
            }
            register <<= p.width() + shift - idx_width;
            for _ in 0..idx_width {
                register = if register & top == 0 {
                    register << 1
                } else {
                    (register << 1) ^ poly
                };
            }
            if p.reflect_in() {
                register = reflect(register >> shift, p.width()) << shift;
            }
            *entry = register & (p.mask() << shift);
        }
        tbl
    }

    fn input_octet(&self, byte: u8) -> u64 {
        let octet = u64::from(byte);
        if self.params.reflect_in() {
            reflect(octet, 8)
        } else {
            octet
        }
    }

    fn finalize(&self, register: u64) -> u64 {
        let register = if self.params.reflect_out() {
            reflect(register, self.params.width())
        } else {
            register
        };
        register ^ self.params.xor_out()
    }
}

impl From<CrcParams> for Crc {
    fn from(params: CrcParams) -> Self {
        Self::new(params)
    }
}
