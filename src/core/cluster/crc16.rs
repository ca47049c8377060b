// src/core/cluster/crc16.rs

//! CRC16-XMODEM, the checksum behind cluster hash slots.
//!
//! Polynomial `0x1021`, initial register `0`, no reflection and no final XOR.
//! Two forms are provided: the table-driven [`crc16`] used on the hot path and
//! the bit-by-bit [`crc16_bitwise`], which the table is derived from. They agree
//! for every input.

/// The generator polynomial, `x^16 + x^12 + x^5 + 1`.
pub const POLY: u16 = 0x1021;

/// The 256-entry lookup table, built at compile time.
pub static CRC16_TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Computes the CRC16-XMODEM checksum of `data` using the lookup table.
///
/// The empty input yields `0`.
pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |crc, &byte| {
        let idx = ((crc >> 8) as u8 ^ byte) as usize;
        (crc << 8) ^ CRC16_TABLE[idx]
    })
}

/// Computes the same checksum one bit at a time.
pub fn crc16_bitwise(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
