// tests/property/checksum_test.rs

//! The table-driven and bit-by-bit checksums must agree for every input.

use clusterhash::core::cluster::crc16::{crc16, crc16_bitwise};
use crc::{CRC_16_XMODEM, Crc};
use proptest::prelude::*;

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_table_matches_bitwise(data in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(crc16(&data), crc16_bitwise(&data));
    }

    #[test]
    fn test_matches_reference_crate(data in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(crc16(&data), XMODEM.checksum(&data));
    }

    #[test]
    fn test_appending_the_checksum_yields_zero(data in prop::collection::vec(any::<u8>(), 0..128)) {
        // A non-reflected CRC with no final XOR leaves a zero remainder once its
        // own big-endian checksum is appended.
        let mut framed = data.clone();
        framed.extend_from_slice(&crc16(&data).to_be_bytes());
        prop_assert_eq!(crc16(&framed), 0);
    }
}
