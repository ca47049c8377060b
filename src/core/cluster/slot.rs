// src/core/cluster/slot.rs

//! Implements the cluster hash slot algorithm.

use super::crc16::crc16;
use super::hashtag::extract_hash_tag;

/// The total number of hash slots in the cluster.
pub const NUM_SLOTS: usize = 16384;

/// The highest valid slot number.
pub const MAX_SLOT: u16 = (NUM_SLOTS - 1) as u16;

/// Calculates the hash slot for a given key.
///
/// If the key carries a hash tag (`{...}`), only the tag is hashed; see
/// [`extract_hash_tag`]. The slot is `CRC16(tag) % NUM_SLOTS`, so it always
/// lies in `[0, 16384)`. The empty key maps to slot 0.
pub fn get_slot(key: &[u8]) -> u16 {
    if key.is_empty() {
        return 0;
    }
    crc16(extract_hash_tag(key)) % (NUM_SLOTS as u16)
}

/// Returns `true` if every key hashes to the same slot.
///
/// This is the check multi-key operations need before they can be served by a
/// single node. An empty slice trivially satisfies it.
pub fn same_slot<K: AsRef<[u8]>>(keys: &[K]) -> bool {
    let Some((first, rest)) = keys.split_first() else {
        return true;
    };
    let first_slot = get_slot(first.as_ref());
    rest.iter().all(|k| get_slot(k.as_ref()) == first_slot)
}
