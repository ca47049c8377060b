// tests/property/routing_test.rs

//! Invariants of slot and node assignment.

use clusterhash::core::cluster::hashtag::extract_hash_tag;
use clusterhash::core::cluster::{
    NUM_SLOTS, NodeCount, NodeResolver, SlotRangeTable, get_slot, node_for_key,
    node_for_key_fixed,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_slot_in_range(key in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert!((get_slot(&key) as usize) < NUM_SLOTS);
    }

    #[test]
    fn test_slot_is_idempotent(key in prop::collection::vec(any::<u8>(), 0..256)) {
        let first = get_slot(&key);
        prop_assert_eq!(get_slot(&key), first);
        prop_assert_eq!(get_slot(&key.clone()), first);
    }

    #[test]
    fn test_tagged_keys_share_a_slot(
        tag in "[a-zA-Z0-9:_]{1,32}",
        prefix in "[a-zA-Z0-9:_]{0,32}",
        suffix in ".{0,32}",
    ) {
        let key = format!("{prefix}{{{tag}}}{suffix}");
        prop_assert_eq!(extract_hash_tag(key.as_bytes()), tag.as_bytes());
        prop_assert_eq!(get_slot(key.as_bytes()), get_slot(tag.as_bytes()));
    }

    #[test]
    fn test_keys_without_braces_hash_whole_key(key in "[^{]{0,64}") {
        prop_assert_eq!(extract_hash_tag(key.as_bytes()), key.as_bytes());
    }

    #[test]
    fn test_tag_is_never_empty_for_non_empty_keys(key in prop::collection::vec(any::<u8>(), 1..128)) {
        prop_assert!(!extract_hash_tag(&key).is_empty());
    }

    #[test]
    fn test_proportional_node_below_count(
        key in prop::collection::vec(any::<u8>(), 0..128),
        nodes in 1i64..=16384,
    ) {
        let count = NodeCount::new(nodes).unwrap();
        prop_assert!((node_for_key(&key, count) as i64) < nodes);
    }

    #[test]
    fn test_proportional_is_monotonic_in_slot(
        a in 0u16..16384,
        b in 0u16..16384,
        nodes in 1i64..=16384,
    ) {
        let policy = clusterhash::core::cluster::Proportional::new(NodeCount::new(nodes).unwrap());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(policy.node_for_slot(lo) <= policy.node_for_slot(hi));
    }

    #[test]
    fn test_fixed_node_in_range(key in prop::collection::vec(any::<u8>(), 0..128)) {
        let node = node_for_key_fixed(&key);
        prop_assert!((1..=6).contains(&node));
        prop_assert_eq!(node, SlotRangeTable::six_shard().node_for_key(&key));
    }
}
