// src/core/cluster/hashtag.rs

//! Hash tag extraction.
//!
//! A hash tag is the part of a key between the first `{` and the first `}`
//! after it, e.g. `user:{123}:name` hashes only `123`. Keys sharing a tag land
//! in the same slot. An empty or unclosed tag is not an error: the whole key
//! is hashed instead.

/// Returns the portion of `key` that participates in hashing.
///
/// - `foo` -> `foo` (no tag)
/// - `foo{bar}baz` -> `bar`
/// - `foo{}baz` -> `foo{}baz` (empty tag)
/// - `foo{bar` -> `foo{bar` (unclosed)
/// - `{a}{b}` -> `a` (only the first pair counts)
pub fn extract_hash_tag(key: &[u8]) -> &[u8] {
    let Some(open) = key.iter().position(|&b| b == b'{') else {
        return key;
    };

    let after_open = &key[open + 1..];
    match after_open.iter().position(|&b| b == b'}') {
        Some(close) if close > 0 => &after_open[..close],
        _ => key,
    }
}

/// Whether hashing `key` uses a tag rather than the full key.
pub fn has_hash_tag(key: &[u8]) -> bool {
    extract_hash_tag(key).len() != key.len()
}
