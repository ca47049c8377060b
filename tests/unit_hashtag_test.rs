use clusterhash::core::cluster::hashtag::{extract_hash_tag, has_hash_tag};

#[test]
fn test_no_braces_returns_whole_key() {
    assert_eq!(extract_hash_tag(b"foo"), b"foo");
    assert!(!has_hash_tag(b"foo"));
}

#[test]
fn test_tag_in_the_middle() {
    assert_eq!(extract_hash_tag(b"foo{bar}baz"), b"bar");
    assert!(has_hash_tag(b"foo{bar}baz"));
}

#[test]
fn test_tag_at_the_start_and_end() {
    assert_eq!(extract_hash_tag(b"{user1000}.following"), b"user1000");
    assert_eq!(extract_hash_tag(b"profile:{42}"), b"42");
}

#[test]
fn test_empty_tag_falls_back_to_whole_key() {
    assert_eq!(extract_hash_tag(b"foo{}baz"), b"foo{}baz");
    assert_eq!(extract_hash_tag(b"{}"), b"{}");
    assert!(!has_hash_tag(b"foo{}baz"));
}

#[test]
fn test_unclosed_tag_falls_back_to_whole_key() {
    assert_eq!(extract_hash_tag(b"foo{bar"), b"foo{bar");
    assert_eq!(extract_hash_tag(b"{"), b"{");
}

#[test]
fn test_closing_brace_before_opening_is_ignored() {
    assert_eq!(extract_hash_tag(b"}foo{bar}"), b"bar");
    assert_eq!(extract_hash_tag(b"foo}bar"), b"foo}bar");
}

#[test]
fn test_only_the_first_pair_counts() {
    // The empty first tag is not skipped in favour of the second one.
    assert_eq!(extract_hash_tag(b"foo{}{bar}"), b"foo{}{bar}");
    assert_eq!(extract_hash_tag(b"{a}{b}"), b"a");
    // Nested braces: the tag runs from the first '{' to the first '}'.
    assert_eq!(extract_hash_tag(b"foo{{bar}}zap"), b"{bar");
}

#[test]
fn test_empty_key() {
    assert_eq!(extract_hash_tag(b""), b"");
}

#[test]
fn test_binary_keys() {
    assert_eq!(extract_hash_tag(b"\xff{\x00\x01}\xfe"), b"\x00\x01");
}
