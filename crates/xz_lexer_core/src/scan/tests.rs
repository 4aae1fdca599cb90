use super::*;
use pretty_assertions::assert_eq;

fn scanner(source: &str) -> Scanner<'_> {
    Scanner::new(source.as_bytes())
}

// === ByteSet ===

#[test]
fn byte_set_membership() {
    let set = ByteSet::new(b"<{");
    assert!(set.contains(b'<'));
    assert!(set.contains(b'{'));
    assert!(!set.contains(b'>'));
    assert!(!set.contains(0xC3));
}

#[test]
fn byte_set_ignores_duplicates() {
    assert_eq!(ByteSet::new(b"aab"), ByteSet::new(b"ab"));
}

#[test]
fn byte_set_large_sets_search_linearly() {
    let set = ByteSet::new(b"=/> \t");
    assert_eq!(set.find_in(b"name\tvalue"), Some(4));
    assert_eq!(set.find_in(b"name"), None);
}

// === seek_byte ===

#[test]
fn seek_byte_finds_first_member() {
    let s = scanner("<p>his divine shadow</p>");
    assert_eq!(s.seek_byte(3, &ByteSet::new(b"<")), 20);
}

#[test]
fn seek_byte_matches_at_start() {
    let s = scanner("<a>");
    assert_eq!(s.seek_byte(0, &ByteSet::new(b"<")), 0);
}

#[test]
fn seek_byte_not_found_is_one_past_end() {
    let s = scanner("text");
    assert_eq!(s.seek_byte(0, &ByteSet::new(b"<")), 5);
    assert_eq!(s.seek_byte(4, &ByteSet::new(b"<")), 5);
}

#[test]
fn seek_byte_past_end_keeps_advancing() {
    let s = scanner("ab");
    assert_eq!(s.seek_byte(3, &WHITESPACE), 4);
}

// === skip_bytes ===

#[test]
fn skip_bytes_stops_at_non_member() {
    let s = scanner("  \t\nx");
    assert_eq!(s.skip_bytes(0, &WHITESPACE), 4);
}

#[test]
fn skip_bytes_stops_at_end() {
    let s = scanner("   ");
    assert_eq!(s.skip_bytes(1, &WHITESPACE), 3);
}

#[test]
fn skip_bytes_past_end_is_identity() {
    let s = scanner("a");
    assert_eq!(s.skip_bytes(5, &WHITESPACE), 5);
}

// === seek_literal ===

#[test]
fn seek_literal_finds_occurrence() {
    let s = scanner("<!-- a -- b -->");
    assert_eq!(s.seek_literal(4, b"-->"), 12);
}

#[test]
fn seek_literal_missing_is_end() {
    let s = scanner("<![CDATA[ never closed");
    assert_eq!(s.seek_literal(9, b"]]>"), s.len());
}

#[test]
fn seek_literal_clamps_start_past_end() {
    let s = scanner("abc");
    assert_eq!(s.seek_literal(7, b"c"), 3);
}

// === prefix checks ===

#[test]
fn starts_with_at_checks_bounds() {
    let s = scanner("<!DOC");
    assert!(s.starts_with_at(1, b"!DOC"));
    assert!(!s.starts_with_at(1, b"!DOCTYPE"));
    assert!(!s.starts_with_at(9, b"!"));
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_seek {
    use super::super::{ByteSet, Scanner};
    use proptest::prelude::*;

    /// Reference implementation: the byte loop every search reduces to.
    fn scalar_seek(buf: &[u8], from: usize, set: &ByteSet) -> usize {
        let mut i = from;
        while i < buf.len() {
            if set.contains(buf[i]) {
                return i;
            }
            i += 1;
        }
        i.max(buf.len()) + 1
    }

    proptest! {
        #[test]
        fn memchr_paths_match_scalar(
            bytes in proptest::collection::vec(
                prop_oneof![Just(b'<'), Just(b'{'), Just(b'"'), Just(b'a'), Just(b' ')],
                0..128,
            ),
            from in 0usize..140,
        ) {
            let s = Scanner::new(&bytes);
            for set in [
                ByteSet::new(b"<"),
                ByteSet::new(b"<{"),
                ByteSet::new(b"<{\""),
                ByteSet::new(b"<{\" "),
            ] {
                prop_assert_eq!(s.seek_byte(from, &set), scalar_seek(&bytes, from, &set));
            }
        }

        #[test]
        fn seek_literal_never_passes_end(
            bytes in proptest::collection::vec(any::<u8>(), 0..128),
            from in 0usize..140,
        ) {
            let s = Scanner::new(&bytes);
            prop_assert!(s.seek_literal(from, b"]]>") <= bytes.len());
        }
    }
}
