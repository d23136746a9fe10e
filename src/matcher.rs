//! Matcher for browscap glob patterns.
//!
//! Patterns know two metacharacters: `*` matches any run of bytes,
//! possibly empty, and `?` matches exactly one byte. The `*` handling is
//! deliberately simpler than full backtracking: a star keeps consuming
//! input until the byte right after it in the pattern shows up. That is
//! sufficient for the browscap catalog; it is not a general regex engine.

/// Returns whether `string` matches `pattern`.
///
/// With `ignore_case` set, both sides are ASCII-lowercased before
/// comparison. Never fails on any input; a malformed pattern simply does
/// not match.
pub fn matches(pattern: &str, string: &str, ignore_case: bool) -> bool {
    if ignore_case {
        matches_bytes(
            &pattern.as_bytes().to_ascii_lowercase(),
            &string.as_bytes().to_ascii_lowercase(),
        )
    } else {
        matches_bytes(pattern.as_bytes(), string.as_bytes())
    }
}

fn matches_bytes(pattern: &[u8], string: &[u8]) -> bool {
    let mut pat_i = 0;
    let mut str_i = 0;

    while pat_i < pattern.len() && str_i < string.len() {
        match pattern[pat_i] {
            b'*' => {
                // The star stays active, eating input bytes, until the
                // literal right after it shows up; then the scan moves
                // past both.
                if pattern.get(pat_i + 1) == Some(&string[str_i]) {
                    pat_i += 2;
                }
                str_i += 1;
            }
            b'?' => {
                pat_i += 1;
                str_i += 1;
            }
            byte if byte == string[str_i] => {
                pat_i += 1;
                str_i += 1;
            }
            _ => return false,
        }
    }

    // The string must be exhausted, and the pattern as well, except for a
    // single trailing star that may still match zero bytes.
    str_i == string.len()
        && (pat_i == pattern.len()
            || (pat_i == pattern.len() - 1 && pattern[pat_i] == b'*'))
}

/// Counts the pattern bytes that are neither `*` nor `?`. This is the
/// score a pattern contributes to a match; longer wins.
pub fn significant_length(pattern: &str) -> u32 {
    pattern
        .bytes()
        .filter(|byte| !matches!(byte, b'*' | b'?'))
        .count() as u32
}
