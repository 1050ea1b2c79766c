//! Low-level scanning helpers shared by the extractor and the rewriter.
//!
//! These helpers understand exactly three things about host source text:
//! bracket nesting, quoted string literals, and comments. Nothing else.

/// Index just past the string literal starting at `start` (which must be a quote).
///
/// Backslash escapes are honoured. An unterminated literal ends at the line break.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// If a comment starts at `start`, the index just past it.
fn skip_comment(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes[start] != b'/' {
        return None;
    }
    match bytes.get(start + 1) {
        Some(b'/') => Some(
            bytes[start..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|p| start + p)
                .unwrap_or(bytes.len()),
        ),
        Some(b'*') => Some(
            bytes[start + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map(|p| start + 2 + p + 2)
                .unwrap_or(bytes.len()),
        ),
        _ => None,
    }
}

/// Find the bracket that closes the one at `open_idx`.
///
/// All three bracket kinds count towards depth. Brackets inside string
/// literals and comments are ignored. Returns `None` when the text ends first.
pub fn find_closing(text: &str, open_idx: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !matches!(bytes.get(open_idx), Some(b'(' | b'[' | b'{')) {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open_idx;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' => {
                if let Some(end) = skip_comment(bytes, i) {
                    i = end;
                    continue;
                }
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Blank out comments, leaving line breaks and string literals in place.
///
/// The result has the same byte length as `text`.
pub fn blank_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = bytes.to_vec();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' => {
                if let Some(end) = skip_comment(bytes, i) {
                    for b in &mut out[i..end] {
                        if *b != b'\n' {
                            *b = b' ';
                        }
                    }
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Blank out everything nested inside brackets, and all comments.
///
/// The result has the same byte length as `text`, so offsets found in the
/// masked text are valid in the original. The outermost brackets themselves
/// stay visible, so `useCase: Foo()` still reads as a call.
pub fn mask_nested(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = bytes.to_vec();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                let end = skip_string(bytes, i);
                if depth > 0 {
                    out[i..end].fill(b' ');
                }
                i = end;
                continue;
            }
            b'/' => {
                if let Some(end) = skip_comment(bytes, i) {
                    out[i..end].fill(b' ');
                    i = end;
                    continue;
                }
                if depth > 0 {
                    out[i] = b' ';
                }
            }
            b'(' | b'[' | b'{' => {
                if depth > 0 {
                    out[i] = b' ';
                }
                depth += 1;
            }
            b')' | b']' | b'}' => {
                depth = depth.saturating_sub(1);
                if depth > 0 {
                    out[i] = b' ';
                }
            }
            _ => {
                if depth > 0 {
                    out[i] = b' ';
                }
            }
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use crate::core::text::*;

    #[test]
    fn test_find_closing_simple() {
        let text = "Foo(a, b)";
        assert_eq!(find_closing(text, 3), Some(8));
    }

    #[test]
    fn test_find_closing_nested() {
        let text = "Foo(a: Bar(1, [2, 3]), b: {'x': 1})";
        assert_eq!(find_closing(text, 3), Some(text.len() - 1));
        assert_eq!(find_closing(text, 10), Some(20));
    }

    #[test]
    fn test_find_closing_ignores_strings_and_comments() {
        let text = "Foo('a)b', \"(\", // )\n c /* ) */)";
        assert_eq!(find_closing(text, 3), Some(text.len() - 1));
    }

    #[test]
    fn test_find_closing_unterminated() {
        assert_eq!(find_closing("Foo(a, (b)", 3), None);
        assert_eq!(find_closing("Foo", 0), None);
    }

    #[test]
    fn test_blank_comments() {
        let text = "a: 'http://x', // F(1)\n/* F(2)\n */ b";
        let blanked = blank_comments(text);

        assert_eq!(blanked.len(), text.len());
        assert!(blanked.starts_with("a: 'http://x', "));
        assert!(!blanked.contains("F("));
        assert_eq!(blanked.lines().count(), 3);
        assert!(blanked.ends_with(" b"));
    }

    #[test]
    fn test_mask_nested_keeps_top_level() {
        let text = "id: 'a', fields: [F(id: 'b')], useCase: Calc()";
        let masked = mask_nested(text);

        assert_eq!(masked.len(), text.len());
        assert!(masked.starts_with("id: 'a', fields: ["));
        assert!(!masked.contains("'b'"));
        assert!(masked.contains("useCase: Calc()"));
    }

    #[test]
    fn test_mask_nested_blanks_comments() {
        let text = "// id: 'old'\nid: 'new'";
        let masked = mask_nested(text);
        assert!(!masked.contains("old"));
        assert!(masked.contains("id: 'new'"));
    }

    #[test]
    fn test_mask_nested_preserves_multibyte_offsets() {
        let text = "category: 'Фундамент', x: ['Полы']";
        let masked = mask_nested(text);
        assert_eq!(masked.len(), text.len());
        assert!(masked.contains("'Фундамент'"));
        assert!(!masked.contains("Полы"));
    }
}
