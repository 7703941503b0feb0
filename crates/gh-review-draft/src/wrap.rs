//! Word wrapping for rendered comment bodies.

/// Column budget for wrapped text.
const WRAP_COLUMN: usize = 70;

/// Wrap `text` at [`WRAP_COLUMN`] characters, prefixing every continuation
/// line with `prefix`.
///
/// Breaks at the last space within the column budget, or hard-breaks at the
/// budget when a line contains no space; a word is never split while an
/// earlier space is available. `\r\n` line endings are normalized to `\n`
/// before wrapping. The first line is not prefixed, so the caller can place
/// its own indentation in front of the result.
pub fn wrap(text: &str, prefix: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut out = String::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(prefix);
        }

        let mut rest = line;
        while rest.chars().count() > WRAP_COLUMN {
            // Byte index of the column boundary; lines are sliced on char
            // boundaries so multi-byte text never panics.
            let limit = rest
                .char_indices()
                .nth(WRAP_COLUMN)
                .map(|(idx, _)| idx)
                .unwrap_or(rest.len());
            let cut = match rest[..limit].rfind(' ') {
                Some(idx) => idx + 1,
                None => limit,
            };
            out.push_str(&rest[..cut]);
            out.push('\n');
            out.push_str(prefix);
            rest = &rest[cut..];
        }
        out.push_str(rest);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_line_unchanged() {
        assert_eq!(wrap("hello world", "\t"), "hello world");
    }

    #[test]
    fn test_breaks_at_last_space_before_column() {
        let words = "word ".repeat(20); // 100 chars
        let wrapped = wrap(words.trim_end(), "\t");
        for line in wrapped.split('\n') {
            let line = line.trim_start_matches('\t');
            assert!(line.chars().count() <= WRAP_COLUMN, "line too long: {line:?}");
            // Never splits a word when a breaking space exists.
            for word in line.split_whitespace() {
                assert_eq!(word, "word");
            }
        }
    }

    #[test]
    fn test_hard_break_only_without_spaces() {
        let token = "x".repeat(100);
        let wrapped = wrap(&token, "\t");
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "x".repeat(70));
        assert_eq!(lines[1], format!("\t{}", "x".repeat(30)));
    }

    #[test]
    fn test_existing_newlines_get_prefix() {
        assert_eq!(wrap("one\ntwo", "\t"), "one\n\ttwo");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(wrap("one\r\ntwo", "\t"), "one\n\ttwo");
    }

    #[test]
    fn test_break_keeps_trailing_space_on_first_segment() {
        // 69 chars then a space then more text: the break lands just after
        // the space, mirroring the original wrapping behavior.
        let input = format!("{} tail", "a".repeat(69));
        let wrapped = wrap(&input, "\t");
        assert_eq!(wrapped, format!("{} \n\ttail", "a".repeat(69)));
    }
}
