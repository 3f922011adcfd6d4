//! Escaping of literal control characters in translation text.
//!
//! A literal control character (newline, carriage return, tab) and a
//! literal two-character backslash sequence (`\n`, `\r`, `\t`) typed as
//! text both need to survive a round-trip unambiguously, so escaping
//! doubles an existing backslash sequence rather than colliding with the
//! control-character encoding.

/// Replace literal control characters with their two-character backslash
/// form, and double the backslash of any backslash sequence already
/// present so the two cases stay distinguishable.
pub fn escape_translation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\n' | '\r' | '\t' => {
                out.push('\\');
                out.push(control_letter(c));
                i += 1;
            }
            '\\' if i + 1 < chars.len() && is_control_letter(chars[i + 1]) => {
                out.push('\\');
                out.push('\\');
                out.push(chars[i + 1]);
                i += 2;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Inverse of [`escape_translation`]: a doubled backslash sequence collapses
/// back to a single backslash sequence; a lone backslash sequence expands
/// back to the actual control character.
pub fn unescape_translation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next_is_control = i + 1 < chars.len() && is_control_letter(chars[i + 1]);
        let next_is_backslash = i + 1 < chars.len() && chars[i + 1] == '\\';
        let after_next_is_control = i + 2 < chars.len() && is_control_letter(chars[i + 2]);

        if c == '\\' && next_is_backslash && after_next_is_control {
            out.push('\\');
            out.push(chars[i + 2]);
            i += 3;
        } else if c == '\\' && next_is_control {
            out.push(control_char(chars[i + 1]));
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

fn is_control_letter(c: char) -> bool {
    matches!(c, 'n' | 'r' | 't')
}

fn control_letter(c: char) -> char {
    match c {
        '\n' => 'n',
        '\r' => 'r',
        '\t' => 't',
        _ => unreachable!("control_letter called with non-control char"),
    }
}

fn control_char(letter: char) -> char {
    match letter {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        _ => unreachable!("control_char called with non-control letter"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_actual_control_characters() {
        assert_eq!(escape_translation("a\nb"), "a\\nb");
        assert_eq!(escape_translation("a\rb"), "a\\rb");
        assert_eq!(escape_translation("a\tb"), "a\\tb");
    }

    #[test]
    fn doubles_an_existing_backslash_sequence() {
        assert_eq!(escape_translation(r"a\nb"), r"a\\nb");
    }

    #[test]
    fn unescape_restores_actual_control_characters() {
        assert_eq!(unescape_translation("a\\nb"), "a\nb");
        assert_eq!(unescape_translation("a\\rb"), "a\rb");
        assert_eq!(unescape_translation("a\\tb"), "a\tb");
    }

    #[test]
    fn unescape_collapses_a_doubled_backslash_sequence() {
        assert_eq!(unescape_translation(r"a\\nb"), r"a\nb");
    }

    #[test]
    fn plain_text_is_unaffected() {
        assert_eq!(escape_translation("hello world"), "hello world");
        assert_eq!(unescape_translation("hello world"), "hello world");
    }

    #[test]
    fn lone_backslash_not_followed_by_control_letter_is_unaffected() {
        assert_eq!(escape_translation(r"path\end"), r"path\end");
        assert_eq!(unescape_translation(r"path\end"), r"path\end");
    }

    #[test]
    fn round_trips_actual_control_characters() {
        let original = "line one\nline two\tindented\r\n";
        assert_eq!(
            unescape_translation(&escape_translation(original)),
            original
        );
    }

    #[test]
    fn round_trips_literal_backslash_sequences() {
        let original = r"C:\new\term";
        assert_eq!(
            unescape_translation(&escape_translation(original)),
            original
        );
    }

    #[test]
    fn round_trips_mixed_content() {
        let original = "a\nliteral \\t and a real \ttab";
        assert_eq!(
            unescape_translation(&escape_translation(original)),
            original
        );
    }
}
