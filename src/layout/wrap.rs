use crate::textbox::TextWrapping;
use crate::TextBoxError;

/// Split text into its explicit lines, treating `\n`, `\r\n` and `\r` alike
pub fn explicit_lines(text: &str) -> Vec<String> {
    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.split('\n').map(str::to_string).collect()
}

/// Break `text` into the lines that will be drawn.
///
/// With [TextWrapping::WrapWithOverflow], every explicit line is filled greedily: words
/// (separated by single spaces) are appended to the current line for as long as the
/// candidate line measures narrower than `max_width`. A candidate that is exactly as wide as
/// `max_width` already starts a new line. A word that is too wide on its own is never split,
/// so it overflows the box.
///
/// With [TextWrapping::NoWrap], the explicit lines are returned unchanged.
///
/// `measure_width` returns the width of a candidate line in pixels.
pub fn wrap_text<F>(
    text: &str,
    wrapping: TextWrapping,
    max_width: i32,
    mut measure_width: F,
) -> Result<Vec<String>, TextBoxError>
where
    F: FnMut(&str) -> Result<i32, TextBoxError>,
{
    let explicit = explicit_lines(text);
    if wrapping == TextWrapping::NoWrap {
        return Ok(explicit);
    }

    let mut lines = Vec::with_capacity(explicit.len());
    for explicit_line in explicit.iter() {
        let mut words = explicit_line.split(' ');
        let mut line = words.next().unwrap_or_default().to_string();
        for word in words {
            let candidate = format!("{line} {word}");
            let width = measure_width(&candidate)?;
            if width >= max_width {
                tracing::trace!(line = %line, width, max_width, "wrapping line");
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// every character is 10px wide
    fn mono(s: &str) -> Result<i32, TextBoxError> {
        Ok(s.chars().count() as i32 * 10)
    }

    #[test]
    fn newline_styles_are_equivalent() {
        assert_eq!(explicit_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(explicit_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(explicit_lines(""), vec![""]);
    }

    #[test]
    fn text_without_spaces_is_a_single_line() {
        let lines =
            wrap_text("Strigiformes", TextWrapping::WrapWithOverflow, 30, mono).unwrap();
        assert_eq!(lines, vec!["Strigiformes"]);
    }

    #[test]
    fn greedy_word_wrap() {
        let lines = wrap_text(
            "Owls are birds from the order",
            TextWrapping::WrapWithOverflow,
            110,
            mono,
        )
        .unwrap();
        assert_eq!(lines, vec!["Owls are", "birds from", "the order"]);
        for line in &lines {
            assert!(mono(line).unwrap() < 110);
        }
    }

    #[test]
    fn exact_fit_wraps() {
        // "aaaa bbbb" is exactly 90px wide
        let lines = wrap_text("aaaa bbbb", TextWrapping::WrapWithOverflow, 90, mono).unwrap();
        assert_eq!(lines, vec!["aaaa", "bbbb"]);
        let lines = wrap_text("aaaa bbbb", TextWrapping::WrapWithOverflow, 91, mono).unwrap();
        assert_eq!(lines, vec!["aaaa bbbb"]);
    }

    #[test]
    fn overlong_words_overflow() {
        let lines = wrap_text("a enormous b", TextWrapping::WrapWithOverflow, 40, mono).unwrap();
        assert_eq!(lines, vec!["a", "enormous", "b"]);
    }

    #[test]
    fn empty_lines_survive_wrapping() {
        let lines = wrap_text("one\n\ntwo", TextWrapping::WrapWithOverflow, 100, mono).unwrap();
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn no_wrap_only_splits_explicit_lines() {
        let lines = wrap_text(
            "a very long line that overflows\nsecond",
            TextWrapping::NoWrap,
            10,
            |_| panic!("nothing is measured without wrapping"),
        )
        .unwrap();
        assert_eq!(lines, vec!["a very long line that overflows", "second"]);
    }

    #[test]
    fn measuring_errors_propagate() {
        let result = wrap_text("a b", TextWrapping::WrapWithOverflow, 10, |_| {
            Err(TextBoxError::UnknownFont)
        });
        assert!(matches!(result, Err(TextBoxError::UnknownFont)));
    }
}
