/*!
 * Reflow of translated text over the line structure of the original record.
 */

/// Split `translated` into quoted PO string lines, one per original continuation line.
///
/// Words are dealt out `max(1, words / line_count)` at a time; the last line
/// takes whatever is left. Fewer lines than `line_count` come back when the
/// text runs out of words first. With `line_count <= 1` the whole text is
/// returned as a single quoted line.
pub fn split_translated_text(translated: &str, line_count: usize) -> Vec<String> {
    if translated.is_empty() {
        return Vec::new();
    }
    if line_count <= 1 {
        return vec![quote(translated)];
    }

    let words: Vec<&str> = translated.split_whitespace().collect();
    let chunk_size = (words.len() / line_count).max(1);
    let mut lines = Vec::with_capacity(line_count);
    let mut consumed = 0;

    for line_index in 0..line_count {
        if consumed >= words.len() {
            break;
        }
        let end = if line_index == line_count - 1 {
            words.len()
        } else {
            (consumed + chunk_size).min(words.len())
        };
        lines.push(words[consumed..end].join(" "));
        consumed = end;
    }

    if consumed < words.len() {
        if let Some(last) = lines.last_mut() {
            last.push(' ');
            last.push_str(&words[consumed..].join(" "));
        }
    }

    lines.into_iter().map(|line| quote(&line)).collect()
}

/// Wrap in quotes, pairing an odd trailing run of backslashes so the closing quote stays unescaped
fn quote(text: &str) -> String {
    let trailing = text.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 1 {
        format!("\"{}\\\"", text)
    } else {
        format!("\"{}\"", text)
    }
}
