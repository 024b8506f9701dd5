//! Greedy word wrapping by character count.

/// Wrap `text` into lines of at most `width` characters.
///
/// Whitespace runs collapse to single spaces. Words longer than `width` are
/// split, filling whatever room is left on the current line first.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };

        if needed <= width {
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
            continue;
        }

        if word_len <= width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        // Over-long word: top up the current line, then emit full-width chunks.
        let mut rest: Vec<char> = word.chars().collect();
        if current_len > 0 {
            let room = width.saturating_sub(current_len + 1);
            if room > 0 {
                current.push(' ');
                current.extend(rest.drain(..room));
            }
            lines.push(std::mem::take(&mut current));
        }
        while rest.len() > width {
            lines.push(rest.drain(..width).collect());
        }
        current = rest.into_iter().collect();
        current_len = current.chars().count();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}
