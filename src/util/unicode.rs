use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > budget {
            break;
        }
        width += cw;
        result.push(c);
    }
    result.push('\u{2026}');
    result
}

/// Word-wrap `text` into lines of at most `max_width` cells. Words wider
/// than the limit are truncated rather than split.
pub fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word = truncate_to_width(word, max_width);
        if current.is_empty() {
            current = word;
            continue;
        }
        if display_width(&current) + 1 + display_width(&word) > max_width {
            lines.push(std::mem::take(&mut current));
            current = word;
        } else {
            current.push(' ');
            current.push_str(&word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
