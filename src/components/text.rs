//! Display-width aware string helpers for fixed-width cards

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Truncate `text` to at most `max_width` terminal columns, ending with an
/// ellipsis when something was cut
pub fn fit_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

/// Pad `left` and `right` apart so the line is exactly `width` columns
/// (truncating `left` if both don't fit)
pub fn spread(left: &str, right: &str, width: usize) -> String {
    let right_width = right.width();
    if right_width >= width {
        return fit_width(right, width);
    }
    let left = fit_width(left, width - right_width - 1);
    let gap = width - right_width - left.width();
    format!("{}{}{}", left, " ".repeat(gap), right)
}
