//! Terminal-width helpers. Positions inside a line are char (rune) indices,
//! never byte offsets.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_display_width).sum()
}

/// Display width of a single character in terminal cells. Tabs count as 4.
pub fn char_display_width(c: char) -> usize {
    if c == '\t' {
        4
    } else {
        UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = if grapheme == "\t" {
            4
        } else {
            UnicodeWidthStr::width(grapheme)
        };
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of char index `pos`, or `s.len()` past the end
pub fn char_to_byte(s: &str, pos: usize) -> usize {
    s.char_indices().nth(pos).map_or(s.len(), |(byte, _)| byte)
}

/// Cells taken by the first `pos` chars
pub fn width_before(s: &str, pos: usize) -> usize {
    s.chars().take(pos).map(char_display_width).sum()
}

/// First char index to draw so that char `caret` stays inside a window
/// `width` cells wide, scrolling as little as possible.
pub fn visible_start(s: &str, caret: usize, width: usize) -> usize {
    if width == 0 {
        return caret;
    }
    let mut start = 0;
    let mut span = width_before(s, caret);
    let mut chars = s.chars();
    // Keep one cell for the caret itself
    while span >= width {
        match chars.next() {
            Some(c) => {
                span -= char_display_width(c);
                start += 1;
            }
            None => break,
        }
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn display_width_wide() {
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("🎉"), 2);
        assert_eq!(display_width("hello你好"), 9);
    }

    #[test]
    fn display_width_combining() {
        assert_eq!(display_width("cafe\u{0301}"), 4);
    }

    #[test]
    fn display_width_tab() {
        assert_eq!(display_width("a\tb"), 6);
    }

    #[test]
    fn truncate() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("hello", 5), "hello");
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn char_positions() {
        assert_eq!(char_count("ФууБар"), 6);
        assert_eq!(char_to_byte("ФууБар", 3), 6);
        assert_eq!(char_to_byte("ФууБар", 6), 12);
        assert_eq!(char_to_byte("ФууБар", 9), 12);
    }

    #[test]
    fn width_before_counts_cells() {
        assert_eq!(width_before("a你b", 0), 0);
        assert_eq!(width_before("a你b", 2), 3);
        assert_eq!(width_before("a你b", 10), 4);
    }

    #[test]
    fn visible_start_scrolls_minimally() {
        assert_eq!(visible_start("hello world", 3, 10), 0);
        assert_eq!(visible_start("hello world", 9, 10), 0);
        assert_eq!(visible_start("hello world", 10, 10), 1);
        assert_eq!(visible_start("hello world", 11, 10), 2);
        assert_eq!(visible_start("你你你", 3, 4), 2);
    }
}
