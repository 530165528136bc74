//! Single-line text field with a char-indexed cursor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

use super::text::sanitize_single_line;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in chars, `0..=len`.
    cursor: usize,
}

impl TextField {
    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Inserts text at the cursor; line breaks are flattened.
    pub fn insert_str(&mut self, text: &str) {
        let text = sanitize_single_line(text);
        if text.is_empty() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.insert_str(idx, &text);
        self.cursor += text.chars().count();
    }

    /// Backspace semantics.
    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    /// Delete-key semantics.
    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    /// Deletes from the cursor back to the start of the line (Ctrl+U).
    pub fn delete_to_head(&mut self) {
        let idx = self.byte_index(self.cursor);
        self.value.replace_range(..idx, "");
        self.cursor = 0;
    }

    pub fn move_back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_forward(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_head(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Applies an editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.move_head(),
            KeyCode::Char('e') if ctrl => self.move_end(),
            KeyCode::Char('u') if ctrl => self.delete_to_head(),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return false,
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_back(),
            KeyCode::Right => self.move_forward(),
            KeyCode::Home => self.move_head(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// Scrolls a `width`-column window over `text` so the char at `cursor` stays
/// in view. Returns the shown slice and the cursor column inside it.
pub fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());

    // Walk back from the cursor until the window (leaving one column for
    // the cursor itself) is full.
    let mut start = cursor;
    let mut used = 1;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start -= 1;
    }

    let cursor_col: usize = chars[start..cursor]
        .iter()
        .map(|c| c.width().unwrap_or(0))
        .sum();

    let mut shown = String::new();
    let mut shown_width = 0;
    for ch in &chars[start..] {
        let w = ch.width().unwrap_or(0);
        if shown_width + w > width {
            break;
        }
        shown_width += w;
        shown.push(*ch);
    }
    (shown, cursor_col)
}
