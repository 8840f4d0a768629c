//! Single-line text field for form inputs.
//!
//! Supports the editing subset the login and search forms need: insert,
//! delete, and cursor movement within one line.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Editable single line with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.replace(['\n', '\r'], "");
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    /// Applies an editing key. Returns true if the key was consumed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let idx = char_to_byte_index(&self.text, self.cursor);
                self.text.drain(..idx);
                self.cursor = 0;
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len_chars()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len_chars(),
            _ => return false,
        }
        true
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = char_to_byte_index(&self.text, self.cursor);
        self.text.remove(idx);
    }

    fn delete_next_char(&mut self) {
        if self.cursor >= self.len_chars() {
            return;
        }
        let idx = char_to_byte_index(&self.text, self.cursor);
        self.text.remove(idx);
    }
}

fn char_to_byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(i, _)| i)
}
