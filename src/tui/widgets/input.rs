/// Single-line text input with a char-indexed cursor. All form fields are
/// single-line, so this is deliberately much simpler than a full editor:
/// no selection, no undo, no wrapping.
#[derive(Debug, Clone, Default)]
pub struct Input {
    value: String,
    /// Cursor position in characters (not bytes), 0..=len
    cursor: usize,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input pre-filled with text, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len_chars() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_at_cursor() {
        let mut input = Input::with_value("1400");
        input.move_home();
        input.move_right();
        input.move_right();
        input.insert_char(':');
        assert_eq!(input.as_str(), "14:00");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn backspace_and_delete_are_char_based() {
        let mut input = Input::with_value("Peluquería");
        input.backspace();
        assert_eq!(input.as_str(), "Peluquerí");
        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), "eluquerí");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = Input::with_value("ab");
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor(), 2);
        input.move_home();
        input.move_left();
        assert_eq!(input.cursor(), 0);
        input.backspace();
        assert_eq!(input.as_str(), "ab");
    }
}
