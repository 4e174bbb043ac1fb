// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{EditingSurface, ExecOutcome};

/// An in-memory text buffer with a cursor. Movement past either end of the buffer rings
/// the bell, which is what stops a repeating keyboard macro.
///
/// The point is a character offset, so multi byte text moves one character at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    point: usize,
}

impl TextBuffer {
    /// The point starts at the beginning of the buffer.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            point: 0,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    #[must_use]
    pub fn len_chars(&self) -> usize { self.content.chars().count() }

    pub fn set_point(&mut self, point: usize) { self.point = point.min(self.len_chars()); }

    pub fn forward_char(&mut self) -> ExecOutcome {
        if self.point >= self.len_chars() {
            return ExecOutcome::Bell;
        }
        self.point += 1;
        ExecOutcome::Success
    }

    pub fn backward_char(&mut self) -> ExecOutcome {
        if self.point == 0 {
            return ExecOutcome::Bell;
        }
        self.point -= 1;
        ExecOutcome::Success
    }

    /// Delete the character after the point.
    pub fn delete_char(&mut self) -> ExecOutcome {
        if self.point >= self.len_chars() {
            return ExecOutcome::Bell;
        }
        let byte_index = self.byte_index(self.point);
        self.content.remove(byte_index);
        ExecOutcome::Success
    }

    pub fn delete_backward_char(&mut self) -> ExecOutcome {
        match self.backward_char() {
            ExecOutcome::Success => self.delete_char(),
            ExecOutcome::Bell => ExecOutcome::Bell,
        }
    }

    pub fn beginning_of_line(&mut self) {
        let chars: Vec<char> = self.content.chars().collect();
        while self.point > 0 && chars[self.point - 1] != '\n' {
            self.point -= 1;
        }
    }

    pub fn end_of_line(&mut self) {
        let chars: Vec<char> = self.content.chars().collect();
        while self.point < chars.len() && chars[self.point] != '\n' {
            self.point += 1;
        }
    }

    /// Move to the same column of the next line, or its end if it is shorter.
    pub fn next_line(&mut self) -> ExecOutcome {
        let column = self.column();
        let start = self.point;
        self.end_of_line();
        if self.point >= self.len_chars() {
            self.point = start;
            return ExecOutcome::Bell;
        }
        self.point += 1;
        self.move_to_column(column);
        ExecOutcome::Success
    }

    pub fn previous_line(&mut self) -> ExecOutcome {
        let column = self.column();
        self.beginning_of_line();
        if self.point == 0 {
            self.move_to_column(column);
            return ExecOutcome::Bell;
        }
        self.point -= 1;
        self.beginning_of_line();
        self.move_to_column(column);
        ExecOutcome::Success
    }

    pub fn beginning_of_buffer(&mut self) { self.point = 0; }

    pub fn end_of_buffer(&mut self) { self.point = self.len_chars(); }

    fn column(&self) -> usize {
        self.content
            .chars()
            .take(self.point)
            .collect::<Vec<_>>()
            .iter()
            .rev()
            .take_while(|it| **it != '\n')
            .count()
    }

    /// From the beginning of the current line.
    fn move_to_column(&mut self, column: usize) {
        let line_start = self.point;
        self.end_of_line();
        let line_end = self.point;
        self.point = (line_start + column).min(line_end);
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(byte_index, _)| byte_index)
    }
}

impl EditingSurface for TextBuffer {
    fn insert_at_point(&mut self, text: &str) {
        let byte_index = self.byte_index(self.point);
        self.content.insert_str(byte_index, text);
        self.point += text.chars().count();
    }

    fn point(&self) -> usize { self.point }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_insert_moves_point() {
        let mut buffer = TextBuffer::new("héllo");
        buffer.set_point(2);
        buffer.insert_at_point("--");
        assert_eq!(buffer.content(), "hé--llo");
        assert_eq!(buffer.point(), 4);
    }

    #[test]
    fn test_movement_bells_at_the_ends() {
        let mut buffer = TextBuffer::new("ab");
        assert_eq!(buffer.backward_char(), ExecOutcome::Bell);
        assert_eq!(buffer.forward_char(), ExecOutcome::Success);
        assert_eq!(buffer.forward_char(), ExecOutcome::Success);
        assert_eq!(buffer.forward_char(), ExecOutcome::Bell);
        assert_eq!(buffer.delete_char(), ExecOutcome::Bell);
        assert_eq!(buffer.delete_backward_char(), ExecOutcome::Success);
        assert_eq!(buffer.content(), "a");
    }

    #[test]
    fn test_line_movement_keeps_column() {
        let mut buffer = TextBuffer::new("one\nx\nthree");
        buffer.set_point(2);
        assert_eq!(buffer.next_line(), ExecOutcome::Success);
        assert_eq!(buffer.point(), 5); // End of the short line.
        assert_eq!(buffer.next_line(), ExecOutcome::Success);
        assert_eq!(buffer.point(), 7);
        assert_eq!(buffer.next_line(), ExecOutcome::Bell);
        assert_eq!(buffer.previous_line(), ExecOutcome::Success);
        assert_eq!(buffer.point(), 5);
    }

    #[test]
    fn test_beginning_and_end_of_line() {
        let mut buffer = TextBuffer::new("ab\ncd");
        buffer.set_point(4);
        buffer.beginning_of_line();
        assert_eq!(buffer.point(), 3);
        buffer.end_of_line();
        assert_eq!(buffer.point(), 5);
    }
}
