/// A position in the source text. Lines and columns start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
  pub offset: usize,
  pub line: u32,
  pub column: u32,
}

/// Reads characters one at a time, tracking the position, and can push back
/// the last character read.
pub struct Cursor<'a> {
  text: &'a str,
  pos: Position,
  prev: Option<Position>,
}

impl<'a> Cursor<'a> {
  pub fn new(text: &'a str) -> Self {
    Self {
      text,
      pos: Position {
        offset: 0,
        line: 1,
        column: 1,
      },
      prev: None,
    }
  }

  pub fn position(&self) -> Position {
    self.pos
  }

  pub fn read(&mut self) -> Option<char> {
    self.prev = None;
    let c = self.text[self.pos.offset..].chars().next()?;

    self.prev = Some(self.pos);
    self.pos.offset += c.len_utf8();
    if c == '\n' {
      self.pos.line += 1;
      self.pos.column = 1;
    } else {
      self.pos.column += 1;
    }

    Some(c)
  }

  /// Pushes back the last character read, restoring its position. Does
  /// nothing if the last read hit the end of input.
  pub fn unget(&mut self) {
    if let Some(prev) = self.prev.take() {
      self.pos = prev;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn tracks_lines_and_columns() {
    let mut cursor = Cursor::new("ab\nc");

    assert_eq!(cursor.read(), Some('a'));
    assert_eq!(cursor.read(), Some('b'));
    assert_eq!(cursor.read(), Some('\n'));
    assert_eq!(cursor.position(), Position { offset: 3, line: 2, column: 1 });
    assert_eq!(cursor.read(), Some('c'));
    assert_eq!(cursor.read(), None);
    assert_eq!(cursor.position(), Position { offset: 4, line: 2, column: 2 });
  }

  #[test]
  fn unget_rolls_back_across_newline() {
    let mut cursor = Cursor::new("a\nb");
    cursor.read();
    cursor.read();
    cursor.unget();

    assert_eq!(cursor.position(), Position { offset: 1, line: 1, column: 2 });
    assert_eq!(cursor.read(), Some('\n'));
  }

  #[test]
  fn unget_after_end_of_input_is_a_no_op() {
    let mut cursor = Cursor::new("é");
    cursor.read();
    cursor.read();
    cursor.unget();

    assert_eq!(cursor.position(), Position { offset: 2, line: 1, column: 2 });
  }
}
