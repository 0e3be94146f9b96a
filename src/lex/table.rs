//! The scanner's transition table, indexed by (state, character class).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
  Start,
  Identifier,
  Integer,
  Plus,
  Colon,
  Dash,
  String,
  Comment,
  /// the character read completes the token
  Final,
  /// the character read belongs to the next token
  Return,
  Error,
  EndOfLine,
  EndOfInput,
}

/// Number of states that have outgoing transitions (`Start` to `Comment`).
const SCANNING_STATES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
  Letter,
  Digit,
  Underscore,
  Quote,
  Star,
  Colon,
  Plus,
  Minus,
  Equals,
  Semicolon,
  LBrace,
  RBrace,
  LParen,
  RParen,
  Whitespace,
  Other,
  EndOfInput,
}

const NUM_CLASSES: usize = 17;

impl CharClass {
  pub const ALL: [CharClass; NUM_CLASSES] = [
    CharClass::Letter,
    CharClass::Digit,
    CharClass::Underscore,
    CharClass::Quote,
    CharClass::Star,
    CharClass::Colon,
    CharClass::Plus,
    CharClass::Minus,
    CharClass::Equals,
    CharClass::Semicolon,
    CharClass::LBrace,
    CharClass::RBrace,
    CharClass::LParen,
    CharClass::RParen,
    CharClass::Whitespace,
    CharClass::Other,
    CharClass::EndOfInput,
  ];
}

pub fn classify(c: Option<char>) -> CharClass {
  let c = match c {
    Some(c) => c,
    None => return CharClass::EndOfInput,
  };

  match c {
    'a'..='z' | 'A'..='Z' => CharClass::Letter,
    '0'..='9' => CharClass::Digit,
    '_' => CharClass::Underscore,
    '"' => CharClass::Quote,
    '*' => CharClass::Star,
    ':' => CharClass::Colon,
    '+' => CharClass::Plus,
    '-' => CharClass::Minus,
    '=' => CharClass::Equals,
    ';' => CharClass::Semicolon,
    '{' => CharClass::LBrace,
    '}' => CharClass::RBrace,
    '(' => CharClass::LParen,
    ')' => CharClass::RParen,
    c if c.is_whitespace() => CharClass::Whitespace,
    _ => CharClass::Other,
  }
}

type Rows = [[State; NUM_CLASSES]; SCANNING_STATES];

pub struct TransitionTable {
  rows: Rows,
}

impl TransitionTable {
  pub fn new() -> Self {
    use CharClass as C;

    let mut rows = [[State::Error; NUM_CLASSES]; SCANNING_STATES];

    set(&mut rows, State::Start, &[C::Letter, C::Underscore], State::Identifier);
    set(&mut rows, State::Start, &[C::Digit], State::Integer);
    set(&mut rows, State::Start, &[C::Minus], State::Dash);
    set(&mut rows, State::Start, &[C::Colon], State::Colon);
    set(&mut rows, State::Start, &[C::Plus], State::Plus);
    set(&mut rows, State::Start, &[C::Quote], State::String);
    set(&mut rows, State::Start, &[C::Star], State::Comment);
    set(&mut rows, State::Start, &[C::LBrace, C::RBrace, C::LParen, C::RParen], State::Final);
    set(&mut rows, State::Start, &[C::Semicolon], State::EndOfLine);
    set(&mut rows, State::Start, &[C::Whitespace], State::Start);
    set(&mut rows, State::Start, &[C::EndOfInput], State::EndOfInput);

    set(&mut rows, State::Identifier, &C::ALL, State::Return);
    set(&mut rows, State::Identifier, &[C::Letter, C::Digit, C::Underscore], State::Identifier);

    set(&mut rows, State::Integer, &C::ALL, State::Return);
    set(&mut rows, State::Integer, &[C::Digit], State::Integer);

    set(&mut rows, State::Plus, &C::ALL, State::Return);
    set(&mut rows, State::Plus, &[C::Equals], State::Final);

    set(&mut rows, State::Colon, &[C::Equals], State::Final);

    set(&mut rows, State::Dash, &[C::Equals], State::Final);
    set(&mut rows, State::Dash, &[C::Digit], State::Integer);

    set(&mut rows, State::String, &C::ALL, State::String);
    set(&mut rows, State::String, &[C::Quote], State::Final);
    set(&mut rows, State::String, &[C::EndOfInput], State::Error);

    set(&mut rows, State::Comment, &C::ALL, State::Comment);
    set(&mut rows, State::Comment, &[C::Star], State::Start);
    set(&mut rows, State::Comment, &[C::EndOfInput], State::Error);

    Self {
      rows,
    }
  }

  pub fn next(&self, state: State, class: CharClass) -> State {
    self.rows.get(state as usize)
      .map_or(State::Error, |row| row[class as usize])
  }
}

fn set(rows: &mut Rows, from: State, classes: &[CharClass], to: State) {
  for &class in classes {
    rows[from as usize][class as usize] = to;
  }
}
