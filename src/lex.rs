//! Table-driven scanner for tally source text.

use std::fmt;
use std::rc::Rc;
use bigint::{BigInt, ParseBigIntError};
use grammar::TerminalId;
use log::{debug, trace};
use thiserror::Error;
use cursor::{Cursor, Position};
use table::{State, TransitionTable, classify};

pub use symbols::{SymbolTable, Keywords};

mod cursor;
mod symbols;
mod table;

/// Token types. The discriminant of every type but `Error` is its terminal id
/// in the tally grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TokenType {
  Semicolon = 0,
  Number = 1,
  Write = 2,
  And = 3,
  Repeat = 4,
  Times = 5,
  Newline = 6,
  Identifier = 7,
  Integer = 8,
  String = 9,
  Assign = 10,
  PlusAssign = 11,
  MinusAssign = 12,
  Plus = 13,
  OpenBlock = 14,
  CloseBlock = 15,
  LParen = 16,
  RParen = 17,
  EndOfInput = 18,
  Error = 19,
}

impl TokenType {
  /// All terminal token types, in terminal id order.
  pub const TERMINALS: [TokenType; 19] = [
    TokenType::Semicolon,
    TokenType::Number,
    TokenType::Write,
    TokenType::And,
    TokenType::Repeat,
    TokenType::Times,
    TokenType::Newline,
    TokenType::Identifier,
    TokenType::Integer,
    TokenType::String,
    TokenType::Assign,
    TokenType::PlusAssign,
    TokenType::MinusAssign,
    TokenType::Plus,
    TokenType::OpenBlock,
    TokenType::CloseBlock,
    TokenType::LParen,
    TokenType::RParen,
    TokenType::EndOfInput,
  ];

  pub fn name(self) -> &'static str {
    match self {
      TokenType::Semicolon => ";",
      TokenType::Number => "number",
      TokenType::Write => "write",
      TokenType::And => "and",
      TokenType::Repeat => "repeat",
      TokenType::Times => "times",
      TokenType::Newline => "newline",
      TokenType::Identifier => "IDENTIFIER",
      TokenType::Integer => "INTEGER",
      TokenType::String => "STRING",
      TokenType::Assign => ":=",
      TokenType::PlusAssign => "+=",
      TokenType::MinusAssign => "-=",
      TokenType::Plus => "+",
      TokenType::OpenBlock => "{",
      TokenType::CloseBlock => "}",
      TokenType::LParen => "(",
      TokenType::RParen => ")",
      TokenType::EndOfInput => "$",
      TokenType::Error => "ERROR",
    }
  }

  pub fn terminal(self) -> Option<TerminalId> {
    match self {
      TokenType::Error => None,
      ty => Some(TerminalId::new(ty as u32)),
    }
  }
}

/// Where a token starts. Lines and columns start at 1; `offset` is a byte
/// offset into the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
  pub source: Rc<str>,
  pub line: u32,
  pub column: u32,
  pub offset: usize,
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}:{}:{}", self.source, self.line, self.column)
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
  None,
  Integer(BigInt),
  /// index into the symbol table
  Symbol(usize),
  /// string contents without the quotes
  Text(String),
  Error(LexError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
  pub ty: TokenType,
  pub lexeme: String,
  pub location: Location,
  pub payload: Payload,
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{} {:?} {:?}", self.location, self.ty, self.lexeme)?;
    match &self.payload {
      Payload::None => Ok(()),
      Payload::Integer(n) => write!(f, " = {}", n),
      Payload::Symbol(index) => write!(f, " #{}", index),
      Payload::Text(text) => write!(f, " = {:?}", text),
      Payload::Error(err) => write!(f, " ({})", err.kind),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("lexical error at {location}: {kind}")]
pub struct LexError {
  pub kind: LexErrorKind,
  pub location: Location,
  pub lexeme: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
  #[error("unknown character {0:?}")]
  UnknownCharacter(char),
  #[error("`:` must be followed by `=`")]
  StandaloneColon,
  #[error("`-` must be followed by `=` or a digit")]
  StandaloneDash,
  #[error("unterminated string")]
  UnterminatedString,
  #[error("unterminated comment")]
  UnterminatedComment,
  #[error("identifier is longer than {0} characters")]
  IdentifierTooLong(usize),
  #[error("integer has more than {0} digits")]
  IntegerTooLong(usize),
  #[error("too many identifiers (at most {0})")]
  SymbolTableOverflow(usize),
  #[error("invalid integer: {0}")]
  InvalidInteger(ParseBigIntError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerConfig {
  pub max_identifier_len: usize,
  pub max_integer_digits: usize,
  pub max_symbols: usize,
}

impl Default for LexerConfig {
  fn default() -> Self {
    Self {
      max_identifier_len: 32,
      max_integer_digits: 150,
      max_symbols: 1024,
    }
  }
}

pub struct Lexer<'a> {
  cursor: Cursor<'a>,
  table: TransitionTable,
  keywords: Keywords,
  symbols: SymbolTable,
  config: LexerConfig,
  source: Rc<str>,
  done: bool,
}

/// The result of scanning a whole file.
#[derive(Debug, Clone)]
pub struct Tokens {
  /// ends with exactly one `EndOfInput` token, or with an `Error` token
  pub tokens: Vec<Token>,
  pub symbols: SymbolTable,
}

pub fn tokenize(source: &str, text: &str, config: LexerConfig) -> Tokens {
  Lexer::new(source, text, config).tokenize()
}

impl<'a> Lexer<'a> {
  pub fn new(source: &str, text: &'a str, config: LexerConfig) -> Self {
    Self {
      cursor: Cursor::new(text),
      table: TransitionTable::new(),
      keywords: Keywords::new(),
      symbols: SymbolTable::with_capacity(config.max_symbols),
      config,
      source: source.into(),
      done: false,
    }
  }

  pub fn tokenize(mut self) -> Tokens {
    let mut tokens = vec![];
    for token in &mut self {
      tokens.push(token);
    }

    debug!("{} tokens, {} symbols", tokens.len(), self.symbols.len());

    Tokens {
      tokens,
      symbols: self.symbols,
    }
  }

  /// Scans one token. After `EndOfInput` this keeps returning `EndOfInput`.
  pub fn next_token(&mut self) -> Token {
    let mut state = State::Start;
    let mut lexeme = String::new();
    let mut start = self.cursor.position();

    loop {
      if state == State::Start {
        start = self.cursor.position();
      }

      let c = self.cursor.read();
      let next = self.table.next(state, classify(c));

      match next {
        State::Start => lexeme.clear(),
        State::Comment => {}
        State::Identifier
        | State::Integer
        | State::Plus
        | State::Colon
        | State::Dash
        | State::String => lexeme.extend(c),
        State::Final => {
          lexeme.extend(c);
          return self.accept_final(state, lexeme, start);
        }
        State::Return => {
          self.cursor.unget();
          return self.accept_return(state, lexeme, start);
        }
        State::EndOfLine => {
          lexeme.extend(c);
          return self.token(TokenType::Semicolon, lexeme, start, Payload::None);
        }
        State::EndOfInput => {
          return self.token(TokenType::EndOfInput, lexeme, start, Payload::None);
        }
        State::Error => {
          let kind = match state {
            State::Colon => LexErrorKind::StandaloneColon,
            State::Dash => LexErrorKind::StandaloneDash,
            State::String => LexErrorKind::UnterminatedString,
            State::Comment => LexErrorKind::UnterminatedComment,
            _ => {
              lexeme.extend(c);
              LexErrorKind::UnknownCharacter(c.unwrap_or('\0'))
            }
          };
          return self.error(kind, lexeme, start);
        }
      }

      state = next;
    }
  }

  /// `from` is the state the completing character was read in.
  fn accept_final(&mut self, from: State, lexeme: String, start: Position) -> Token {
    let ty = match (from, lexeme.as_str()) {
      (State::Plus, _) => TokenType::PlusAssign,
      (State::Colon, _) => TokenType::Assign,
      (State::Dash, _) => TokenType::MinusAssign,
      (State::String, _) => {
        let text = lexeme[1..lexeme.len() - 1].to_owned();
        return self.token(TokenType::String, lexeme, start, Payload::Text(text));
      }
      (_, "{") => TokenType::OpenBlock,
      (_, "}") => TokenType::CloseBlock,
      (_, "(") => TokenType::LParen,
      (_, ")") => TokenType::RParen,
      _ => {
        let c = lexeme.chars().last().unwrap_or('\0');
        return self.error(LexErrorKind::UnknownCharacter(c), lexeme, start);
      }
    };

    self.token(ty, lexeme, start, Payload::None)
  }

  /// `from` is the state of the token that ended before the current
  /// character.
  fn accept_return(&mut self, from: State, lexeme: String, start: Position) -> Token {
    match from {
      State::Identifier => {
        if let Some(ty) = self.keywords.get(&lexeme) {
          return self.token(ty, lexeme, start, Payload::None);
        }

        if lexeme.len() > self.config.max_identifier_len {
          let kind = LexErrorKind::IdentifierTooLong(self.config.max_identifier_len);
          return self.error(kind, lexeme, start);
        }

        match self.symbols.intern(&lexeme) {
          Some(index) => self.token(TokenType::Identifier, lexeme, start, Payload::Symbol(index)),
          None => {
            let kind = LexErrorKind::SymbolTableOverflow(self.config.max_symbols);
            self.error(kind, lexeme, start)
          }
        }
      }
      State::Integer => {
        let digits = lexeme.trim_start_matches('-').len();
        if digits > self.config.max_integer_digits {
          let kind = LexErrorKind::IntegerTooLong(self.config.max_integer_digits);
          return self.error(kind, lexeme, start);
        }

        match lexeme.parse::<BigInt>() {
          Ok(value) => self.token(TokenType::Integer, lexeme, start, Payload::Integer(value)),
          Err(err) => self.error(LexErrorKind::InvalidInteger(err), lexeme, start),
        }
      }
      _ => self.token(TokenType::Plus, lexeme, start, Payload::None),
    }
  }

  fn location(&self, pos: Position) -> Location {
    Location {
      source: self.source.clone(),
      line: pos.line,
      column: pos.column,
      offset: pos.offset,
    }
  }

  fn token(&self, ty: TokenType, lexeme: String, start: Position, payload: Payload) -> Token {
    let token = Token {
      ty,
      lexeme,
      location: self.location(start),
      payload,
    };
    trace!("token {}", token);
    token
  }

  fn error(&self, kind: LexErrorKind, lexeme: String, start: Position) -> Token {
    let err = LexError {
      kind,
      location: self.location(start),
      lexeme: lexeme.clone(),
    };
    self.token(TokenType::Error, lexeme, start, Payload::Error(err))
  }
}

/// Yields tokens up to and including the first `EndOfInput` or `Error` token.
impl<'a> Iterator for Lexer<'a> {
  type Item = Token;

  fn next(&mut self) -> Option<Token> {
    if self.done {
      return None;
    }

    let token = self.next_token();
    if matches!(token.ty, TokenType::EndOfInput | TokenType::Error) {
      self.done = true;
    }
    Some(token)
  }
}
