use std::io;
use std::path::PathBuf;
use grammar::GrammarError;
use lr::{ParseError, TableError};
use thiserror::Error;
use crate::interp::RuntimeError;
use crate::lex::{LexError, Location};

pub type SyntaxError = ParseError<Location, LexError>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    source: io::Error,
  },
  #[error("cannot write output: {0}")]
  Output(#[source] io::Error),
  #[error("invalid tally grammar: {0}")]
  Grammar(#[from] GrammarError),
  #[error("tally grammar is not LR(1)")]
  Table(#[from] TableError),
  #[error(transparent)]
  Lex(#[from] LexError),
  #[error(transparent)]
  Parse(SyntaxError),
  #[error(transparent)]
  Runtime(#[from] RuntimeError),
}

impl From<SyntaxError> for Error {
  fn from(err: SyntaxError) -> Self {
    match err {
      ParseError::Lexical(err) => Error::Lex(err),
      err => Error::Parse(err),
    }
  }
}
