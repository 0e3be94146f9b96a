use std::hash::BuildHasherDefault;
use fnv::FnvHasher;
use thiserror::Error;

pub mod grammar;

pub use self::grammar::*;

pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FnvHasher>>;
pub type Set<K> = indexmap::IndexSet<K, BuildHasherDefault<FnvHasher>>;
pub type HashMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Errors in a statically declared grammar. These are programming errors and
/// are reported before any parsing happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
  #[error("no start symbol is declared")]
  MissingStart,
  #[error("no end-of-input terminal is declared")]
  MissingEndOfInput,
  #[error("end-of-input terminal is declared twice: {first} and {second}")]
  DuplicateEndOfInput {
    first: String,
    second: String,
  },
  #[error("symbol {0} is declared twice")]
  DuplicateSymbol(String),
  #[error("terminal id {0} is out of bounds")]
  UnknownTerminal(u32),
  #[error("non-terminal id {0} is out of bounds")]
  UnknownNonterminal(u32),
  #[error("non-terminal {0} has no productions")]
  NoProductions(String),
  #[error("end-of-input terminal {terminal} appears in the production of {nonterminal}")]
  EndOfInputInProduction {
    nonterminal: String,
    terminal: String,
  },
  #[error("augmented start symbol appears in the production of {0}")]
  AugmentedStartInProduction(String),
}
