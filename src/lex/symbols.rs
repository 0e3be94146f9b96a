use std::hash::BuildHasherDefault;
use fnv::{FnvHashMap, FnvHasher};
use indexmap::IndexSet;
use super::TokenType;

/// Interned identifier names. An identifier's index never changes once
/// assigned.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
  names: IndexSet<String, BuildHasherDefault<FnvHasher>>,
  capacity: usize,
}

impl SymbolTable {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      names: IndexSet::default(),
      capacity,
    }
  }

  /// Returns the index of `name`, adding it if it is new. Returns `None` if
  /// the name is new and the table is full.
  pub fn intern(&mut self, name: &str) -> Option<usize> {
    if let Some(index) = self.names.get_index_of(name) {
      return Some(index);
    }

    if self.names.len() >= self.capacity {
      return None;
    }

    Some(self.names.insert_full(name.to_owned()).0)
  }

  pub fn get(&self, name: &str) -> Option<usize> {
    self.names.get_index_of(name)
  }

  pub fn name(&self, index: usize) -> Option<&str> {
    self.names.get_index(index).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
    self.names.iter().map(String::as_str)
  }
}

pub struct Keywords {
  map: FnvHashMap<&'static str, TokenType>,
}

impl Keywords {
  pub fn new() -> Self {
    let map = [
      TokenType::Number,
      TokenType::Write,
      TokenType::And,
      TokenType::Repeat,
      TokenType::Times,
      TokenType::Newline,
    ].into_iter()
      .map(|ty| (ty.name(), ty))
      .collect();

    Self {
      map,
    }
  }

  pub fn get(&self, word: &str) -> Option<TokenType> {
    self.map.get(word).copied()
  }
}
