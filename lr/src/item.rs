use std::collections::BTreeSet;
use std::fmt;
use grammar::{Grammar, Symbol, TerminalId};

/// An LR(1) item `[A -> α . β, a]`. The lookahead is part of the identity, so
/// items with the same core and different lookaheads are distinct.
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Debug)]
pub struct Item {
  pub prod: usize,
  pub dot: usize,
  pub lookahead: TerminalId,
}

impl Item {
  pub fn new(prod: usize, dot: usize, lookahead: TerminalId) -> Self {
    Self {
      prod,
      dot,
      lookahead,
    }
  }

  pub fn advance(&self) -> Self {
    Self {
      dot: self.dot + 1,
      ..*self
    }
  }

  /// The symbol right after the dot, if any.
  pub fn next_symbol<A>(&self, grammar: &Grammar<A>) -> Option<Symbol> {
    grammar.prods[self.prod].symbols.get(self.dot).copied()
  }

  pub fn is_complete<A>(&self, grammar: &Grammar<A>) -> bool {
    self.dot == grammar.prods[self.prod].symbols.len()
  }

  pub fn fmt_with<A>(
    &self,
    grammar: &Grammar<A>,
    f: &mut impl fmt::Write,
  ) -> fmt::Result {
    let prod = &grammar.prods[self.prod];

    write!(f, "{} ->", grammar.nonterminal_name(prod.nt))?;

    for (i, &sym) in prod.symbols.iter().enumerate() {
      if i == self.dot {
        write!(f, " .")?;
      }
      write!(f, " {}", grammar.symbol_name(sym))?;
    }

    if self.dot == prod.symbols.len() {
      write!(f, " .")?;
    }

    write!(f, ", {}", grammar.terminal_name(self.lookahead))
  }

  pub fn to_string<A>(&self, grammar: &Grammar<A>) -> String {
    let mut buf = String::new();
    let _ = self.fmt_with(grammar, &mut buf);
    buf
  }
}

/// A duplicate-free set of items. Equality is set equality.
#[derive(PartialEq, Eq, Clone, Hash, Default, Debug)]
pub struct ItemSet {
  items: BTreeSet<Item>,
}

impl ItemSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns `true` if the item was not already present.
  pub fn insert(&mut self, item: Item) -> bool {
    self.items.insert(item)
  }

  pub fn contains(&self, item: &Item) -> bool {
    self.items.contains(item)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
    self.items.iter()
  }

  pub fn fmt_with<A>(
    &self,
    grammar: &Grammar<A>,
    f: &mut impl fmt::Write,
  ) -> fmt::Result {
    for item in &self.items {
      write!(f, "  ")?;
      item.fmt_with(grammar, f)?;
      writeln!(f)?;
    }
    Ok(())
  }

  pub fn item_strings<A>(&self, grammar: &Grammar<A>) -> Vec<String> {
    self.items.iter().map(|item| item.to_string(grammar)).collect()
  }
}

impl FromIterator<Item> for ItemSet {
  fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
    Self {
      items: iter.into_iter().collect(),
    }
  }
}
