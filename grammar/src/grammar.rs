use std::fmt;

pub use self::builder::GrammarBuilder;

mod builder;

/// A static context-free grammar augmented with `S' -> Start`.
///
/// Production 0 is always the augmented production and carries no action.
/// Terminal ids are dense and assigned in declaration order; non-terminal 0 is
/// the augmented start symbol.
pub struct Grammar<A> {
  pub prods: Vec<Production<A>>,
  pub terminals: Vec<String>,
  pub nts: Vec<NonterminalMetadata>,
  pub eof: TerminalId,
}

pub struct Production<A> {
  pub nt: NonterminalId,
  pub symbols: Vec<Symbol>,
  pub action: Option<A>,
}

#[derive(Debug, Clone)]
pub struct NonterminalMetadata {
  pub name: String,
  /// productions with this non-terminal on the left, in declaration order
  pub prods: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
  Terminal(TerminalId),
  Nonterminal(NonterminalId),
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct TerminalId(pub(crate) u32);

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct NonterminalId(pub(crate) u32);

impl TerminalId {
  pub fn new(id: u32) -> Self {
    TerminalId(id)
  }

  pub fn id(&self) -> u32 {
    self.0
  }

  pub fn index(&self) -> usize {
    self.0 as usize
  }
}

impl NonterminalId {
  pub const AUGMENTED_START: NonterminalId = NonterminalId(0);

  pub fn new(id: u32) -> Self {
    NonterminalId(id)
  }

  pub fn id(&self) -> u32 {
    self.0
  }

  pub fn index(&self) -> usize {
    self.0 as usize
  }
}

impl<A> Grammar<A> {
  pub const ACCEPT_PROD: usize = 0;

  pub fn num_terminals(&self) -> usize {
    self.terminals.len()
  }

  pub fn num_nonterminals(&self) -> usize {
    self.nts.len()
  }

  /// The start symbol declared by the user, i.e. the right-hand side of the
  /// augmented production.
  pub fn start(&self) -> NonterminalId {
    match self.prods[Self::ACCEPT_PROD].symbols[0] {
      Symbol::Nonterminal(nt) => nt,
      Symbol::Terminal(_) => unreachable!("augmented production derives a terminal"),
    }
  }

  pub fn terminal_ids(&self) -> impl Iterator<Item = TerminalId> + '_ {
    (0..self.terminals.len() as u32).map(TerminalId)
  }

  pub fn nonterminal_ids(&self) -> impl Iterator<Item = NonterminalId> + '_ {
    (0..self.nts.len() as u32).map(NonterminalId)
  }

  pub fn terminal_name(&self, t: TerminalId) -> &str {
    &self.terminals[t.index()]
  }

  pub fn nonterminal_name(&self, nt: NonterminalId) -> &str {
    &self.nts[nt.index()].name
  }

  pub fn symbol_name(&self, sym: Symbol) -> &str {
    match sym {
      Symbol::Terminal(t) => self.terminal_name(t),
      Symbol::Nonterminal(nt) => self.nonterminal_name(nt),
    }
  }

  pub fn productions_of(&self, nt: NonterminalId) -> &[usize] {
    &self.nts[nt.index()].prods
  }

  pub fn fmt_production(
    &self,
    prod_ix: usize,
    f: &mut impl fmt::Write,
  ) -> fmt::Result {
    let prod = &self.prods[prod_ix];
    write!(f, "{} ->", self.nonterminal_name(prod.nt))?;

    if prod.symbols.is_empty() {
      return write!(f, " ()");
    }

    for &sym in &prod.symbols {
      write!(f, " {}", self.symbol_name(sym))?;
    }

    Ok(())
  }

  pub fn production_to_string(&self, prod_ix: usize) -> String {
    let mut buf = String::new();
    // writing into a String cannot fail
    let _ = self.fmt_production(prod_ix, &mut buf);
    buf
  }
}

impl<A> fmt::Debug for Production<A> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Production")
      .field("nt", &self.nt)
      .field("symbols", &self.symbols)
      .field("action", &self.action.is_some())
      .finish()
  }
}

impl<A> fmt::Debug for Grammar<A> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Grammar")
      .field("prods", &self.prods)
      .field("terminals", &self.terminals)
      .field("nts", &self.nts)
      .field("eof", &self.eof)
      .finish()
  }
}
