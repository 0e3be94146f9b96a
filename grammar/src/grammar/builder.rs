use log::debug;
use crate::{GrammarError, HashMap};
use super::{Grammar, Production, NonterminalMetadata, NonterminalId, TerminalId, Symbol};

/// Collects symbol declarations and productions, then validates them into a
/// [`Grammar`].
///
/// Declaration methods never fail; every problem is reported by
/// [`GrammarBuilder::build`].
pub struct GrammarBuilder<A> {
  terminals: Vec<String>,
  nts: Vec<String>,
  names: HashMap<String, Symbol>,
  eof: Option<TerminalId>,
  start: Option<NonterminalId>,
  prods: Vec<(NonterminalId, Vec<Symbol>, A)>,
  errors: Vec<GrammarError>,
}

const AUGMENTED_START_NAME: &str = "S'";

impl<A> GrammarBuilder<A> {
  pub fn new() -> Self {
    let mut names = HashMap::default();
    names.insert(
      AUGMENTED_START_NAME.to_owned(),
      Symbol::Nonterminal(NonterminalId::AUGMENTED_START));

    GrammarBuilder {
      terminals: vec![],
      nts: vec![AUGMENTED_START_NAME.to_owned()],
      names,
      eof: None,
      start: None,
      prods: vec![],
      errors: vec![],
    }
  }

  pub fn terminal(&mut self, name: impl Into<String>) -> TerminalId {
    let name = name.into();
    let t = TerminalId(self.terminals.len() as u32);
    self.declare(name.clone(), Symbol::Terminal(t));
    self.terminals.push(name);
    t
  }

  pub fn end_of_input(&mut self, name: impl Into<String>) -> TerminalId {
    let t = self.terminal(name);
    if let Some(first) = self.eof {
      self.errors.push(GrammarError::DuplicateEndOfInput {
        first: self.terminals[first.index()].clone(),
        second: self.terminals[t.index()].clone(),
      });
    } else {
      self.eof = Some(t);
    }
    t
  }

  pub fn nonterminal(&mut self, name: impl Into<String>) -> NonterminalId {
    let name = name.into();
    let nt = NonterminalId(self.nts.len() as u32);
    self.declare(name.clone(), Symbol::Nonterminal(nt));
    self.nts.push(name);
    nt
  }

  pub fn start(&mut self, nt: NonterminalId) {
    self.start = Some(nt);
  }

  /// Adds `lhs -> symbols` and returns its production id. Ids start at 1,
  /// since 0 is the augmented production.
  pub fn production(
    &mut self,
    lhs: NonterminalId,
    symbols: Vec<Symbol>,
    action: A,
  ) -> usize {
    self.prods.push((lhs, symbols, action));
    self.prods.len()
  }

  fn declare(&mut self, name: String, sym: Symbol) {
    if self.names.contains_key(&name) {
      self.errors.push(GrammarError::DuplicateSymbol(name));
    } else {
      self.names.insert(name, sym);
    }
  }

  fn check_nonterminal(&self, nt: NonterminalId) -> Result<(), GrammarError> {
    if nt.index() < self.nts.len() {
      Ok(())
    } else {
      Err(GrammarError::UnknownNonterminal(nt.id()))
    }
  }

  fn validate(&self) -> Result<(NonterminalId, TerminalId), GrammarError> {
    if let Some(err) = self.errors.first() {
      return Err(err.clone());
    }

    let start = self.start.ok_or(GrammarError::MissingStart)?;
    let eof = self.eof.ok_or(GrammarError::MissingEndOfInput)?;
    self.check_nonterminal(start)?;
    if start == NonterminalId::AUGMENTED_START {
      return Err(GrammarError::AugmentedStartInProduction(
        AUGMENTED_START_NAME.to_owned()));
    }

    for (lhs, symbols, _) in &self.prods {
      self.check_nonterminal(*lhs)?;
      let lhs_name = &self.nts[lhs.index()];
      if *lhs == NonterminalId::AUGMENTED_START {
        return Err(GrammarError::AugmentedStartInProduction(lhs_name.clone()));
      }

      for sym in symbols {
        match *sym {
          Symbol::Terminal(t) if t.index() >= self.terminals.len() => {
            return Err(GrammarError::UnknownTerminal(t.id()));
          }
          Symbol::Terminal(t) if t == eof => {
            return Err(GrammarError::EndOfInputInProduction {
              nonterminal: lhs_name.clone(),
              terminal: self.terminals[t.index()].clone(),
            });
          }
          Symbol::Terminal(_) => {}
          Symbol::Nonterminal(nt) => {
            self.check_nonterminal(nt)?;
            if nt == NonterminalId::AUGMENTED_START {
              return Err(GrammarError::AugmentedStartInProduction(lhs_name.clone()));
            }
          }
        }
      }
    }

    Ok((start, eof))
  }

  pub fn build(self) -> Result<Grammar<A>, GrammarError> {
    let (start, eof) = self.validate()?;

    let mut nts = self.nts.into_iter()
      .map(|name| NonterminalMetadata {
        name,
        prods: vec![],
      })
      .collect::<Vec<_>>();

    let mut prods = Vec::with_capacity(self.prods.len() + 1);
    prods.push(Production {
      nt: NonterminalId::AUGMENTED_START,
      symbols: vec![Symbol::Nonterminal(start)],
      action: None,
    });
    nts[0].prods.push(0);

    for (lhs, symbols, action) in self.prods {
      nts[lhs.index()].prods.push(prods.len());
      prods.push(Production {
        nt: lhs,
        symbols,
        action: Some(action),
      });
    }

    if let Some(meta) = nts.iter().find(|meta| meta.prods.is_empty()) {
      return Err(GrammarError::NoProductions(meta.name.clone()));
    }

    debug!("grammar: {} terminals, {} non-terminals, {} productions",
      self.terminals.len(), nts.len(), prods.len());

    Ok(Grammar {
      prods,
      terminals: self.terminals,
      nts,
      eof,
    })
  }
}

impl<A> Default for GrammarBuilder<A> {
  fn default() -> Self {
    Self::new()
  }
}
