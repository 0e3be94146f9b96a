//! compute NULLABLE, FIRST, and FOLLOW sets.
//!
//! Every set is computed by iterating an `extend_*` pass until it reports no
//! change, so running a pass again on converged sets is a no-op.

use bitvec::prelude::*;
use itertools::Itertools;
use grammar::{Grammar, NonterminalId, Symbol, TerminalId};
use log::debug;
use crate::token_set::TerminalSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSets {
  /// indexed by non-terminal id
  pub nullable: BitVec,
  /// indexed by non-terminal id
  pub first: Vec<TerminalSet>,
  /// indexed by non-terminal id
  pub follow: Vec<TerminalSet>,
}

pub fn compute<A>(grammar: &Grammar<A>) -> GrammarSets {
  let nullable = compute_nullable(grammar);
  let first = compute_first(grammar, &nullable);
  let follow = compute_follow(grammar, &nullable, &first);

  for nt in grammar.nonterminal_ids() {
    debug!("{}: nullable={}, FIRST={}, FOLLOW={}",
      grammar.nonterminal_name(nt),
      nullable[nt.index()],
      fmt_terminals(grammar, &first[nt.index()]),
      fmt_terminals(grammar, &follow[nt.index()]));
  }

  GrammarSets {
    nullable,
    first,
    follow,
  }
}

pub fn compute_nullable<A>(grammar: &Grammar<A>) -> BitVec {
  let mut nullable = bitvec![0; grammar.num_nonterminals()];
  while extend_nullable(grammar, &mut nullable) {}
  nullable
}

/// One pass over all productions. Returns `true` if any non-terminal became
/// nullable.
pub fn extend_nullable<A>(grammar: &Grammar<A>, nullable: &mut BitVec) -> bool {
  let mut changed = false;

  for prod in &grammar.prods {
    if nullable[prod.nt.index()] {
      continue;
    }

    let all_nullable = prod.symbols.iter().all(|sym| match sym {
      Symbol::Terminal(_) => false,
      Symbol::Nonterminal(nt) => nullable[nt.index()],
    });

    if all_nullable {
      nullable.set(prod.nt.index(), true);
      changed = true;
    }
  }

  changed
}

pub fn compute_first<A>(grammar: &Grammar<A>, nullable: &BitSlice) -> Vec<TerminalSet> {
  let mut first = vec![TerminalSet::new(grammar.num_terminals()); grammar.num_nonterminals()];
  while extend_first(grammar, nullable, &mut first) {}
  first
}

/// One pass over all productions. Returns `true` if any FIRST set grew.
pub fn extend_first<A>(
  grammar: &Grammar<A>,
  nullable: &BitSlice,
  first: &mut [TerminalSet],
) -> bool {
  let mut changed = false;
  let mut prod_first = TerminalSet::new(grammar.num_terminals());

  for prod in &grammar.prods {
    prod_first.clear();
    sequence_first(&mut prod_first, nullable, first, &prod.symbols);
    changed |= first[prod.nt.index()].union_with(&prod_first);
  }

  changed
}

pub fn compute_follow<A>(
  grammar: &Grammar<A>,
  nullable: &BitSlice,
  first: &[TerminalSet],
) -> Vec<TerminalSet> {
  let mut follow = vec![TerminalSet::new(grammar.num_terminals()); grammar.num_nonterminals()];
  follow[NonterminalId::AUGMENTED_START.index()].insert(grammar.eof);
  while extend_follow(grammar, nullable, first, &mut follow) {}
  follow
}

/// One pass over every non-terminal occurrence `A -> α B β`: adds FIRST(β) to
/// FOLLOW(B), and FOLLOW(A) as well when β is nullable. Returns `true` if any
/// FOLLOW set grew.
pub fn extend_follow<A>(
  grammar: &Grammar<A>,
  nullable: &BitSlice,
  first: &[TerminalSet],
  follow: &mut [TerminalSet],
) -> bool {
  let mut changed = false;
  let mut rest_first = TerminalSet::new(grammar.num_terminals());

  for prod in &grammar.prods {
    for (i, sym) in prod.symbols.iter().enumerate() {
      let nt = match sym {
        Symbol::Nonterminal(nt) => *nt,
        Symbol::Terminal(_) => continue,
      };

      rest_first.clear();
      let rest_nullable = sequence_first(
        &mut rest_first, nullable, first, &prod.symbols[i + 1..]);
      if rest_nullable && prod.nt != nt {
        let lhs_follow = follow[prod.nt.index()].clone();
        rest_first.union_with(&lhs_follow);
      }

      changed |= follow[nt.index()].union_with(&rest_first);
    }
  }

  changed
}

/// Adds FIRST(`symbols`) to `out`. Returns `true` if the whole sequence is
/// nullable (in particular, if it is empty).
pub fn sequence_first(
  out: &mut TerminalSet,
  nullable: &BitSlice,
  first: &[TerminalSet],
  symbols: &[Symbol],
) -> bool {
  for sym in symbols {
    match sym {
      Symbol::Terminal(t) => {
        out.insert(*t);
        return false;
      }
      Symbol::Nonterminal(nt) => {
        out.union_with(&first[nt.index()]);
        if !nullable[nt.index()] {
          return false;
        }
      }
    }
  }

  true
}

impl GrammarSets {
  /// Adds FIRST(`symbols` `lookahead`) to `out`.
  pub fn first_of_sequence(
    &self,
    out: &mut TerminalSet,
    symbols: &[Symbol],
    lookahead: TerminalId,
  ) {
    if sequence_first(out, &self.nullable, &self.first, symbols) {
      out.insert(lookahead);
    }
  }

  pub fn is_nullable(&self, nt: NonterminalId) -> bool {
    self.nullable[nt.index()]
  }

  pub fn first(&self, nt: NonterminalId) -> &TerminalSet {
    &self.first[nt.index()]
  }

  pub fn follow(&self, nt: NonterminalId) -> &TerminalSet {
    &self.follow[nt.index()]
  }
}

pub(crate) fn fmt_terminals<A>(grammar: &Grammar<A>, set: &TerminalSet) -> String {
  format!("{{{}}}", set.iter().map(|t| grammar.terminal_name(t)).join(", "))
}

#[cfg(test)]
mod tests {
  use super::*;
  use grammar::GrammarBuilder;
  use pretty_assertions::assert_eq;

  /// E -> E + T | T
  /// T -> T * F | F
  /// F -> ( E ) | id
  fn expr() -> Grammar<()> {
    let mut b = GrammarBuilder::new();
    let plus = Symbol::Terminal(b.terminal("+"));
    let mult = Symbol::Terminal(b.terminal("*"));
    let lparen = Symbol::Terminal(b.terminal("("));
    let rparen = Symbol::Terminal(b.terminal(")"));
    let id = Symbol::Terminal(b.terminal("id"));
    b.end_of_input("$");
    let e = b.nonterminal("E");
    let t = b.nonterminal("T");
    let f = b.nonterminal("F");
    b.start(e);
    let (se, st, sf) = (Symbol::Nonterminal(e), Symbol::Nonterminal(t), Symbol::Nonterminal(f));
    b.production(e, vec![se, plus, st], ());
    b.production(e, vec![st], ());
    b.production(t, vec![st, mult, sf], ());
    b.production(t, vec![sf], ());
    b.production(f, vec![lparen, se, rparen], ());
    b.production(f, vec![id], ());
    b.build().unwrap()
  }

  /// Z -> d | X Y Z
  /// Y -> () | c
  /// X -> Y | a
  fn nullable_grammar() -> Grammar<()> {
    let mut b = GrammarBuilder::new();
    let a = Symbol::Terminal(b.terminal("a"));
    let c = Symbol::Terminal(b.terminal("c"));
    let d = Symbol::Terminal(b.terminal("d"));
    b.end_of_input("$");
    let z = b.nonterminal("Z");
    let y = b.nonterminal("Y");
    let x = b.nonterminal("X");
    b.start(z);
    let (sz, sy, sx) = (Symbol::Nonterminal(z), Symbol::Nonterminal(y), Symbol::Nonterminal(x));
    b.production(z, vec![d], ());
    b.production(z, vec![sx, sy, sz], ());
    b.production(y, vec![], ());
    b.production(y, vec![c], ());
    b.production(x, vec![sy], ());
    b.production(x, vec![a], ());
    b.build().unwrap()
  }

  fn table(grammar: &Grammar<()>, sets: &[TerminalSet]) -> Vec<String> {
    grammar.nonterminal_ids()
      .map(|nt| format!("{}: {}",
        grammar.nonterminal_name(nt),
        fmt_terminals(grammar, &sets[nt.index()])))
      .collect()
  }

  #[test]
  fn expr_first_and_follow() {
    let g = expr();
    let sets = compute(&g);

    assert!(sets.nullable.not_any());
    assert_eq!(table(&g, &sets.first), vec![
      "S': {(, id}",
      "E: {(, id}",
      "T: {(, id}",
      "F: {(, id}",
    ]);
    assert_eq!(table(&g, &sets.follow), vec![
      "S': {$}",
      "E: {+, ), $}",
      "T: {+, *, ), $}",
      "F: {+, *, ), $}",
    ]);
  }

  #[test]
  fn nullable_first_and_follow() {
    let g = nullable_grammar();
    let sets = compute(&g);

    let nullable = g.nonterminal_ids()
      .filter(|&nt| sets.is_nullable(nt))
      .map(|nt| g.nonterminal_name(nt))
      .collect::<Vec<_>>();
    assert_eq!(nullable, vec!["Y", "X"]);

    assert_eq!(table(&g, &sets.first), vec![
      "S': {a, c, d}",
      "Z: {a, c, d}",
      "Y: {c}",
      "X: {a, c}",
    ]);
    assert_eq!(table(&g, &sets.follow), vec![
      "S': {$}",
      "Z: {$}",
      "Y: {a, c, d}",
      "X: {a, c, d}",
    ]);
  }

  #[test]
  fn passes_are_idempotent_after_convergence() {
    for g in &[expr(), nullable_grammar()] {
      let mut sets = compute(g);
      let converged = sets.clone();

      assert!(!extend_nullable(g, &mut sets.nullable));
      assert!(!extend_first(g, &sets.nullable, &mut sets.first));
      assert!(!extend_follow(g, &sets.nullable, &sets.first, &mut sets.follow));
      assert_eq!(sets, converged);
      assert_eq!(compute(g), converged);
    }
  }

  #[test]
  fn first_of_sequence_appends_lookahead_only_when_nullable() {
    let g = nullable_grammar();
    let sets = compute(&g);
    let y = Symbol::Nonterminal(NonterminalId::new(2));
    let x = Symbol::Nonterminal(NonterminalId::new(3));
    let d = Symbol::Terminal(TerminalId::new(2));

    let mut out = TerminalSet::new(g.num_terminals());
    sets.first_of_sequence(&mut out, &[x, y], g.eof);
    assert_eq!(fmt_terminals(&g, &out), "{a, c, $}");

    out.clear();
    sets.first_of_sequence(&mut out, &[y, d], g.eof);
    assert_eq!(fmt_terminals(&g, &out), "{c, d}");

    out.clear();
    sets.first_of_sequence(&mut out, &[], TerminalId::new(0));
    assert_eq!(fmt_terminals(&g, &out), "{a}");
  }
}
