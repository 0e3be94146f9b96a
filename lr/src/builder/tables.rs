use std::fmt::{self, Write};
use grammar::{Grammar, NonterminalId, Symbol, TerminalId};
use log::debug;
use crate::{
  Conflict,
  TableError,
  ShiftReduceConflictError,
  ReduceReduceConflictError,
  GotoConflictError,
};
use crate::item::ItemSet;
use super::Automaton;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
  Shift(u32),
  Reduce(usize),
  Accept,
  Error,
}

/// ACTION and GOTO tables, both indexed by state first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
  pub action: Vec<Vec<Action>>,
  pub goto: Vec<Vec<Option<u32>>>,
}

impl Tables {
  /// Fills the tables from the canonical collection. Every cell that would be
  /// written twice with different values is reported; no table is produced if
  /// there is any conflict.
  pub fn build<A>(
    grammar: &Grammar<A>,
    automaton: &Automaton,
  ) -> Result<Tables, TableError> {
    let (tables, errors) = gen_tables(grammar, automaton);

    if errors.is_empty() {
      debug!("tables: {} states x {} terminals, {} non-terminals",
        tables.num_states(), grammar.num_terminals(), grammar.num_nonterminals());
      Ok(tables)
    } else {
      debug!("tables: {} conflicts", errors.len());
      Err(TableError::Conflicts(errors))
    }
  }

  pub fn num_states(&self) -> usize {
    self.action.len()
  }

  pub fn action(&self, state: u32, t: TerminalId) -> Action {
    self.action.get(state as usize)
      .and_then(|row| row.get(t.index()))
      .copied()
      .unwrap_or(Action::Error)
  }

  pub fn goto(&self, state: u32, nt: NonterminalId) -> Option<u32> {
    self.goto.get(state as usize)
      .and_then(|row| row.get(nt.index()))
      .copied()
      .flatten()
  }

  /// Terminals with a non-error action in `state`.
  pub fn expected(&self, state: u32) -> Vec<TerminalId> {
    self.action.get(state as usize)
      .map(|row| {
        row.iter()
          .enumerate()
          .filter(|(_, action)| **action != Action::Error)
          .map(|(t, _)| TerminalId::new(t as u32))
          .collect()
      })
      .unwrap_or_default()
  }

  pub fn fmt_tables<A>(
    &self,
    grammar: &Grammar<A>,
    f: &mut impl Write,
  ) -> fmt::Result {
    for (state, (action_row, goto_row)) in self.action.iter().zip(&self.goto).enumerate() {
      write!(f, "{}:", state)?;

      for (t, action) in action_row.iter().enumerate() {
        let name = grammar.terminal_name(TerminalId::new(t as u32));
        match action {
          Action::Shift(to) => write!(f, " {}=s{}", name, to)?,
          Action::Reduce(prod) => write!(f, " {}=r{}", name, prod)?,
          Action::Accept => write!(f, " {}=acc", name)?,
          Action::Error => {}
        }
      }

      let gotos = goto_row.iter()
        .enumerate()
        .filter_map(|(nt, to)| to.map(|to| (nt, to)))
        .collect::<Vec<_>>();
      if !gotos.is_empty() {
        write!(f, " |")?;
        for (nt, to) in gotos {
          write!(f, " {}={}", grammar.nonterminal_name(NonterminalId::new(nt as u32)), to)?;
        }
      }

      writeln!(f)?;
    }

    Ok(())
  }

  /// Renders one line per state: the non-error ACTION cells, then the GOTO
  /// cells after a `|`.
  pub fn dump<A>(&self, grammar: &Grammar<A>) -> String {
    let mut buf = String::new();
    let _ = self.fmt_tables(grammar, &mut buf);
    buf
  }
}

fn gen_tables<A>(
  grammar: &Grammar<A>,
  automaton: &Automaton,
) -> (Tables, Vec<Conflict>) {
  let num_states = automaton.states.len();
  let mut action = vec![vec![Action::Error; grammar.num_terminals()]; num_states];
  let mut goto = vec![vec![None; grammar.num_nonterminals()]; num_states];
  let mut errors = vec![];

  for (from_state, state) in automaton.states.iter().enumerate() {
    // cells already reported as conflicting
    let mut poisoned = vec![false; grammar.num_terminals()];

    for item in state.items.iter() {
      let (lookahead, new) = match item.next_symbol(grammar) {
        Some(Symbol::Terminal(t)) => {
          match state.transitions.get(&Symbol::Terminal(t)) {
            Some(&to) => (t, Action::Shift(to)),
            None => continue,
          }
        }
        Some(Symbol::Nonterminal(_)) => continue,
        None => {
          if item.prod == Grammar::<A>::ACCEPT_PROD && item.lookahead == grammar.eof {
            (item.lookahead, Action::Accept)
          } else {
            (item.lookahead, Action::Reduce(item.prod))
          }
        }
      };

      if poisoned[lookahead.index()] {
        continue;
      }

      let old = &mut action[from_state][lookahead.index()];
      if *old == Action::Error {
        *old = new;
      } else if *old != new {
        errors.push(make_conflict_error(
          grammar,
          from_state as u32,
          &state.items,
          lookahead,
          *old,
          new));
        poisoned[lookahead.index()] = true;
      }
    }

    for (&sym, &to) in &state.transitions {
      if let Symbol::Nonterminal(nt) = sym {
        let old = &mut goto[from_state][nt.index()];
        match *old {
          Some(prev) if prev != to => {
            errors.push(Conflict::Goto(GotoConflictError {
              state: from_state as u32,
              nonterminal: grammar.nonterminal_name(nt).to_owned(),
              first: prev,
              second: to,
            }));
          }
          _ => *old = Some(to),
        }
      }
    }
  }

  (Tables { action, goto }, errors)
}

fn make_conflict_error<A>(
  grammar: &Grammar<A>,
  state: u32,
  item_set: &ItemSet,
  lookahead: TerminalId,
  old: Action,
  new: Action,
) -> Conflict {
  let state_items = item_set.item_strings(grammar);
  let lookahead_name = grammar.terminal_name(lookahead).to_owned();

  let reduce_prod = |action: Action| match action {
    Action::Reduce(prod) => Some(prod),
    Action::Accept => Some(Grammar::<A>::ACCEPT_PROD),
    Action::Shift(_) | Action::Error => None,
  };

  match (old, new) {
    (Action::Shift(shift_state), other) | (other, Action::Shift(shift_state)) => {
      let reduce = reduce_prod(other).unwrap_or(Grammar::<A>::ACCEPT_PROD);
      Conflict::ShiftReduce(ShiftReduceConflictError {
        state,
        state_items,
        shift: lookahead_name,
        shift_state,
        reduce: grammar.production_to_string(reduce),
        reduce_prod: reduce,
      })
    }
    _ => {
      let reduce1 = reduce_prod(old).unwrap_or(Grammar::<A>::ACCEPT_PROD);
      let reduce2 = reduce_prod(new).unwrap_or(Grammar::<A>::ACCEPT_PROD);
      Conflict::ReduceReduce(ReduceReduceConflictError {
        state,
        state_items,
        lookahead: lookahead_name,
        reduce1: grammar.production_to_string(reduce1),
        reduce2: grammar.production_to_string(reduce2),
        prods: (reduce1, reduce2),
      })
    }
  }
}
