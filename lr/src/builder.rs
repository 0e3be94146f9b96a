use std::fmt::{self, Write};
use grammar::{Grammar, Map, Symbol};
use log::debug;
use crate::first::{self, GrammarSets};
use crate::item::ItemSet;

pub use self::states::{closure, goto};
pub use self::tables::{Tables, Action};

mod states;
mod tables;

/// The canonical collection of LR(1) item sets. State 0 is the closure of
/// `[S' -> . Start, $]`.
#[derive(Debug)]
pub struct Automaton {
  pub sets: GrammarSets,
  pub states: Vec<State>,
}

#[derive(Debug)]
pub struct State {
  pub items: ItemSet,
  /// symbol -> target state, in the order the symbols were first seen
  pub transitions: Map<Symbol, u32>,
}

impl Automaton {
  pub fn build<A>(grammar: &Grammar<A>) -> Self {
    let sets = first::compute(grammar);
    let states = states::gen_states(grammar, &sets);

    debug!("canonical collection: {} states, {} items",
      states.len(),
      states.iter().map(|s| s.items.len()).sum::<usize>());

    Self {
      sets,
      states,
    }
  }

  pub fn goto(&self, state: u32, sym: Symbol) -> Option<u32> {
    self.states.get(state as usize)?.transitions.get(&sym).copied()
  }

  pub fn fmt_states<A>(
    &self,
    grammar: &Grammar<A>,
    f: &mut impl Write,
  ) -> fmt::Result {
    for (i, state) in self.states.iter().enumerate() {
      writeln!(f, "State {}", i)?;
      state.items.fmt_with(grammar, f)?;

      for (&sym, &to) in &state.transitions {
        writeln!(f, "  on {} goto {}", grammar.symbol_name(sym), to)?;
      }

      writeln!(f)?;
    }

    Ok(())
  }

  pub fn states_to_string<A>(&self, grammar: &Grammar<A>) -> String {
    let mut buf = String::new();
    let _ = self.fmt_states(grammar, &mut buf);
    buf
  }
}
