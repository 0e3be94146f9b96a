use std::collections::VecDeque;
use grammar::{Grammar, Map, Set, Symbol};
use crate::first::GrammarSets;
use crate::item::{Item, ItemSet};
use crate::token_set::TerminalSet;
use super::State;

/// Builds the canonical collection breadth-first. A target set is assigned the
/// next state id only if no equal set exists yet.
pub(super) fn gen_states<A>(
  grammar: &Grammar<A>,
  sets: &GrammarSets,
) -> Vec<State> {
  let mut item_sets = Set::<ItemSet>::default();
  let mut transitions = vec![];

  let mut start = ItemSet::new();
  start.insert(Item::new(Grammar::<A>::ACCEPT_PROD, 0, grammar.eof));
  closure(grammar, sets, &mut start);
  item_sets.insert(start);
  transitions.push(Map::default());

  let mut queue = VecDeque::new();
  queue.push_back(0);

  while let Some(state_ix) = queue.pop_front() {
    let kernels = compute_transitions(grammar, &item_sets[state_ix]);

    for (sym, mut item_set) in kernels {
      closure(grammar, sets, &mut item_set);

      let (next_state, is_new) = item_sets.insert_full(item_set);
      if is_new {
        transitions.push(Map::default());
        queue.push_back(next_state);
      }
      transitions[state_ix].insert(sym, next_state as u32);
    }
  }

  item_sets.into_iter()
    .zip(transitions)
    .map(|(items, transitions)| State {
      items,
      transitions,
    })
    .collect()
}

/// Expands `items` in place: for every `[A -> α . B β, a]` and every
/// `B -> γ`, adds `[B -> . γ, b]` for each `b` in FIRST(β a).
pub fn closure<A>(
  grammar: &Grammar<A>,
  sets: &GrammarSets,
  items: &mut ItemSet,
) {
  let mut new = items.iter().copied().collect::<Vec<_>>();
  let mut first = TerminalSet::new(grammar.num_terminals());

  while let Some(item) = new.pop() {
    let symbols = &grammar.prods[item.prod].symbols;
    let nt = match symbols.get(item.dot) {
      Some(Symbol::Nonterminal(nt)) => *nt,
      _ => continue,
    };

    first.clear();
    sets.first_of_sequence(&mut first, &symbols[item.dot + 1..], item.lookahead);

    for &prod in grammar.productions_of(nt) {
      for lookahead in first.iter() {
        let new_item = Item::new(prod, 0, lookahead);
        if items.insert(new_item) {
          new.push(new_item);
        }
      }
    }
  }
}

/// Advances the dot over `sym` in every item of `items` that allows it, then
/// closes the result.
pub fn goto<A>(
  grammar: &Grammar<A>,
  sets: &GrammarSets,
  items: &ItemSet,
  sym: Symbol,
) -> ItemSet {
  let mut kernel = items.iter()
    .filter(|item| item.next_symbol(grammar) == Some(sym))
    .map(Item::advance)
    .collect::<ItemSet>();
  closure(grammar, sets, &mut kernel);
  kernel
}

fn compute_transitions<A>(
  grammar: &Grammar<A>,
  items: &ItemSet,
) -> Map<Symbol, ItemSet> {
  let mut transitions = Map::<Symbol, ItemSet>::default();

  for item in items.iter() {
    if let Some(sym) = item.next_symbol(grammar) {
      transitions.entry(sym)
        .or_default()
        .insert(item.advance());
    }
  }

  transitions
}
