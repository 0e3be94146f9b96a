use grammar::Grammar;
use thiserror::Error;

pub use builder::{Automaton, State, Tables, Action, closure, goto};
pub use driver::{Parser, Input, Children, ActionError, SemanticAction, ParseError};
pub use first::GrammarSets;
pub use item::{Item, ItemSet};
pub use token_set::TerminalSet;

pub mod first;
pub mod report;
mod builder;
mod driver;
mod item;
mod token_set;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
  #[error("{} conflict(s) in the LR(1) tables", .0.len())]
  Conflicts(Vec<Conflict>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
  ShiftReduce(ShiftReduceConflictError),
  ReduceReduce(ReduceReduceConflictError),
  Goto(GotoConflictError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReduceConflictError {
  pub state: u32,
  pub state_items: Vec<String>,
  /// the lookahead that can be shifted
  pub shift: String,
  pub shift_state: u32,
  pub reduce: String,
  pub reduce_prod: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceReduceConflictError {
  pub state: u32,
  pub state_items: Vec<String>,
  pub lookahead: String,
  pub reduce1: String,
  pub reduce2: String,
  pub prods: (usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoConflictError {
  pub state: u32,
  pub nonterminal: String,
  pub first: u32,
  pub second: u32,
}

/// Builds the canonical LR(1) collection of `grammar` and its ACTION/GOTO
/// tables.
pub fn build<A>(grammar: &Grammar<A>) -> Result<(Automaton, Tables), TableError> {
  let automaton = Automaton::build(grammar);
  let tables = Tables::build(grammar, &automaton)?;
  Ok((automaton, tables))
}
