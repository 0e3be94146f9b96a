use std::fmt;
use grammar::{Grammar, TerminalId};
use log::trace;
use thiserror::Error;
use crate::{Tables, Action};

/// A token as seen by the parser.
pub trait Input {
  type Node;
  type Location: Clone + fmt::Debug;
  type Error;

  /// The terminal this token stands for, or the lexical error it carries.
  fn terminal(&self) -> Result<TerminalId, Self::Error>;

  fn lexeme(&self) -> &str;

  fn location(&self) -> Self::Location;

  /// The leaf node pushed when this token is shifted, if the token carries a
  /// payload.
  fn into_leaf(self) -> Option<Self::Node>;
}

/// The nodes of the right-hand side of a production being reduced, in
/// left-to-right order. Symbols without a node (punctuation) are `None`.
#[derive(Debug)]
pub struct Children<N> {
  nodes: Vec<Option<N>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ActionError(pub String);

pub type SemanticAction<N> = fn(Children<N>) -> Result<N, ActionError>;

#[derive(Debug, Error)]
pub enum ParseError<L, E> {
  #[error(transparent)]
  Lexical(E),
  #[error("syntax error at {location}: unexpected {lexeme:?} in state {state}, expected one of: {}",
    .expected.join(" "))]
  Syntax {
    state: u32,
    terminal: String,
    lexeme: String,
    location: L,
    expected: Vec<String>,
  },
  #[error("token stream ended without end-of-input in state {state}")]
  UnexpectedEnd {
    state: u32,
  },
  #[error("no goto entry for {nonterminal} in state {state}")]
  MissingGoto {
    state: u32,
    nonterminal: String,
  },
  #[error("accepted without a parse tree")]
  MissingRoot,
  #[error("semantic action of `{production}` failed: {message}")]
  Action {
    production: String,
    message: String,
  },
}

pub struct Parser<'a, A> {
  grammar: &'a Grammar<A>,
  tables: &'a Tables,
}

impl<N> Children<N> {
  pub fn new(nodes: Vec<Option<N>>) -> Self {
    Self {
      nodes,
    }
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Moves out the node of the `i`-th right-hand symbol.
  pub fn take(&mut self, i: usize) -> Result<N, ActionError> {
    self.nodes.get_mut(i)
      .and_then(Option::take)
      .ok_or_else(|| ActionError(format!("no node for right-hand symbol {}", i)))
  }
}

impl ActionError {
  pub fn new(message: impl Into<String>) -> Self {
    ActionError(message.into())
  }
}

impl<'a, A> Parser<'a, A> {
  pub fn new(grammar: &'a Grammar<A>, tables: &'a Tables) -> Self {
    Self {
      grammar,
      tables,
    }
  }

  /// Runs the shift-reduce loop over `tokens`, which must end with the
  /// end-of-input terminal, and returns the node built for the start symbol.
  pub fn parse<N, T, I>(
    &self,
    tokens: I,
  ) -> Result<N, ParseError<T::Location, T::Error>>
    where A: Fn(Children<N>) -> Result<N, ActionError>,
          T: Input<Node = N>,
          I: IntoIterator<Item = T>,
  {
    let mut stack: Vec<(u32, Option<N>)> = vec![(0, None)];
    let mut tokens = tokens.into_iter();
    let mut token = tokens.next();

    loop {
      let state = stack.last().map_or(0, |&(state, _)| state);
      let tok = token.as_ref().ok_or(ParseError::UnexpectedEnd { state })?;
      let terminal = tok.terminal().map_err(ParseError::Lexical)?;

      match self.tables.action(state, terminal) {
        Action::Shift(to) => {
          trace!("State: {}, Current Token: {} ({:?}) at {:?} | Action: SHIFT {}",
            state, self.grammar.terminal_name(terminal), tok.lexeme(), tok.location(), to);

          let leaf = token.take().and_then(Input::into_leaf);
          stack.push((to, leaf));
          token = tokens.next();
        }
        Action::Reduce(prod_ix) => {
          trace!("State: {}, Current Token: {} ({:?}) at {:?} | Action: REDUCE {}",
            state, self.grammar.terminal_name(terminal), tok.lexeme(), tok.location(),
            self.grammar.production_to_string(prod_ix));

          let node = self.reduce(&mut stack, prod_ix)?;
          let prod = &self.grammar.prods[prod_ix];
          let from = stack.last().map_or(0, |&(state, _)| state);
          let to = self.tables.goto(from, prod.nt)
            .ok_or_else(|| ParseError::MissingGoto {
              state: from,
              nonterminal: self.grammar.nonterminal_name(prod.nt).to_owned(),
            })?;
          stack.push((to, Some(node)));
        }
        Action::Accept => {
          trace!("State: {}, Current Token: {} | Action: ACCEPT",
            state, self.grammar.terminal_name(terminal));

          return stack.pop()
            .and_then(|(_, node)| node)
            .ok_or(ParseError::MissingRoot);
        }
        Action::Error => {
          let expected = self.tables.expected(state)
            .into_iter()
            .map(|t| self.grammar.terminal_name(t).to_owned())
            .collect();

          return Err(ParseError::Syntax {
            state,
            terminal: self.grammar.terminal_name(terminal).to_owned(),
            lexeme: tok.lexeme().to_owned(),
            location: tok.location(),
            expected,
          });
        }
      }
    }
  }

  /// Pops the right-hand side of `prod_ix` and runs its semantic action.
  fn reduce<N, L, E>(
    &self,
    stack: &mut Vec<(u32, Option<N>)>,
    prod_ix: usize,
  ) -> Result<N, ParseError<L, E>>
    where A: Fn(Children<N>) -> Result<N, ActionError>,
  {
    let prod = &self.grammar.prods[prod_ix];
    let action_error = |message: String| ParseError::Action {
      production: self.grammar.production_to_string(prod_ix),
      message,
    };

    // the bottom entry belongs to state 0 and is never popped
    let rhs_len = prod.symbols.len();
    if rhs_len >= stack.len() {
      return Err(action_error(format!(
        "stack holds {} symbols, production needs {}", stack.len() - 1, rhs_len)));
    }

    let children = stack.split_off(stack.len() - rhs_len)
      .into_iter()
      .map(|(_, node)| node)
      .collect();

    let action = prod.action.as_ref()
      .ok_or_else(|| action_error("production has no semantic action".to_owned()))?;

    action(Children::new(children)).map_err(|err| action_error(err.0))
  }
}
