//! Tree-walking interpreter over the tally AST.

use std::io::{self, Write};
use bigint::BigInt;
use log::debug;
use num_traits::ToPrimitive;
use thiserror::Error;
use crate::ast::*;
use crate::lex::Location;

#[derive(Debug, Error)]
pub enum RuntimeError {
  #[error("{location}: variable `{name}` is already declared")]
  Redeclared {
    name: String,
    location: Location,
  },
  #[error("{location}: variable `{name}` is not declared")]
  Undeclared {
    name: String,
    location: Location,
  },
  #[error("{location}: negative loop count {count}")]
  NegativeCount {
    count: BigInt,
    location: Location,
  },
  #[error("{location}: loop count {count} is too large")]
  CountTooLarge {
    count: BigInt,
    location: Location,
  },
  #[error("{location}: integer overflow")]
  Overflow {
    location: Location,
  },
  #[error("cannot write output: {0}")]
  Io(#[from] io::Error),
}

impl RuntimeError {
  pub fn location(&self) -> Option<&Location> {
    match self {
      RuntimeError::Redeclared { location, .. }
      | RuntimeError::Undeclared { location, .. }
      | RuntimeError::NegativeCount { location, .. }
      | RuntimeError::CountTooLarge { location, .. }
      | RuntimeError::Overflow { location } => Some(location),
      RuntimeError::Io(_) => None,
    }
  }
}

/// Runs programs against a set of variables, writing output to `out`.
/// Variables are indexed by their symbol table index.
pub struct Interpreter<W> {
  vars: Vec<Option<BigInt>>,
  out: W,
}

impl<W: Write> Interpreter<W> {
  pub fn new(out: W) -> Self {
    Self {
      vars: vec![],
      out,
    }
  }

  /// The current value of the variable with symbol index `symbol`, if it is
  /// declared.
  pub fn value(&self, symbol: usize) -> Option<&BigInt> {
    self.vars.get(symbol).and_then(Option::as_ref)
  }

  pub fn into_output(self) -> W {
    self.out
  }

  pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
    self.statements(&program.statements)?;
    self.out.flush()?;
    Ok(())
  }

  fn statements(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
    statements.iter().try_for_each(|s| self.statement(s))
  }

  fn statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
    match statement {
      Statement::Declaration(id) => {
        if id.symbol >= self.vars.len() {
          self.vars.resize(id.symbol + 1, None);
        }

        let slot = &mut self.vars[id.symbol];
        if slot.is_some() {
          return Err(RuntimeError::Redeclared {
            name: id.name.clone(),
            location: id.location.clone(),
          });
        }
        *slot = Some(BigInt::zero());
      }
      Statement::Assignment(update) => {
        let value = self.eval(&update.value)?;
        *self.var_mut(&update.target)? = value;
      }
      Statement::Increment(update) => {
        let value = self.eval(&update.value)?;
        let var = self.var_mut(&update.target)?;
        *var = var.checked_add(&value)
          .map_err(|_| RuntimeError::Overflow { location: update.target.location.clone() })?;
      }
      Statement::Decrement(update) => {
        let value = self.eval(&update.value)?;
        let var = self.var_mut(&update.target)?;
        *var = var.checked_sub(&value)
          .map_err(|_| RuntimeError::Overflow { location: update.target.location.clone() })?;
      }
      Statement::Write(elements) => {
        for element in elements {
          match element {
            ListElement::Int(value) => {
              let value = self.eval(value)?;
              write!(self.out, "{}", value)?;
            }
            ListElement::String(lit) => self.out.write_all(lit.value.as_bytes())?,
            ListElement::Newline(_) => self.out.write_all(b"\n")?,
          }
        }
      }
      Statement::Loop(stmt) => {
        let count = self.eval(&stmt.count)?;
        if count.is_negative() {
          return Err(RuntimeError::NegativeCount {
            count,
            location: stmt.count.location().clone(),
          });
        }

        let times = count.to_u64().ok_or_else(|| RuntimeError::CountTooLarge {
          count,
          location: stmt.count.location().clone(),
        })?;
        debug!("repeat {} times at {}", times, stmt.count.location());

        for _ in 0..times {
          match &stmt.body {
            LoopBody::Command(command) => self.statement(command)?,
            LoopBody::Block(block) => self.statements(&block.statements)?,
          }
        }
      }
    }

    Ok(())
  }

  fn eval(&self, value: &IntValue) -> Result<BigInt, RuntimeError> {
    match value {
      IntValue::Integer(lit) => Ok(lit.value),
      IntValue::Identifier(id) => self.value(id.symbol)
        .copied()
        .ok_or_else(|| undeclared(id)),
    }
  }

  fn var_mut(&mut self, id: &Identifier) -> Result<&mut BigInt, RuntimeError> {
    self.vars.get_mut(id.symbol)
      .and_then(Option::as_mut)
      .ok_or_else(|| undeclared(id))
  }
}

fn undeclared(id: &Identifier) -> RuntimeError {
  RuntimeError::Undeclared {
    name: id.name.clone(),
    location: id.location.clone(),
  }
}
