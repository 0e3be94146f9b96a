use std::fmt::{self, Write};
use grammar::GrammarError;
use crate::{
  Conflict,
  TableError,
  ShiftReduceConflictError,
  ReduceReduceConflictError,
  GotoConflictError,
};

pub fn report_table_error(err: &TableError) -> String {
  let mut buf = String::new();

  match err {
    TableError::Conflicts(conflicts) => {
      for (i, conflict) in conflicts.iter().enumerate() {
        if i != 0 {
          buf.push('\n');
        }
        let _ = write!(&mut buf, "{}", conflict);
      }
    }
  }

  buf
}

pub fn report_grammar_error(err: &GrammarError) -> String {
  format!("grammar error\nmessage: {}\n", err)
}

impl fmt::Display for Conflict {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Conflict::ShiftReduce(err) => fmt_sr_conflict(err, f),
      Conflict::ReduceReduce(err) => fmt_rr_conflict(err, f),
      Conflict::Goto(err) => fmt_goto_conflict(err, f),
    }
  }
}

fn fmt_state(state: u32, items: &[String], f: &mut impl Write) -> fmt::Result {
  writeln!(f, "at state {}:\n", state)?;

  for item in items {
    writeln!(f, "  {}", item)?;
  }

  Ok(())
}

fn fmt_rr_conflict(
  err: &ReduceReduceConflictError,
  f: &mut impl Write,
) -> fmt::Result {
  write!(f, "reduce-reduce conflict ")?;
  fmt_state(err.state, &err.state_items, f)?;

  writeln!(f,
    "\nwhich can be reduced by:\n\n  {}\n\nor:\n\n  {}\n\nwhen the lookahead is {}",
    err.reduce1,
    err.reduce2,
    err.lookahead,
  )
}

fn fmt_sr_conflict(
  err: &ShiftReduceConflictError,
  f: &mut impl Write,
) -> fmt::Result {
  write!(f, "shift-reduce conflict ")?;
  fmt_state(err.state, &err.state_items, f)?;

  writeln!(f,
    "\nwhich can shift {} (to state {})\nor reduce by:\n\n  {}",
    err.shift,
    err.shift_state,
    err.reduce,
  )
}

fn fmt_goto_conflict(
  err: &GotoConflictError,
  f: &mut impl Write,
) -> fmt::Result {
  writeln!(f,
    "goto conflict at state {}:\n\n{} leads to both state {} and state {}",
    err.state,
    err.nonterminal,
    err.first,
    err.second,
  )
}
