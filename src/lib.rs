//! tally: an LR(1) front end and interpreter for a small counting language.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use log::{debug, info};

pub use error::{Error, SyntaxError};
pub use interp::{Interpreter, RuntimeError};
pub use lang::Frontend;
pub use lex::LexerConfig;

pub mod ast;
pub mod interp;
pub mod lang;
pub mod lex;
pub mod report;
mod error;

/// What the CLI was asked to do with one source file.
#[derive(Debug, Clone, Default)]
pub struct Options {
  pub path: PathBuf,
  pub dump_tokens: bool,
  pub dump_ast: bool,
  pub dump_states: bool,
  pub no_run: bool,
  pub lexer: LexerConfig,
}

/// A source file read into memory.
#[derive(Debug, Clone)]
pub struct Source {
  /// canonical path, used in locations and diagnostics
  pub name: String,
  pub text: String,
}

impl Source {
  pub fn read(path: &Path) -> Result<Self, Error> {
    let io_error = |source| Error::Io {
      path: path.to_owned(),
      source,
    };
    let canonical = dunce::canonicalize(path).map_err(io_error)?;
    let text = fs::read_to_string(&canonical).map_err(io_error)?;

    Ok(Self {
      name: canonical.display().to_string(),
      text,
    })
  }
}

/// Lexes, parses and runs `source`, writing dumps and program output to `out`.
pub fn execute(
  options: &Options,
  source: &Source,
  out: &mut impl Write,
) -> Result<(), Error> {
  let frontend = Frontend::new()?;

  if options.dump_states {
    write!(out, "{}", frontend.automaton().states_to_string(frontend.grammar()))
      .map_err(Error::Output)?;
    write!(out, "{}", frontend.tables().dump(frontend.grammar()))
      .map_err(Error::Output)?;
  }

  let tokens = lex::tokenize(&source.name, &source.text, options.lexer).tokens;
  if options.dump_tokens {
    for token in &tokens {
      writeln!(out, "{}", token).map_err(Error::Output)?;
    }
  }

  let program = frontend.parse(tokens)?;
  info!("parsed {} top-level statements", program.statements.len());

  if options.dump_ast {
    write!(out, "{}", program).map_err(Error::Output)?;
  }

  if options.no_run {
    debug!("not running {}", source.name);
    return Ok(());
  }

  Interpreter::new(out).run(&program)?;
  Ok(())
}

/// Convenience for tests and embedding: parses and runs `text`, returning
/// what the program wrote.
pub fn run_str(text: &str) -> Result<String, Error> {
  let source = Source {
    name: "<input>".to_owned(),
    text: text.to_owned(),
  };
  let mut out = vec![];
  execute(&Options::default(), &source, &mut out)?;
  Ok(String::from_utf8_lossy(&out).into_owned())
}
