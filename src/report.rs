use std::io;
use std::ops::Range;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{self, termcolor::{NoColor, WriteColor}};
use lr::ParseError;
use crate::Error;
use crate::lex::Location;

/// Writes `err` to `out`. Errors that point into `text` are rendered with the
/// offending source line; grammar and table errors are written as plain reports.
pub fn emit(
  out: &mut dyn WriteColor,
  name: &str,
  text: &str,
  err: &Error,
) -> io::Result<()> {
  match err {
    Error::Grammar(err) => write!(out, "{}", lr::report::report_grammar_error(err)),
    Error::Table(err) => writeln!(out, "{}", lr::report::report_table_error(err)),
    Error::Io { .. } | Error::Output(_) => writeln!(out, "error: {}", err),
    _ => {
      let file = SimpleFile::new(name, text);
      term::emit(out, &term::Config::default(), &file, &diagnostic(text, err))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))
    }
  }
}

/// Renders `err` without colors.
pub fn report(name: &str, text: &str, err: &Error) -> String {
  let mut out = NoColor::new(vec![]);
  if emit(&mut out, name, text, err).is_err() {
    return format!("error: {}\n", err);
  }
  String::from_utf8_lossy(&out.into_inner()).into_owned()
}

fn diagnostic(text: &str, err: &Error) -> Diagnostic<()> {
  match err {
    Error::Lex(err) => Diagnostic::error()
      .with_message(format!("lexical error: {}", err.kind))
      .with_labels(vec![
        Label::primary((), span(text, &err.location, &err.lexeme)),
      ]),
    Error::Parse(ParseError::Syntax { state, lexeme, location, expected, .. }) => {
      let found = if lexeme.is_empty() {
        "end of input".to_owned()
      } else {
        format!("`{}`", lexeme)
      };

      Diagnostic::error()
        .with_message(format!("syntax error: unexpected {}", found))
        .with_labels(vec![
          Label::primary((), span(text, location, lexeme))
            .with_message(format!("expected one of: {}", expected.join(" "))),
        ])
        .with_notes(vec![format!("parser state {}", state)])
    }
    Error::Parse(err) => Diagnostic::bug()
      .with_message(err.to_string()),
    Error::Runtime(err) => {
      let diag = Diagnostic::error()
        .with_message(format!("runtime error: {}", err));
      match err.location() {
        Some(location) => diag.with_labels(vec![
          Label::primary((), span(text, location, "")),
        ]),
        None => diag,
      }
    }
    err => Diagnostic::error().with_message(err.to_string()),
  }
}

/// The byte range of `lexeme` at `location`, clamped to the text. An empty
/// lexeme marks a single character.
fn span(text: &str, location: &Location, lexeme: &str) -> Range<usize> {
  let start = location.offset.min(text.len());
  let len = if lexeme.is_empty() {
    text[start..].chars().next().map_or(0, char::len_utf8)
  } else {
    lexeme.len()
  };
  start..(start + len).min(text.len())
}
