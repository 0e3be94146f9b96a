use grammar::{Grammar, GrammarBuilder, Symbol, TerminalId};
use lr::{Input, Children, ActionError, SemanticAction};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("bad character {0:?}")]
pub struct BadChar(pub char);

#[derive(Debug)]
pub enum Tok {
  Term {
    terminal: TerminalId,
    text: String,
    pos: usize,
  },
  Bad(char),
}

impl Input for Tok {
  type Node = i64;
  type Location = usize;
  type Error = BadChar;

  fn terminal(&self) -> Result<TerminalId, BadChar> {
    match self {
      Tok::Term { terminal, .. } => Ok(*terminal),
      Tok::Bad(c) => Err(BadChar(*c)),
    }
  }

  fn lexeme(&self) -> &str {
    match self {
      Tok::Term { text, .. } => text,
      Tok::Bad(_) => "",
    }
  }

  fn location(&self) -> usize {
    match self {
      Tok::Term { pos, .. } => *pos,
      Tok::Bad(_) => 0,
    }
  }

  fn into_leaf(self) -> Option<i64> {
    match self {
      Tok::Term { text, .. } => text.parse().ok(),
      Tok::Bad(_) => None,
    }
  }
}

/// Splits `input` on whitespace. Integers become `num`, `?` becomes a bad
/// token, anything else is looked up by terminal name. The end-of-input
/// token is appended.
pub fn lex<A>(grammar: &Grammar<A>, input: &str) -> Vec<Tok> {
  let find = |name: &str| {
    grammar.terminal_ids()
      .find(|&t| grammar.terminal_name(t) == name)
      .unwrap_or_else(|| panic!("no terminal {}", name))
  };

  let mut tokens = input.split_whitespace()
    .enumerate()
    .map(|(pos, text)| {
      if text == "?" {
        Tok::Bad('?')
      } else if text.chars().all(|c| c.is_ascii_digit()) {
        Tok::Term { terminal: find("num"), text: text.to_owned(), pos }
      } else {
        Tok::Term { terminal: find(text), text: text.to_owned(), pos }
      }
    })
    .collect::<Vec<_>>();

  let pos = tokens.len();
  tokens.push(Tok::Term { terminal: grammar.eof, text: String::new(), pos });
  tokens
}

fn pass(mut c: Children<i64>) -> Result<i64, ActionError> {
  c.take(0)
}

fn add(mut c: Children<i64>) -> Result<i64, ActionError> {
  Ok(c.take(0)? + c.take(2)?)
}

fn mul(mut c: Children<i64>) -> Result<i64, ActionError> {
  Ok(c.take(0)? * c.take(2)?)
}

pub fn paren(mut c: Children<i64>) -> Result<i64, ActionError> {
  c.take(1)
}

/// E -> E + T | T
/// T -> T * F | F
/// F -> ( E ) | num
pub fn calc(paren: SemanticAction<i64>) -> Grammar<SemanticAction<i64>> {
  let mut b = GrammarBuilder::<SemanticAction<i64>>::new();
  let plus = Symbol::Terminal(b.terminal("+"));
  let mult = Symbol::Terminal(b.terminal("*"));
  let lparen = Symbol::Terminal(b.terminal("("));
  let rparen = Symbol::Terminal(b.terminal(")"));
  let num = Symbol::Terminal(b.terminal("num"));
  b.end_of_input("$");
  let e = b.nonterminal("E");
  let t = b.nonterminal("T");
  let f = b.nonterminal("F");
  b.start(e);
  let (se, st, sf) = (Symbol::Nonterminal(e), Symbol::Nonterminal(t), Symbol::Nonterminal(f));
  b.production(e, vec![se, plus, st], add);
  b.production(e, vec![st], pass);
  b.production(t, vec![st, mult, sf], mul);
  b.production(t, vec![sf], pass);
  b.production(f, vec![lparen, se, rparen], paren);
  b.production(f, vec![num], pass);
  b.build().unwrap()
}
