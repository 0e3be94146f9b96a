use lr::{Action, Parser, ParseError, Children, ActionError};
use pretty_assertions::assert_eq;

mod parse;

use parse::{calc, lex, paren, BadChar};

fn eval(input: &str) -> Result<i64, ParseError<usize, BadChar>> {
  let grammar = calc(paren);
  let (_, tables) = lr::build(&grammar).unwrap();
  Parser::new(&grammar, &tables).parse(lex(&grammar, input))
}

#[test]
fn evaluates_by_semantic_actions() {
  assert_eq!(eval("7").unwrap(), 7);
  assert_eq!(eval("1 + 2 * 3").unwrap(), 7);
  assert_eq!(eval("( 1 + 2 ) * 3 + 4").unwrap(), 13);
  assert_eq!(eval("2 * ( ( 3 ) ) * 5").unwrap(), 30);
}

#[test]
fn syntax_error_names_the_token() {
  match eval("1 + * 2").unwrap_err() {
    ParseError::Syntax { terminal, lexeme, location, expected, .. } => {
      assert_eq!(terminal, "*");
      assert_eq!(lexeme, "*");
      assert_eq!(location, 2);
      assert_eq!(expected, vec!["(", "num"]);
    }
    err => panic!("unexpected error {:?}", err),
  }
}

#[test]
fn syntax_error_at_end_of_input() {
  let err = eval("( 1 + 2").unwrap_err();
  let message = err.to_string();
  assert!(message.starts_with("syntax error at 4: unexpected \"\" in state "), "{}", message);
  assert!(message.ends_with(", expected one of: + * )"), "{}", message);

  match err {
    ParseError::Syntax { terminal, .. } => assert_eq!(terminal, "$"),
    err => panic!("unexpected error {:?}", err),
  }
}

#[test]
fn lexical_error_stops_the_parse() {
  match eval("1 + ? 2").unwrap_err() {
    ParseError::Lexical(err) => assert_eq!(err, BadChar('?')),
    err => panic!("unexpected error {:?}", err),
  }
}

#[test]
fn truncated_token_stream() {
  let grammar = calc(paren);
  let (_, tables) = lr::build(&grammar).unwrap();
  let mut tokens = lex(&grammar, "1 +");
  tokens.pop();

  let err = Parser::new(&grammar, &tables).parse(tokens).unwrap_err();
  assert!(matches!(err, ParseError::UnexpectedEnd { .. }), "{:?}", err);
}

#[test]
fn failing_action_aborts() {
  fn no_parens(_: Children<i64>) -> Result<i64, ActionError> {
    Err(ActionError::new("parentheses are not allowed"))
  }

  let grammar = calc(no_parens);
  let (_, tables) = lr::build(&grammar).unwrap();
  let err = Parser::new(&grammar, &tables)
    .parse(lex(&grammar, "1 + ( 2 )"))
    .unwrap_err();

  assert_eq!(err.to_string(),
    "semantic action of `F -> ( E )` failed: parentheses are not allowed");
}

#[test]
fn missing_goto_is_an_error() {
  let grammar = calc(paren);
  let (_, mut tables) = lr::build(&grammar).unwrap();
  for row in &mut tables.goto {
    row.iter_mut().for_each(|cell| *cell = None);
  }

  let err = Parser::new(&grammar, &tables).parse(lex(&grammar, "1 + 2")).unwrap_err();
  match &err {
    ParseError::MissingGoto { state, nonterminal } => {
      assert_eq!(*state, 0);
      assert_eq!(nonterminal, "F");
    }
    err => panic!("unexpected error {:?}", err),
  }
  assert_eq!(err.to_string(), "no goto entry for F in state 0");
}

#[test]
fn accept_without_a_value() {
  let grammar = calc(paren);
  let (_, mut tables) = lr::build(&grammar).unwrap();
  tables.action[0][grammar.eof.index()] = Action::Accept;

  let err = Parser::new(&grammar, &tables).parse(lex(&grammar, "")).unwrap_err();
  assert!(matches!(err, ParseError::MissingRoot), "{:?}", err);
}
