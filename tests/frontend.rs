use insta::assert_snapshot;
use lr::ParseError;
use pretty_assertions::assert_eq;
use tally::ast::*;
use tally::lex::{tokenize, LexErrorKind, LexerConfig};
use tally::{Frontend, SyntaxError};

fn parse(text: &str) -> Result<Program, SyntaxError> {
  let _ = env_logger::builder().is_test(true).try_init();
  let tokens = tokenize("t.tly", text, LexerConfig::default()).tokens;
  Frontend::new().unwrap().parse(tokens)
}

#[test]
fn declaration_and_assignment() {
  let program = parse("number x; x := 5;").unwrap();

  assert_snapshot!(program.to_string(), @r###"
  Program
    StatementList
      Declaration
        Identifier: x
      Assignment
        Identifier: x
        IntValue
          Integer: 5
  "###);
}

#[test]
fn write_statement() {
  let program = parse("write \"hi\" and newline;").unwrap();

  assert_snapshot!(program.to_string(), @r###"
  Program
    StatementList
      WriteStatement
        OutputList
          ListElement
            String: "hi"
          ListElement
            Newline
  "###);
}

#[test]
fn loop_over_code_block() {
  let program = parse("number x; repeat 3 times { x += 1; };").unwrap();

  assert_snapshot!(program.to_string(), @r###"
  Program
    StatementList
      Declaration
        Identifier: x
      LoopStatement
        IntValue
          Integer: 3
        CodeBlock
          Increment
            Identifier: x
            IntValue
              Integer: 1
  "###);

  match &program.statements[1] {
    Statement::Loop(LoopStatement { body: LoopBody::Block(block), .. }) => {
      assert_eq!(block.statements.len(), 1);
    }
    statement => panic!("unexpected statement {:?}", statement),
  }
}

#[test]
fn nested_loop_commands() {
  let program = parse("repeat n times repeat 2 times x -= y;").unwrap();

  assert_snapshot!(program.to_string(), @r###"
  Program
    StatementList
      LoopStatement
        IntValue
          Identifier: n
        LoopStatement
          IntValue
            Integer: 2
          Decrement
            Identifier: x
            IntValue
              Identifier: y
  "###);
}

#[test]
fn identifiers_carry_symbols_and_locations() {
  let program = parse("number abc;\n  abc := abc;").unwrap();

  match &program.statements[1] {
    Statement::Assignment(Update { target, value: IntValue::Identifier(value) }) => {
      assert_eq!(target.symbol, value.symbol);
      assert_eq!((target.location.line, target.location.column), (2, 3));
      assert_eq!((value.location.line, value.location.column), (2, 10));
    }
    statement => panic!("unexpected statement {:?}", statement),
  }
}

#[test]
fn missing_right_hand_side() {
  let err = parse("x := ;").unwrap_err();

  match &err {
    ParseError::Syntax { lexeme, location, terminal, expected, .. } => {
      assert_eq!(lexeme, ";");
      assert_eq!(terminal, ";");
      assert_eq!((location.line, location.column), (1, 6));
      assert_eq!(expected, &vec!["IDENTIFIER".to_owned(), "INTEGER".to_owned()]);
    }
    err => panic!("unexpected error {:?}", err),
  }
  assert!(err.to_string().starts_with("syntax error at t.tly:1:6: unexpected \";\""));
}

#[test]
fn missing_semicolon_at_end() {
  let err = parse("number x").unwrap_err();

  match err {
    ParseError::Syntax { terminal, expected, .. } => {
      assert_eq!(terminal, "$");
      assert_eq!(expected, vec![";".to_owned()]);
    }
    err => panic!("unexpected error {:?}", err),
  }
}

#[test]
fn empty_program_is_rejected() {
  assert!(matches!(parse(""), Err(ParseError::Syntax { state: 0, .. })));
}

#[test]
fn unused_terminals_are_syntax_errors() {
  assert!(matches!(parse("x := 1 + 2;"), Err(ParseError::Syntax { .. })));
  assert!(matches!(parse("write (x);"), Err(ParseError::Syntax { .. })));
}

#[test]
fn lexical_error_stops_parse() {
  match parse("number x; x := 1 - 2;") {
    Err(ParseError::Lexical(err)) => assert_eq!(err.kind, LexErrorKind::StandaloneDash),
    result => panic!("unexpected result {:?}", result),
  }
}

#[test]
fn frontend_is_reusable() {
  let frontend = Frontend::new().unwrap();

  for text in ["number a;", "write 1;", "a += -3;"] {
    let tokens = tokenize("t.tly", text, LexerConfig::default()).tokens;
    assert_eq!(frontend.parse(tokens).unwrap().statements.len(), 1);
  }
}
