//! The tally grammar, its semantic actions, and the parser built from them.

use grammar::{Grammar, GrammarBuilder, GrammarError, NonterminalId, Symbol, TerminalId};
use log::debug;
use lr::{Automaton, Tables, Parser, ParseError, Input, Children, ActionError, SemanticAction};
use crate::ast::*;
use crate::lex::{Token, TokenType, Payload, Location, LexError, LexErrorKind};
use crate::Error;

type Action = SemanticAction<Node>;

pub fn grammar() -> Result<Grammar<Action>, GrammarError> {
  let mut b = GrammarBuilder::<Action>::new();

  for ty in TokenType::TERMINALS {
    if ty == TokenType::EndOfInput {
      b.end_of_input(ty.name());
    } else {
      b.terminal(ty.name());
    }
  }

  let program = b.nonterminal("Program");
  let statement_list = b.nonterminal("StatementList");
  let statement = b.nonterminal("Statement");
  let command = b.nonterminal("Command");
  let declaration = b.nonterminal("Declaration");
  let assignment = b.nonterminal("Assignment");
  let increment = b.nonterminal("Increment");
  let decrement = b.nonterminal("Decrement");
  let write_statement = b.nonterminal("WriteStatement");
  let output_list = b.nonterminal("OutputList");
  let list_element = b.nonterminal("ListElement");
  let loop_statement = b.nonterminal("LoopStatement");
  let code_block = b.nonterminal("CodeBlock");
  let int_value = b.nonterminal("IntValue");
  b.start(program);

  let t = |ty: TokenType| Symbol::Terminal(TerminalId::new(ty as u32));
  let n = Symbol::Nonterminal;

  let prods: Vec<(NonterminalId, Vec<Symbol>, Action)> = vec![
    (program, vec![n(statement_list)], make_program),
    (statement_list, vec![n(statement_list), n(statement)], append_statement),
    (statement_list, vec![n(statement)], single_statement),
    (statement, vec![n(command), t(TokenType::Semicolon)], first),
    (command, vec![n(declaration)], first),
    (command, vec![n(assignment)], first),
    (command, vec![n(increment)], first),
    (command, vec![n(decrement)], first),
    (command, vec![n(write_statement)], first),
    (command, vec![n(loop_statement)], first),
    (declaration, vec![t(TokenType::Number), t(TokenType::Identifier)], make_declaration),
    (assignment,
      vec![t(TokenType::Identifier), t(TokenType::Assign), n(int_value)],
      make_assignment),
    (increment,
      vec![t(TokenType::Identifier), t(TokenType::PlusAssign), n(int_value)],
      make_increment),
    (decrement,
      vec![t(TokenType::Identifier), t(TokenType::MinusAssign), n(int_value)],
      make_decrement),
    (write_statement, vec![t(TokenType::Write), n(output_list)], make_write),
    (output_list,
      vec![n(output_list), t(TokenType::And), n(list_element)],
      append_element),
    (output_list, vec![n(list_element)], single_element),
    (list_element, vec![n(int_value)], int_element),
    (list_element, vec![t(TokenType::String)], string_element),
    (list_element, vec![t(TokenType::Newline)], newline_element),
    (loop_statement,
      vec![t(TokenType::Repeat), n(int_value), t(TokenType::Times), n(command)],
      make_command_loop),
    (loop_statement,
      vec![t(TokenType::Repeat), n(int_value), t(TokenType::Times), n(code_block)],
      make_block_loop),
    (code_block,
      vec![t(TokenType::OpenBlock), n(statement_list), t(TokenType::CloseBlock)],
      make_code_block),
    (int_value, vec![t(TokenType::Integer)], integer_value),
    (int_value, vec![t(TokenType::Identifier)], identifier_value),
  ];

  for (lhs, rhs, action) in prods {
    b.production(lhs, rhs, action);
  }

  b.build()
}

fn make_program(mut c: Children<Node>) -> Result<Node, ActionError> {
  let statements = c.take(0)?.into_statement_list()?;
  Ok(Node::Program(Program { statements }))
}

fn append_statement(mut c: Children<Node>) -> Result<Node, ActionError> {
  let mut list = c.take(0)?.into_statement_list()?;
  list.push(c.take(1)?.into_statement()?);
  Ok(Node::StatementList(list))
}

fn single_statement(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::StatementList(vec![c.take(0)?.into_statement()?]))
}

fn first(mut c: Children<Node>) -> Result<Node, ActionError> {
  c.take(0)
}

fn make_declaration(mut c: Children<Node>) -> Result<Node, ActionError> {
  let id = c.take(1)?.into_identifier()?;
  Ok(Node::Statement(Statement::Declaration(id)))
}

fn update(c: &mut Children<Node>) -> Result<Update, ActionError> {
  Ok(Update {
    target: c.take(0)?.into_identifier()?,
    value: c.take(2)?.into_int_value()?,
  })
}

fn make_assignment(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::Statement(Statement::Assignment(update(&mut c)?)))
}

fn make_increment(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::Statement(Statement::Increment(update(&mut c)?)))
}

fn make_decrement(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::Statement(Statement::Decrement(update(&mut c)?)))
}

fn make_write(mut c: Children<Node>) -> Result<Node, ActionError> {
  let elements = c.take(1)?.into_output_list()?;
  Ok(Node::Statement(Statement::Write(elements)))
}

fn append_element(mut c: Children<Node>) -> Result<Node, ActionError> {
  let mut list = c.take(0)?.into_output_list()?;
  list.push(c.take(2)?.into_list_element()?);
  Ok(Node::OutputList(list))
}

fn single_element(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::OutputList(vec![c.take(0)?.into_list_element()?]))
}

fn int_element(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::ListElement(ListElement::Int(c.take(0)?.into_int_value()?)))
}

fn string_element(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::ListElement(ListElement::String(c.take(0)?.into_string()?)))
}

fn newline_element(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::ListElement(ListElement::Newline(c.take(0)?.into_newline()?)))
}

fn make_command_loop(mut c: Children<Node>) -> Result<Node, ActionError> {
  let count = c.take(1)?.into_int_value()?;
  let body = LoopBody::Command(Box::new(c.take(3)?.into_statement()?));
  Ok(Node::Statement(Statement::Loop(LoopStatement { count, body })))
}

fn make_block_loop(mut c: Children<Node>) -> Result<Node, ActionError> {
  let count = c.take(1)?.into_int_value()?;
  let body = LoopBody::Block(c.take(3)?.into_code_block()?);
  Ok(Node::Statement(Statement::Loop(LoopStatement { count, body })))
}

fn make_code_block(mut c: Children<Node>) -> Result<Node, ActionError> {
  let statements = c.take(1)?.into_statement_list()?;
  Ok(Node::CodeBlock(CodeBlock { statements }))
}

fn integer_value(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::IntValue(IntValue::Integer(c.take(0)?.into_integer()?)))
}

fn identifier_value(mut c: Children<Node>) -> Result<Node, ActionError> {
  Ok(Node::IntValue(IntValue::Identifier(c.take(0)?.into_identifier()?)))
}

impl Input for Token {
  type Node = Node;
  type Location = Location;
  type Error = LexError;

  fn terminal(&self) -> Result<TerminalId, LexError> {
    match (&self.payload, self.ty.terminal()) {
      (Payload::Error(err), _) => Err(err.clone()),
      (_, Some(t)) => Ok(t),
      (_, None) => Err(LexError {
        kind: LexErrorKind::UnknownCharacter(self.lexeme.chars().next().unwrap_or('\0')),
        location: self.location.clone(),
        lexeme: self.lexeme.clone(),
      }),
    }
  }

  fn lexeme(&self) -> &str {
    &self.lexeme
  }

  fn location(&self) -> Location {
    self.location.clone()
  }

  fn into_leaf(self) -> Option<Node> {
    match (self.ty, self.payload) {
      (TokenType::Identifier, Payload::Symbol(symbol)) => Some(Node::Identifier(Identifier {
        name: self.lexeme,
        symbol,
        location: self.location,
      })),
      (TokenType::Integer, Payload::Integer(value)) => Some(Node::Integer(IntegerLit {
        value,
        location: self.location,
      })),
      (TokenType::String, Payload::Text(value)) => Some(Node::String(StringLit {
        value,
        location: self.location,
      })),
      (TokenType::Newline, _) => Some(Node::Newline(self.location)),
      _ => None,
    }
  }
}

/// The tally grammar with its LR(1) automaton and tables, built once and
/// shared by every parse.
pub struct Frontend {
  grammar: Grammar<Action>,
  automaton: Automaton,
  tables: Tables,
}

impl Frontend {
  pub fn new() -> Result<Self, Error> {
    let grammar = grammar()?;
    let (automaton, tables) = lr::build(&grammar)?;
    debug!("tally parser ready: {} states", tables.num_states());

    Ok(Self {
      grammar,
      automaton,
      tables,
    })
  }

  pub fn grammar(&self) -> &Grammar<Action> {
    &self.grammar
  }

  pub fn automaton(&self) -> &Automaton {
    &self.automaton
  }

  pub fn tables(&self) -> &Tables {
    &self.tables
  }

  pub fn parse(&self, tokens: Vec<Token>) -> Result<Program, ParseError<Location, LexError>> {
    let node = Parser::new(&self.grammar, &self.tables).parse(tokens)?;
    node.into_program().map_err(|err| ParseError::Action {
      production: self.grammar.production_to_string(Grammar::<Action>::ACCEPT_PROD),
      message: err.0,
    })
  }

  pub fn nonterminal(&self, name: &str) -> Option<NonterminalId> {
    self.grammar.nonterminal_ids()
      .find(|&nt| self.grammar.nonterminal_name(nt) == name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn production_ids_are_positions() {
    let g = grammar().unwrap();
    let prods = (0..g.prods.len())
      .map(|i| format!("{:2} {}", i, g.production_to_string(i)))
      .collect::<Vec<_>>();

    assert_eq!(prods, vec![
      " 0 S' -> Program",
      " 1 Program -> StatementList",
      " 2 StatementList -> StatementList Statement",
      " 3 StatementList -> Statement",
      " 4 Statement -> Command ;",
      " 5 Command -> Declaration",
      " 6 Command -> Assignment",
      " 7 Command -> Increment",
      " 8 Command -> Decrement",
      " 9 Command -> WriteStatement",
      "10 Command -> LoopStatement",
      "11 Declaration -> number IDENTIFIER",
      "12 Assignment -> IDENTIFIER := IntValue",
      "13 Increment -> IDENTIFIER += IntValue",
      "14 Decrement -> IDENTIFIER -= IntValue",
      "15 WriteStatement -> write OutputList",
      "16 OutputList -> OutputList and ListElement",
      "17 OutputList -> ListElement",
      "18 ListElement -> IntValue",
      "19 ListElement -> STRING",
      "20 ListElement -> newline",
      "21 LoopStatement -> repeat IntValue times Command",
      "22 LoopStatement -> repeat IntValue times CodeBlock",
      "23 CodeBlock -> { StatementList }",
      "24 IntValue -> INTEGER",
      "25 IntValue -> IDENTIFIER",
    ]);
  }

  #[test]
  fn terminals_follow_token_types() {
    let g = grammar().unwrap();

    for ty in TokenType::TERMINALS {
      let t = ty.terminal().unwrap();
      assert_eq!(g.terminal_name(t), ty.name());
    }
    assert_eq!(g.eof, TokenType::EndOfInput.terminal().unwrap());
  }

  #[test]
  fn tables_build_without_conflicts() {
    let frontend = Frontend::new().unwrap();

    assert_eq!(frontend.tables().num_states(), frontend.automaton().states.len());
    assert!(frontend.nonterminal("CodeBlock").is_some());
  }
}
