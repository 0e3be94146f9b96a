use std::fmt;
use bigint::BigInt;
use lr::ActionError;
use crate::lex::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
  pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
  Declaration(Identifier),
  Assignment(Update),
  Increment(Update),
  Decrement(Update),
  Write(Vec<ListElement>),
  Loop(LoopStatement),
}

/// `target := value`, `target += value` or `target -= value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
  pub target: Identifier,
  pub value: IntValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListElement {
  Int(IntValue),
  String(StringLit),
  Newline(Location),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopStatement {
  pub count: IntValue,
  pub body: LoopBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopBody {
  Command(Box<Statement>),
  Block(CodeBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
  pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntValue {
  Integer(IntegerLit),
  Identifier(Identifier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
  pub name: String,
  /// index into the symbol table
  pub symbol: usize,
  pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLit {
  pub value: BigInt,
  pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLit {
  pub value: String,
  pub location: Location,
}

impl IntValue {
  pub fn location(&self) -> &Location {
    match self {
      IntValue::Integer(lit) => &lit.location,
      IntValue::Identifier(id) => &id.location,
    }
  }
}

/// A value on the parser's stack: a leaf built from a token, or a node built by
/// a semantic action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Program(Program),
  StatementList(Vec<Statement>),
  Statement(Statement),
  OutputList(Vec<ListElement>),
  ListElement(ListElement),
  CodeBlock(CodeBlock),
  IntValue(IntValue),
  Identifier(Identifier),
  Integer(IntegerLit),
  String(StringLit),
  Newline(Location),
}

macro_rules! node_accessor {
  ($name:ident, $variant:ident, $ty:ty, $what:expr) => {
    pub fn $name(self) -> Result<$ty, ActionError> {
      match self {
        Node::$variant(x) => Ok(x),
        node => Err(ActionError::new(format!("expected {}, found {}", $what, node.kind()))),
      }
    }
  };
}

impl Node {
  pub fn kind(&self) -> &'static str {
    match self {
      Node::Program(_) => "program",
      Node::StatementList(_) => "statement list",
      Node::Statement(_) => "statement",
      Node::OutputList(_) => "output list",
      Node::ListElement(_) => "list element",
      Node::CodeBlock(_) => "code block",
      Node::IntValue(_) => "int value",
      Node::Identifier(_) => "identifier",
      Node::Integer(_) => "integer",
      Node::String(_) => "string",
      Node::Newline(_) => "newline",
    }
  }

  node_accessor!(into_program, Program, Program, "program");
  node_accessor!(into_statement_list, StatementList, Vec<Statement>, "statement list");
  node_accessor!(into_statement, Statement, Statement, "statement");
  node_accessor!(into_output_list, OutputList, Vec<ListElement>, "output list");
  node_accessor!(into_list_element, ListElement, ListElement, "list element");
  node_accessor!(into_code_block, CodeBlock, CodeBlock, "code block");
  node_accessor!(into_int_value, IntValue, IntValue, "int value");
  node_accessor!(into_identifier, Identifier, Identifier, "identifier");
  node_accessor!(into_integer, Integer, IntegerLit, "integer");
  node_accessor!(into_string, String, StringLit, "string");
  node_accessor!(into_newline, Newline, Location, "newline");
}

struct Printer<'a, 'f> {
  f: &'a mut fmt::Formatter<'f>,
  depth: usize,
}

impl<'a, 'f> Printer<'a, 'f> {
  fn line(&mut self, text: fmt::Arguments) -> fmt::Result {
    writeln!(self.f, "{:indent$}{}", "", text, indent = self.depth * 2)
  }

  fn nested(
    &mut self,
    label: &str,
    body: impl FnOnce(&mut Self) -> fmt::Result,
  ) -> fmt::Result {
    self.line(format_args!("{}", label))?;
    self.depth += 1;
    let result = body(self);
    self.depth -= 1;
    result
  }

  fn statements(&mut self, statements: &[Statement]) -> fmt::Result {
    statements.iter().try_for_each(|s| self.statement(s))
  }

  fn statement(&mut self, statement: &Statement) -> fmt::Result {
    match statement {
      Statement::Declaration(id) => self.nested("Declaration", |p| p.identifier(id)),
      Statement::Assignment(update) => self.update("Assignment", update),
      Statement::Increment(update) => self.update("Increment", update),
      Statement::Decrement(update) => self.update("Decrement", update),
      Statement::Write(elements) => self.nested("WriteStatement", |p| {
        p.nested("OutputList", |p| {
          elements.iter().try_for_each(|e| p.nested("ListElement", |p| p.list_element(e)))
        })
      }),
      Statement::Loop(stmt) => self.nested("LoopStatement", |p| {
        p.int_value(&stmt.count)?;
        match &stmt.body {
          LoopBody::Command(command) => p.statement(command),
          LoopBody::Block(block) => p.nested("CodeBlock", |p| p.statements(&block.statements)),
        }
      }),
    }
  }

  fn update(&mut self, label: &str, update: &Update) -> fmt::Result {
    self.nested(label, |p| {
      p.identifier(&update.target)?;
      p.int_value(&update.value)
    })
  }

  fn list_element(&mut self, element: &ListElement) -> fmt::Result {
    match element {
      ListElement::Int(value) => self.int_value(value),
      ListElement::String(lit) => self.line(format_args!("String: \"{}\"", lit.value)),
      ListElement::Newline(_) => self.line(format_args!("Newline")),
    }
  }

  fn int_value(&mut self, value: &IntValue) -> fmt::Result {
    self.nested("IntValue", |p| match value {
      IntValue::Integer(lit) => p.line(format_args!("Integer: {}", lit.value)),
      IntValue::Identifier(id) => p.identifier(id),
    })
  }

  fn identifier(&mut self, id: &Identifier) -> fmt::Result {
    self.line(format_args!("Identifier: {}", id.name))
  }
}

/// Prints the tree with two spaces of indentation per level.
impl fmt::Display for Program {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let mut p = Printer {
      f,
      depth: 0,
    };
    p.nested("Program", |p| p.nested("StatementList", |p| p.statements(&self.statements)))
  }
}
