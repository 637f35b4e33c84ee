use crate::context::Context;
use crate::error::Error;
use crate::expression::{Expression, Kind};
use std::iter::Peekable;
use std::slice::Iter;
use std::str::FromStr;
use token::Token;

mod lexer;
pub mod token;

pub use lexer::lex_tokens;

#[derive(Debug, Clone, PartialEq)]
enum Operation {
    Binary(Kind),
    Negate,
    Positive,
    /// A function (or differential) waiting for its bracket to close
    Call(Kind),
    Bracket,
}

impl Operation {
    fn precedence(&self) -> u8 {
        match self {
            Operation::Binary(Kind::Add) | Operation::Binary(Kind::Sub) => 1,
            Operation::Binary(Kind::Mul) | Operation::Binary(Kind::Div) => 2,
            Operation::Negate | Operation::Positive => 3,
            Operation::Binary(_) => 4,
            Operation::Call(_) | Operation::Bracket => 0,
        }
    }

    fn right_associative(&self) -> bool {
        matches!(self, Operation::Binary(Kind::Pow))
    }

    fn is_barrier(&self) -> bool {
        matches!(self, Operation::Call(_) | Operation::Bracket)
    }
}

fn syntax_error(message: &str, token: &Token) -> Error {
    Error::Syntax(format!("{} {:?}", message, token))
}

fn pop_operand(operands: &mut Vec<Expression>) -> Result<Expression, Error> {
    operands
        .pop()
        .ok_or_else(|| Error::Syntax(String::from("Missing operand")))
}

fn astify(operation: Operation, operands: &mut Vec<Expression>) -> Result<(), Error> {
    let expression = match operation {
        Operation::Binary(kind) => {
            let right = pop_operand(operands)?;
            let left = pop_operand(operands)?;
            Expression::binary(kind, left, right)
        }
        Operation::Negate => Expression::unary(Kind::Negate, pop_operand(operands)?),
        Operation::Positive => pop_operand(operands)?,
        Operation::Call(kind) => Expression::unary(kind, pop_operand(operands)?),
        Operation::Bracket => return Err(Error::Syntax(String::from("Unclosed '('"))),
    };
    operands.push(expression);
    Ok(())
}

/// Pops every operation which binds at least as tight as the incoming one.
fn push_binary(
    operation: Operation,
    op_stack: &mut Vec<Operation>,
    operands: &mut Vec<Expression>,
) -> Result<(), Error> {
    while let Some(top) = op_stack.last() {
        let pops = !top.is_barrier()
            && (top.precedence() > operation.precedence()
                || (top.precedence() == operation.precedence() && !operation.right_associative()));
        if !pops {
            break;
        }
        if let Some(top) = op_stack.pop() {
            astify(top, operands)?;
        }
    }
    op_stack.push(operation);
    Ok(())
}

/// What an identifier followed by `(` calls.
fn callee(context: &Context, ident: &str) -> Result<Kind, Error> {
    if let Some(kind) = context.function(ident) {
        return Ok(kind.clone());
    }
    match ident.strip_prefix('d') {
        Some(regard) if !regard.is_empty() => Ok(Kind::Diff(String::from(regard))),
        _ => Err(Error::UnknownFunction(String::from(ident))),
    }
}

fn parse_tokens(
    context: &Context,
    tokens: &mut Peekable<Iter<Token>>,
) -> Result<Expression, Error> {
    let mut op_stack: Vec<Operation> = Vec::new();
    let mut operands: Vec<Expression> = Vec::new();
    let mut expect_operand = true;

    while let Some(token) = tokens.next() {
        match token {
            Token::Number(value) if expect_operand => {
                operands.push(Expression::leaf(Kind::Real(*value)));
                expect_operand = false;
            }
            Token::Ident(ident) if expect_operand => {
                if tokens.peek() == Some(&&Token::BracketL) {
                    tokens.next();
                    op_stack.push(Operation::Call(callee(context, ident)?));
                    op_stack.push(Operation::Bracket);
                } else {
                    operands.push(Expression::leaf(Kind::Variable(ident.clone())));
                    expect_operand = false;
                }
            }
            Token::BracketL if expect_operand => op_stack.push(Operation::Bracket),
            Token::Minus if expect_operand => op_stack.push(Operation::Negate),
            Token::Plus if expect_operand => op_stack.push(Operation::Positive),
            Token::BracketR if !expect_operand => {
                loop {
                    match op_stack.pop() {
                        None => return Err(syntax_error("Unmatched", token)),
                        Some(Operation::Bracket) => break,
                        Some(operation) => astify(operation, &mut operands)?,
                    }
                }
                if let Some(Operation::Call(_)) = op_stack.last() {
                    if let Some(call) = op_stack.pop() {
                        astify(call, &mut operands)?;
                    }
                }
            }
            Token::Plus if !expect_operand => {
                push_binary(Operation::Binary(Kind::Add), &mut op_stack, &mut operands)?;
                expect_operand = true;
            }
            Token::Minus if !expect_operand => {
                push_binary(Operation::Binary(Kind::Sub), &mut op_stack, &mut operands)?;
                expect_operand = true;
            }
            Token::Multiply if !expect_operand => {
                push_binary(Operation::Binary(Kind::Mul), &mut op_stack, &mut operands)?;
                expect_operand = true;
            }
            Token::Divide if !expect_operand => {
                push_binary(Operation::Binary(Kind::Div), &mut op_stack, &mut operands)?;
                expect_operand = true;
            }
            Token::Power if !expect_operand => {
                push_binary(Operation::Binary(Kind::Pow), &mut op_stack, &mut operands)?;
                expect_operand = true;
            }
            Token::EOF if !expect_operand => {
                while let Some(operation) = op_stack.pop() {
                    astify(operation, &mut operands)?;
                }
                let expression = pop_operand(&mut operands)?;
                return if operands.is_empty() {
                    Ok(expression)
                } else {
                    Err(Error::Syntax(String::from("Dangling operands")))
                };
            }
            Token::EOF => return Err(Error::Syntax(String::from("Unexpected end of input"))),
            _ => return Err(syntax_error("Unexpected", token)),
        }
    }
    Err(Error::Syntax(String::from("Missing end of input")))
}

/// Parses infix code like `x ** 2 + sin(x) - dx(x * z)`.
///
/// All numbers become real constants. There is no implicit multiplication.
pub fn parse(context: &Context, code: &str) -> Result<Expression, Error> {
    let tokens = lex_tokens(code)?;
    parse_tokens(context, &mut tokens.iter().peekable())
}

impl Expression {
    pub fn parse(context: &Context, code: &str) -> Result<Expression, Error> {
        parse(context, code)
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(code: &str) -> Result<Expression, Error> {
        parse(&Context::standard(), code)
    }
}
