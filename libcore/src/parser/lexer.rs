use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, multispace0};
use nom::combinator::{map, map_res, recognize, value};
use nom::multi::many0;
use nom::number::complete::recognize_float;
use nom::sequence::{delimited, pair};
use nom::IResult;

use super::token::Token;
use crate::error::Error;

// operators
fn lex_operator(input: &str) -> IResult<&str, Token> {
  alt((
    value(Token::Power, tag("**")),
    value(Token::Power, tag("^")),
    value(Token::Plus, tag("+")),
    value(Token::Minus, alt((tag("-"), tag("−")))),
    value(Token::Multiply, alt((tag("*"), tag("⋅")))),
    value(Token::Divide, tag("/")),
  ))(input)
}

// punctuation
fn lex_punctuation(input: &str) -> IResult<&str, Token> {
  alt((
    value(Token::BracketL, tag("(")),
    value(Token::BracketR, tag(")")),
  ))(input)
}

// Literals
fn lex_number(input: &str) -> IResult<&str, Token> {
  map(map_res(recognize_float, str::parse::<f64>), Token::Number)(input)
}

fn lex_ident(input: &str) -> IResult<&str, Token> {
  map(recognize(pair(alpha1, alphanumeric0)), |ident: &str| {
    Token::Ident(ident.to_owned())
  })(input)
}

fn lex_token(input: &str) -> IResult<&str, Token> {
  // Signs are operators, so the number lexer never sees them.
  alt((lex_operator, lex_punctuation, lex_number, lex_ident))(input)
}

/// Splits the code into tokens. The list always ends with `Token::EOF`.
pub fn lex_tokens(code: &str) -> Result<Vec<Token>, Error> {
  let (rest, mut tokens) = many0(delimited(multispace0, lex_token, multispace0))(code)
    .map_err(|err| Error::Syntax(err.to_string()))?;
  let rest = rest.trim();
  if !rest.is_empty() {
    return Err(Error::Syntax(format!("Unexpected input '{}'", rest)));
  }
  tokens.push(Token::EOF);
  Ok(tokens)
}

#[cfg(test)]
mod specs {
  use super::*;

  #[test]
  fn operator() {
    let actual = lex_tokens("a+b*c^d-e/f").unwrap();
    let expected = vec![
      Token::Ident("a".to_owned()),
      Token::Plus,
      Token::Ident("b".to_owned()),
      Token::Multiply,
      Token::Ident("c".to_owned()),
      Token::Power,
      Token::Ident("d".to_owned()),
      Token::Minus,
      Token::Ident("e".to_owned()),
      Token::Divide,
      Token::Ident("f".to_owned()),
      Token::EOF,
    ];

    assert_eq!(actual, expected);
  }

  #[test]
  fn double_star_is_power() {
    let actual = lex_tokens("x ** 2 * y").unwrap();
    let expected = vec![
      Token::Ident("x".to_owned()),
      Token::Power,
      Token::Number(2.0),
      Token::Multiply,
      Token::Ident("y".to_owned()),
      Token::EOF,
    ];

    assert_eq!(actual, expected);
  }

  #[test]
  fn numbers() {
    let actual = lex_tokens("12 + 2.5 - 1e-3 + .5").unwrap();
    let expected = vec![
      Token::Number(12.0),
      Token::Plus,
      Token::Number(2.5),
      Token::Minus,
      Token::Number(0.001),
      Token::Plus,
      Token::Number(0.5),
      Token::EOF,
    ];

    assert_eq!(actual, expected);
  }

  #[test]
  fn ident_mixed() {
    let actual = lex_tokens(" sin(x1) dx (a)").unwrap();
    let expected = vec![
      Token::Ident("sin".to_owned()),
      Token::BracketL,
      Token::Ident("x1".to_owned()),
      Token::BracketR,
      Token::Ident("dx".to_owned()),
      Token::BracketL,
      Token::Ident("a".to_owned()),
      Token::BracketR,
      Token::EOF,
    ];

    assert_eq!(actual, expected);
  }

  #[test]
  fn special_operators() {
    let actual = lex_tokens("x−2⋅y").unwrap();
    let expected = vec![
      Token::Ident("x".to_owned()),
      Token::Minus,
      Token::Number(2.0),
      Token::Multiply,
      Token::Ident("y".to_owned()),
      Token::EOF,
    ];

    assert_eq!(actual, expected);
  }

  #[test]
  fn empty() {
    assert_eq!(lex_tokens("  ").unwrap(), vec![Token::EOF]);
  }

  #[test]
  fn illegal_character() {
    match lex_tokens("a + $") {
      Err(Error::Syntax(msg)) => assert!(msg.contains('$'), "{}", msg),
      other => panic!("unexpected {:?}", other),
    }
  }
}
