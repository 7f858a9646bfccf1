use crate::tokens::tokenize;
use crate::types::Value;
use std::collections::VecDeque;
use std::fmt;

pub type TokenQueue = VecDeque<String>;
pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedEndOfInput,
    UnexpectedCloseParen,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Error::UnexpectedCloseParen => write!(f, "unexpected )"),
        }
    }
}

/// Reads every top-level form in `input`.
pub fn read_str(input: &str) -> Result<Vec<Value>> {
    let mut tokens = tokenize(input);
    let mut forms = Vec::new();
    while !tokens.is_empty() {
        forms.push(read_form(&mut tokens)?);
    }
    Ok(forms)
}

/// Consumes one form from the front of `tokens`.
pub fn read_form(tokens: &mut TokenQueue) -> Result {
    let token = tokens.pop_front().ok_or(Error::UnexpectedEndOfInput)?;
    match token.as_str() {
        "(" => read_list(tokens),
        ")" => Err(Error::UnexpectedCloseParen),
        _ => Ok(read_atom(&token)),
    }
}

fn read_list(tokens: &mut TokenQueue) -> Result {
    let mut elements = Vec::new();
    loop {
        match tokens.front().map(String::as_str) {
            Some(")") => break,
            Some(_) => elements.push(read_form(tokens)?),
            None => return Err(Error::UnexpectedEndOfInput),
        }
    }
    tokens.pop_front();
    Ok(Value::wrap_list(elements))
}

fn read_atom(token: &str) -> Value {
    match parse_number(token) {
        Some(x) => Value::Number(x),
        None => Value::new_symbol(token),
    }
}

fn parse_number(token: &str) -> Option<f64> {
    // `inf`, `-nan` and friends parse as f64 but must stay symbols.
    match token.chars().next()? {
        '+' | '-' | '.' | '0'..='9' => (),
        _ => return None,
    }
    if !token.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Ok(x) = token.parse::<f64>() {
        return Some(x);
    }
    let (sign, digits) = match token.as_bytes()[0] {
        b'-' => (-1.0, &token[1..]),
        b'+' => (1.0, &token[1..]),
        _ => (1.0, token),
    };
    let hex = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))?;
    // from_str_radix takes its own sign, which would let `-0x-5` through.
    if hex.starts_with(|c| c == '+' || c == '-') {
        return None;
    }
    i64::from_str_radix(hex, 16)
        .ok()
        .map(|x| sign * x as f64)
}
