use crate::environment::Environment;
use crate::printer::pr_str;
use crate::types::Value;
use crate::{evaluator, reader, tokens};
use derive_more::From;
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<Value, Error>;

#[derive(Debug, From)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "eval error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

/// An independent interpreter instance owning its global environment.
pub struct Interpreter {
    env: Rc<Environment>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            env: Environment::root(),
        }
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and evaluates each top-level form of `code` in turn, returning
    /// the value of the last one. Later forms see the definitions of earlier
    /// ones; the first error abandons the remaining forms.
    pub fn run(&self, code: &str) -> Result {
        let mut tokens = tokens::tokenize(code);
        let mut result = Value::Nil;
        while !tokens.is_empty() {
            let form = reader::read_form(&mut tokens)?;
            result = self.eval(&form)?;
        }
        log::debug!("run produced {}", pr_str(&result));
        Ok(result)
    }

    /// Evaluates an already-read form in the global environment.
    pub fn eval(&self, form: &Value) -> Result {
        evaluator::eval(form, &self.env).map_err(Error::Eval)
    }

    pub fn env(&self) -> &Rc<Environment> {
        &self.env
    }
}
