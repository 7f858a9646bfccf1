use crate::environment::Environment;
use crate::evaluator::{eval, Result};
use crate::printer::pr_str;
use crate::types::{truthy, Arity, Closure, Symbol, Value};
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
pub enum SpecialFormError {
    KeyNotASymbol(&'static str),
    ParametersNotGivenAsList,
    ParameterNotASymbol,
}

impl fmt::Display for SpecialFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialFormError::KeyNotASymbol(form) => write!(f, "{}: name must be a symbol", form),
            SpecialFormError::ParametersNotGivenAsList => {
                write!(f, "lambda: parameters must be a list")
            }
            SpecialFormError::ParameterNotASymbol => {
                write!(f, "lambda: every parameter must be a symbol")
            }
        }
    }
}

pub fn apply_quote(args: &[Value]) -> Result {
    Arity::exactly(1).validate_for(args.len(), "quote")?;
    Ok(args[0].clone())
}

pub fn apply_if(args: &[Value], env: &Rc<Environment>) -> Result {
    Arity::Between(2..=3).validate_for(args.len(), "if")?;
    let condition = eval(&args[0], env)?;
    if truthy(&condition) {
        eval(&args[1], env)
    } else if args.len() == 3 {
        eval(&args[2], env)
    } else {
        Ok(Value::Nil)
    }
}

fn binding_target<'a>(args: &'a [Value], form: &'static str) -> Result<(&'a Symbol, &'a Value)> {
    Arity::exactly(2).validate_for(args.len(), form)?;
    match &args[0] {
        Value::Symbol(s) => Ok((s, &args[1])),
        _ => Err(SpecialFormError::KeyNotASymbol(form).into()),
    }
}

pub fn apply_define(args: &[Value], env: &Rc<Environment>) -> Result {
    let (key, value) = binding_target(args, "define")?;
    let value = eval(value, env)?;
    log::debug!("define {} as {}", key, pr_str(&value));
    env.define(key.clone(), value);
    Ok(Value::Nil)
}

pub fn apply_set(args: &[Value], env: &Rc<Environment>) -> Result {
    let (key, value) = binding_target(args, "set!")?;
    let value = eval(value, env)?;
    if env.set(key, value) {
        log::debug!("set! {}", key);
    } else {
        log::debug!("set! {} ignored: not bound", key);
    }
    Ok(Value::Nil)
}

pub fn apply_lambda(args: &[Value], env: &Rc<Environment>) -> Result {
    // We expect exactly two arguments. The first, a parameters list, should be a
    // list of symbols. The second, the body, is any Value.
    Arity::exactly(2).validate_for(args.len(), "lambda")?;
    let (parameters, body) = (&args[0], &args[1]);
    let parameters = match parameters {
        Value::List(list) => list.to_vec(),
        _ => return Err(SpecialFormError::ParametersNotGivenAsList.into()),
    };
    let parameters = parameters
        .iter()
        .map(|obj| match obj {
            Value::Symbol(s) => Ok(s.clone()),
            _ => Err(SpecialFormError::ParameterNotASymbol),
        })
        .collect::<std::result::Result<Vec<Symbol>, _>>()?;
    let closure = Closure {
        parameters,
        body: body.clone(),
        parent: env.clone(),
    };
    Ok(Value::Closure(Rc::new(closure)))
}

pub fn apply_begin(args: &[Value], env: &Rc<Environment>) -> Result {
    let mut result = Value::Nil;
    for obj in args {
        result = eval(obj, env)?;
    }
    Ok(result)
}
