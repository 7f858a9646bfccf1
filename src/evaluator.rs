use crate::environment::Environment;
use crate::printer::pr_str;
use crate::special_forms;
use crate::types::{BadArgCount, Closure, PrimitiveFn, TypeMismatch, Value};
use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotAFunction(String),
    ArityMismatch(BadArgCount),
    TypeMismatch(TypeMismatch),
    EmptyList(&'static str),
    BadSpecialForm(special_forms::SpecialFormError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotAFunction(name) => write!(f, "{} is not a function", name),
            Error::ArityMismatch(e) => write!(f, "{}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::EmptyList(name) => write!(f, "{}: empty list", name),
            Error::BadSpecialForm(e) => write!(f, "bad syntax: {}", e),
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::ArityMismatch(e)
    }
}

impl From<special_forms::SpecialFormError> for Error {
    fn from(e: special_forms::SpecialFormError) -> Self {
        Self::BadSpecialForm(e)
    }
}

/// Evaluates `ast` in `env`. Recursion follows the shape of the program:
/// there is no tail-call elimination, so deep recursion can exhaust the
/// native stack.
pub fn eval(ast: &Value, env: &Rc<Environment>) -> Result {
    log::trace!("eval {}", pr_str(ast));
    match ast {
        Value::Symbol(s) => Ok(env.get(s)),
        Value::List(list) => {
            let argv = list.to_vec();
            match argv.split_first() {
                None => Ok(Value::Nil),
                Some((head, operands)) => eval_list(head, operands, env),
            }
        }
        _ => Ok(ast.clone()),
    }
}

fn eval_list(head: &Value, operands: &[Value], env: &Rc<Environment>) -> Result {
    if let Value::Symbol(name) = head {
        match name.as_str() {
            "quote" => return special_forms::apply_quote(operands),
            "if" => return special_forms::apply_if(operands, env),
            "define" => return special_forms::apply_define(operands, env),
            "set!" => return special_forms::apply_set(operands, env),
            "lambda" => return special_forms::apply_lambda(operands, env),
            "begin" => return special_forms::apply_begin(operands, env),
            // Any other initial symbol will be interpreted as a function call and
            // handled below
            _ => (),
        }
    }
    let callable = eval(head, env)?;
    let args = evaluate_sequence_elementwise(operands, env)?;
    apply(&callable, &args, &pr_str(head))
}

pub fn evaluate_sequence_elementwise(seq: &[Value], env: &Rc<Environment>) -> Result<Vec<Value>> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

/// Invokes a procedure. `name` only feeds diagnostics.
pub fn apply(callable: &Value, args: &[Value], name: &str) -> Result {
    match callable {
        Value::Primitive(f) => call_primitive(f, args),
        Value::Closure(f) => call_closure(f, args, name),
        _ => Err(Error::NotAFunction(name.into())),
    }
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => pr_str(&args[0]),
        _ => format!("\n\t{}", args.iter().map(pr_str).join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, pr_str(val)),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

fn call_closure(func: &Closure, args: &[Value], name: &str) -> Result {
    log::trace!("Call {} ({}) with {}", name, func, pretty_print_args(args));
    func.arity().validate_for(args.len(), name)?;
    let env = Environment::spawn_from(&func.parent);
    for (key, value) in func.parameters.iter().zip(args) {
        env.define(key.clone(), value.clone());
    }
    log::trace!("{} runs in {}", name, env);
    eval(&func.body, &env)
}
