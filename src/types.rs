use crate::environment::Environment;
use crate::evaluator;
use derive_more::Deref;
use itertools::Itertools;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(name.into())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A list shared by reference. Cloning a `List` aliases the same storage, so
/// an in-place append through one handle is visible through every other.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    pub fn new(elements: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(elements)))
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Identity of the shared storage, for spotting a list that contains itself.
    pub(crate) fn id(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Copies the elements out. Evaluation works on a snapshot so that a
    /// `cons` onto the list being evaluated cannot invalidate the borrow.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for List {
    // Not derived: a list can contain itself after `cons`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "List{}", crate::printer::pr_str(&Value::List(self.clone())))
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    pub name: String,
    pub expected: Arity,
    pub got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "when evaluating {} expected {} arguments, but received {}",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub fn validate_for(&self, n: usize, name: &str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name: name.into(),
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Value,
    pub parent: Rc<Environment>,
}

impl Closure {
    pub fn arity(&self) -> Arity {
        Arity::exactly(self.parameters.len())
    }
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#<lambda ({})>", self.parameters.iter().join(" "))
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Number(f64),
    Bool(bool),
    Symbol(Symbol),
    List(List),
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

/// Only `#f` and nil are false. Zero and the empty list are true.
pub(crate) fn truthy(obj: &Value) -> bool {
    match obj {
        Value::Bool(t) => *t,
        Value::Nil => false,
        _ => true,
    }
}

pub(crate) fn callable(obj: &Value) -> bool {
    match obj {
        Value::Primitive(_) | Value::Closure(_) => true,
        Value::Nil | Value::Number(_) | Value::Bool(_) | Value::Symbol(_) | Value::List(_) => false,
    }
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotANumber,
    NotAList,
    NotASymbol,
    NotCallable,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let expected = match self {
            TypeMismatch::NotANumber => "a number",
            TypeMismatch::NotAList => "a list",
            TypeMismatch::NotASymbol => "a symbol",
            TypeMismatch::NotCallable => "a procedure",
        };
        write!(f, "expected {}", expected)
    }
}

impl Value {
    pub fn as_number(&self) -> Result<f64, TypeMismatch> {
        match self {
            Value::Number(x) => Ok(*x),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub fn as_list(&self) -> Result<&List, TypeMismatch> {
        match self {
            Value::List(x) => Ok(x),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub fn as_symbol(&self) -> Result<&Symbol, TypeMismatch> {
        match self {
            Value::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Nil doubles as the empty list.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::List(list) => list.is_empty(),
            _ => false,
        }
    }

    pub fn wrap_list(elements: Vec<Value>) -> Self {
        Self::List(List::new(elements))
    }

    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol(name.into()))
    }
}

/// Equality used by `=` and `equal?`: lists compare element-wise and nil
/// matches the empty list.
pub(crate) fn loose_eq(x: &Value, y: &Value) -> bool {
    loose_eq_guarded(x, y, &mut Vec::new())
}

// `comparing` holds the list pairs being compared further up the stack. Meeting
// a pair again means both sides cycle in step, and that pair counts as equal.
fn loose_eq_guarded(x: &Value, y: &Value, comparing: &mut Vec<(*const (), *const ())>) -> bool {
    match (x, y) {
        (Value::List(xs), Value::List(ys)) => {
            let pair = (xs.id(), ys.id());
            if xs.ptr_eq(ys) || comparing.contains(&pair) {
                return true;
            }
            comparing.push(pair);
            let (xs, ys) = (xs.borrow(), ys.borrow());
            let same = xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| loose_eq_guarded(x, y, comparing));
            comparing.pop();
            same
        }
        (Value::Nil, Value::List(l)) | (Value::List(l), Value::Nil) => l.is_empty(),
        _ => strict_eq(x, y),
    }
}

/// Equality used by `eq?`: atoms by value, lists and procedures by identity.
pub(crate) fn strict_eq(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Nil, Value::Nil) => true,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::List(x), Value::List(y)) => x.ptr_eq(y),
        (Value::Primitive(x), Value::Primitive(y)) => std::ptr::eq(*x, *y),
        (Value::Closure(x), Value::Closure(y)) => Rc::ptr_eq(x, y),
        (_, _) => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        loose_eq(self, other)
    }
}
