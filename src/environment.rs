use crate::core;
use crate::types::{Symbol, Value};
use itertools::Itertools;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// One scope in the chain. Children hold their parent alive, so a closure's
/// captured scope outlives the call that created it.
#[derive(Debug, Default)]
pub struct Environment {
    symbols: RefCell<HashMap<Symbol, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// The global scope: every primitive plus `#t` and `#f`.
    pub fn root() -> Rc<Self> {
        let env = Self::default();
        for &func in core::CORE.iter() {
            env.define(func.name, Value::Primitive(func));
        }
        env.define("#t", Value::Bool(true));
        env.define("#f", Value::Bool(false));
        Rc::new(env)
    }

    pub fn spawn_from(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            symbols: RefCell::new(HashMap::new()),
            parent: Some(parent.clone()),
        })
    }

    pub fn define<T>(&self, key: T, value: Value)
    where
        T: Into<Symbol>,
    {
        self.symbols.borrow_mut().insert(key.into(), value);
    }

    /// Rebinds `key` in the nearest scope that already has it. Returns false,
    /// and binds nothing, when no scope does.
    pub fn set(&self, key: &Symbol, value: Value) -> bool {
        if let Some(slot) = self.symbols.borrow_mut().get_mut(key) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.set(key, value),
            None => false,
        }
    }

    pub fn lookup(&self, key: &Symbol) -> Option<Value> {
        if let Some(value) = self.symbols.borrow().get(key) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(key))
    }

    /// Unbound names read as nil.
    pub fn get(&self, key: &Symbol) -> Value {
        self.lookup(key).unwrap_or(Value::Nil)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.symbols.borrow();
        write!(f, "{{{}}}", symbols.keys().map(|s| s.as_str()).sorted().join(" "))?;
        if self.parent.is_some() {
            write!(f, " -> parent")?;
        }
        Ok(())
    }
}
