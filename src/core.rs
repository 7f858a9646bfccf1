use crate::types::{callable, loose_eq, strict_eq, truthy, Arity, PrimitiveFn, TypeMismatch, Value};
use crate::{evaluator, printer};

fn grab_numbers(args: &[Value]) -> evaluator::Result<Vec<f64>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(|o| o.as_number()).collect();
    type_check.map_err(evaluator::Error::TypeMismatch)
}

static SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: sum_,
    arity: Arity::at_least(1),
};

fn sum_(args: &[Value]) -> evaluator::Result {
    let numbers = grab_numbers(args)?;
    let value = numbers[1..].iter().fold(numbers[0], |acc, &x| acc + x);
    Ok(Value::Number(value))
}

fn binary_(args: &[Value], op: fn(f64, f64) -> f64) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(Value::Number(op(*x, *y))),
        _ => unreachable!(), // arity checked by call_primitive
    }
}

static SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: |args| binary_(args, |x, y| x - y),
    arity: Arity::exactly(2),
};

static MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: |args| binary_(args, |x, y| x * y),
    arity: Arity::exactly(2),
};

// Division by zero follows IEEE 754 and yields an infinity or NaN.
static DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: |args| binary_(args, |x, y| x / y),
    arity: Arity::exactly(2),
};

fn comparison_(args: &[Value], comp: fn(&f64, &f64) -> bool) -> evaluator::Result {
    match grab_numbers(args)?.as_slice() {
        [x, y] => Ok(Value::Bool(comp(x, y))),
        _ => unreachable!(),
    }
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            static $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Value]| comparison_(args, f64:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);
comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);

static EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

static EQUAL_TEST: PrimitiveFn = PrimitiveFn {
    name: "equal?",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

fn equal_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(loose_eq(&args[0], &args[1])))
}

static EQ_TEST: PrimitiveFn = PrimitiveFn {
    name: "eq?",
    fn_ptr: eq_test_,
    arity: Arity::exactly(2),
};

fn eq_test_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(strict_eq(&args[0], &args[1])))
}

static CAR: PrimitiveFn = PrimitiveFn {
    name: "car",
    fn_ptr: car_,
    arity: Arity::exactly(1),
};

fn car_(args: &[Value]) -> evaluator::Result {
    if args[0].is_nil() {
        return Err(evaluator::Error::EmptyList("car"));
    }
    let list = args[0].as_list()?;
    let first = list.borrow().first().cloned();
    first.ok_or(evaluator::Error::EmptyList("car"))
}

static CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

fn cdr_(args: &[Value]) -> evaluator::Result {
    if args[0].is_nil() {
        return Ok(Value::wrap_list(Vec::new()));
    }
    let list = args[0].as_list()?;
    let rest = list.borrow().iter().skip(1).cloned().collect();
    Ok(Value::wrap_list(rest))
}

static CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

/// Appends onto the list in place: every holder of the list sees the new
/// element. Nil has no storage to mutate, so it yields a fresh list.
fn cons_(args: &[Value]) -> evaluator::Result {
    if args[0].is_nil() {
        return Ok(Value::wrap_list(vec![args[1].clone()]));
    }
    let list = args[0].as_list()?;
    list.push(args[1].clone());
    Ok(args[0].clone())
}

static LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(args: &[Value]) -> evaluator::Result {
    Ok(Value::wrap_list(args.to_vec()))
}

static APPLY: PrimitiveFn = PrimitiveFn {
    name: "apply",
    fn_ptr: apply_,
    arity: Arity::Between(1..=2),
};

fn apply_(args: &[Value]) -> evaluator::Result {
    let f = &args[0];
    if !callable(f) {
        return Err(evaluator::Error::TypeMismatch(TypeMismatch::NotCallable));
    }
    let call_args = match args.get(1) {
        Some(arg) if !arg.is_nil() => vec![arg.clone()],
        _ => Vec::new(),
    };
    evaluator::apply(f, &call_args, "<lambda>")
}

static MAP: PrimitiveFn = PrimitiveFn {
    name: "map",
    fn_ptr: map_,
    arity: Arity::exactly(2),
};

fn map_(args: &[Value]) -> evaluator::Result {
    let f = &args[0];
    if !callable(f) {
        return Err(evaluator::Error::TypeMismatch(TypeMismatch::NotCallable));
    }
    let elements = match &args[1] {
        Value::Nil => Vec::new(),
        other => other.as_list()?.to_vec(),
    };
    let result: Result<Vec<_>, _> = elements
        .chunks_exact(1)
        .map(|obj| evaluator::apply(f, obj, "<lambda>"))
        .collect();
    Ok(Value::wrap_list(result?))
}

static NULL_TEST: PrimitiveFn = PrimitiveFn {
    name: "null?",
    fn_ptr: |args| Ok(Value::Bool(args[0].is_null())),
    arity: Arity::exactly(1),
};

static NUMBER_TEST: PrimitiveFn = PrimitiveFn {
    name: "number?",
    fn_ptr: |args| Ok(Value::Bool(matches!(args[0], Value::Number(_)))),
    arity: Arity::exactly(1),
};

static SYMBOL_TEST: PrimitiveFn = PrimitiveFn {
    name: "symbol?",
    fn_ptr: |args| Ok(Value::Bool(matches!(args[0], Value::Symbol(_)))),
    arity: Arity::exactly(1),
};

static PROCEDURE_TEST: PrimitiveFn = PrimitiveFn {
    name: "procedure?",
    fn_ptr: |args| Ok(Value::Bool(callable(&args[0]))),
    arity: Arity::exactly(1),
};

static LIST_TEST: PrimitiveFn = PrimitiveFn {
    name: "list?",
    fn_ptr: |args| Ok(Value::Bool(matches!(args[0], Value::List(_)))),
    arity: Arity::exactly(1),
};

static NOT: PrimitiveFn = PrimitiveFn {
    name: "not",
    fn_ptr: |args| Ok(Value::Bool(!truthy(&args[0]))),
    arity: Arity::exactly(1),
};

static PRINT: PrimitiveFn = PrimitiveFn {
    name: "print",
    fn_ptr: print_,
    arity: Arity::at_least(0),
};

fn print_(args: &[Value]) -> evaluator::Result {
    eprintln!("{}", printer::flat_str(args));
    Ok(Value::Nil)
}

// `(# anything at all)` is how source code carries comments.
static COMMENT: PrimitiveFn = PrimitiveFn {
    name: "#",
    fn_ptr: |_| Ok(Value::Nil),
    arity: Arity::at_least(0),
};

pub static CORE: &[&PrimitiveFn] = &[
    // Arithmetic
    &SUM,
    &SUB,
    &MUL,
    &DIV,
    // Comparisons
    &GT,
    &GE,
    &LT,
    &LE,
    &EQUAL,
    &EQUAL_TEST,
    &EQ_TEST,
    // Working with lists
    &CAR,
    &CDR,
    &CONS,
    &LIST,
    &APPLY,
    &MAP,
    // Testing
    &NULL_TEST,
    &NUMBER_TEST,
    &SYMBOL_TEST,
    &PROCEDURE_TEST,
    &LIST_TEST,
    &NOT,
    // Other
    &PRINT,
    &COMMENT,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{call_primitive, Error};

    fn call(name: &str, args: &[Value]) -> evaluator::Result {
        let func = CORE
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("no primitive {}", name));
        call_primitive(func, args)
    }

    fn n(x: f64) -> Value {
        Value::Number(x)
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = CORE.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CORE.len());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(call("+", &[n(1.0), n(2.0), n(3.5)]).unwrap(), n(6.5));
        assert_eq!(call("+", &[n(7.0)]).unwrap(), n(7.0));
        assert_eq!(call("-", &[n(10.0), n(4.0)]).unwrap(), n(6.0));
        assert_eq!(call("*", &[n(3.0), n(4.0)]).unwrap(), n(12.0));
        assert_eq!(call("/", &[n(1.0), n(4.0)]).unwrap(), n(0.25));
        assert_eq!(call("/", &[n(1.0), n(0.0)]).unwrap(), n(f64::INFINITY));
    }

    #[test]
    fn arithmetic_is_checked() {
        assert!(matches!(call("+", &[]), Err(Error::ArityMismatch(_))));
        assert!(matches!(call("-", &[n(1.0)]), Err(Error::ArityMismatch(_))));
        assert!(matches!(
            call("*", &[n(1.0), Value::Bool(true)]),
            Err(Error::TypeMismatch(TypeMismatch::NotANumber))
        ));
    }

    #[test]
    fn comparisons() {
        assert_eq!(call(">", &[n(2.0), n(1.0)]).unwrap(), Value::Bool(true));
        assert_eq!(call(">=", &[n(1.0), n(1.0)]).unwrap(), Value::Bool(true));
        assert_eq!(call("<=", &[n(2.0), n(1.0)]).unwrap(), Value::Bool(false));
        assert_eq!(call("<", &[n(1.0), n(2.0)]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn equalities() {
        let a = Value::wrap_list(vec![n(1.0)]);
        let b = Value::wrap_list(vec![n(1.0)]);
        assert_eq!(call("=", &[a.clone(), b.clone()]).unwrap(), Value::Bool(true));
        assert_eq!(call("equal?", &[a.clone(), b.clone()]).unwrap(), Value::Bool(true));
        assert_eq!(call("eq?", &[a.clone(), b]).unwrap(), Value::Bool(false));
        assert_eq!(call("eq?", &[a.clone(), a]).unwrap(), Value::Bool(true));
        assert_eq!(call("eq?", &[n(2.0), n(2.0)]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn car_and_cdr() {
        let list = Value::wrap_list(vec![n(1.0), n(2.0), n(3.0)]);
        assert_eq!(call("car", &[list.clone()]).unwrap(), n(1.0));
        assert_eq!(
            call("cdr", &[list.clone()]).unwrap(),
            Value::wrap_list(vec![n(2.0), n(3.0)])
        );
        assert!(call("cdr", &[Value::Nil]).unwrap().is_null());
        assert!(matches!(
            call("car", &[Value::wrap_list(vec![])]),
            Err(Error::EmptyList("car"))
        ));
        assert!(matches!(call("car", &[Value::Nil]), Err(Error::EmptyList("car"))));
        assert!(matches!(
            call("car", &[n(1.0)]),
            Err(Error::TypeMismatch(TypeMismatch::NotAList))
        ));
    }

    #[test]
    fn cdr_copies() {
        let list = Value::wrap_list(vec![n(1.0), n(2.0)]);
        let rest = call("cdr", &[list.clone()]).unwrap();
        call("cons", &[rest, n(3.0)]).unwrap();
        assert_eq!(list, Value::wrap_list(vec![n(1.0), n(2.0)]));
    }

    #[test]
    fn cons_appends_in_place() {
        let list = Value::wrap_list(vec![n(1.0)]);
        let result = call("cons", &[list.clone(), n(2.0)]).unwrap();
        assert_eq!(call("eq?", &[list.clone(), result]).unwrap(), Value::Bool(true));
        assert_eq!(list, Value::wrap_list(vec![n(1.0), n(2.0)]));
        assert_eq!(
            call("cons", &[Value::Nil, n(1.0)]).unwrap(),
            Value::wrap_list(vec![n(1.0)])
        );
    }

    #[test]
    fn predicates() {
        let empty = Value::wrap_list(vec![]);
        assert_eq!(call("null?", &[Value::Nil]).unwrap(), Value::Bool(true));
        assert_eq!(call("null?", &[empty.clone()]).unwrap(), Value::Bool(true));
        assert_eq!(call("null?", &[n(0.0)]).unwrap(), Value::Bool(false));
        assert_eq!(call("number?", &[n(0.0)]).unwrap(), Value::Bool(true));
        assert_eq!(call("symbol?", &[Value::new_symbol("a")]).unwrap(), Value::Bool(true));
        assert_eq!(call("list?", &[empty]).unwrap(), Value::Bool(true));
        assert_eq!(call("list?", &[Value::Nil]).unwrap(), Value::Bool(false));
        assert_eq!(
            call("procedure?", &[Value::Primitive(&SUM)]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(call("not", &[Value::Bool(false)]).unwrap(), Value::Bool(true));
        assert_eq!(call("not", &[n(0.0)]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn apply_and_map_primitives() {
        let list_fn = Value::Primitive(&LIST);
        assert_eq!(
            call("apply", &[list_fn.clone(), n(4.0)]).unwrap(),
            Value::wrap_list(vec![n(4.0)])
        );
        assert!(call("apply", &[list_fn.clone()]).unwrap().is_null());
        assert!(call("apply", &[list_fn.clone(), Value::Nil]).unwrap().is_null());
        assert_eq!(
            call("map", &[list_fn, Value::wrap_list(vec![n(1.0), n(2.0)])]).unwrap(),
            Value::wrap_list(vec![
                Value::wrap_list(vec![n(1.0)]),
                Value::wrap_list(vec![n(2.0)]),
            ])
        );
        assert!(matches!(
            call("apply", &[n(1.0)]),
            Err(Error::TypeMismatch(TypeMismatch::NotCallable))
        ));
    }

    #[test]
    fn comment_and_print_return_nil() {
        assert!(call("#", &[Value::new_symbol("note"), n(1.0)]).unwrap().is_nil());
        assert!(call("print", &[]).unwrap().is_nil());
    }
}
