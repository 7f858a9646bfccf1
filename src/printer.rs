use crate::types::{List, Value};
use itertools::Itertools;

/// Stand-in for a list met again while it is still being rendered.
const CYCLE: &str = "...";

/// Lists currently being rendered, innermost last. A shared list that merely
/// appears twice is rendered twice; only a list nested inside itself is cut.
type Rendering = Vec<*const ()>;

/// Readable representation, as echoed by the REPL.
pub fn pr_str(object: &Value) -> String {
    readable(object, &mut Rendering::new())
}

/// The rendering `print` uses: arguments joined by spaces, with nested lists
/// flattened into the same run of text.
pub fn flat_str(args: &[Value]) -> String {
    flat(args, &mut Rendering::new())
}

fn readable(object: &Value, rendering: &mut Rendering) -> String {
    match object {
        Value::List(list) => guarded(list, rendering, |elements, rendering| {
            format!(
                "({})",
                elements.iter().map(|e| readable(e, rendering)).join(" ")
            )
        }),
        other => atom_str(other),
    }
}

fn flat(args: &[Value], rendering: &mut Rendering) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::List(list) => guarded(list, rendering, flat),
            other => atom_str(other),
        })
        .join(" ")
}

fn guarded(
    list: &List,
    rendering: &mut Rendering,
    render: impl FnOnce(&[Value], &mut Rendering) -> String,
) -> String {
    if rendering.contains(&list.id()) {
        return CYCLE.to_string();
    }
    rendering.push(list.id());
    let elements = list.to_vec();
    let text = render(&elements, rendering);
    rendering.pop();
    text
}

fn atom_str(object: &Value) -> String {
    match object {
        Value::Nil => String::from("nil"),
        Value::Number(x) => x.to_string(),
        Value::Bool(true) => String::from("#t"),
        Value::Bool(false) => String::from("#f"),
        Value::Symbol(name) => name.to_string(),
        Value::Primitive(f) => format!("#<primitive {}>", f.name),
        Value::Closure(c) => c.to_string(),
        Value::List(_) => pr_str(object),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::wrap_list(vec![
            Value::new_symbol("Factorial"),
            Value::wrap_list(vec![Value::Number(10.0), Value::Bool(true)]),
            Value::Number(2.5),
        ])
    }

    #[test]
    fn readable_keeps_parentheses() {
        assert_eq!(pr_str(&sample()), "(Factorial (10 #t) 2.5)");
        assert_eq!(pr_str(&Value::Nil), "nil");
    }

    #[test]
    fn flat_drops_parentheses() {
        assert_eq!(
            flat_str(&[sample(), Value::Number(3628800.0)]),
            "Factorial 10 #t 2.5 3628800"
        );
        assert_eq!(flat_str(&[]), "");
    }

    #[test]
    fn self_containing_list_is_cut() {
        let list = List::new(vec![Value::Number(1.0)]);
        list.push(Value::List(list.clone()));
        let value = Value::List(list);
        assert_eq!(pr_str(&value), "(1 ...)");
        assert_eq!(flat_str(&[value]), "1 ...");
    }

    #[test]
    fn shared_sublist_renders_each_time() {
        let inner = Value::wrap_list(vec![Value::Number(1.0)]);
        let outer = Value::wrap_list(vec![inner.clone(), inner]);
        assert_eq!(pr_str(&outer), "((1) (1))");
        assert_eq!(flat_str(&[outer]), "1 1");
    }
}
