use expression_operators::operators::Registry;
use expression_operators::{Associativity, Value, Variables};
use pretty_assertions::assert_eq;

const CATALOG: &[(&str, usize, i32, Associativity)] = &[
    ("!", 1, 3, Associativity::Right),
    ("NOT", 1, 3, Associativity::Right),
    ("&", 2, 2, Associativity::Left),
    ("AND", 2, 2, Associativity::Left),
    ("|", 2, 1, Associativity::Left),
    ("OR", 2, 1, Associativity::Left),
    ("XOR", 2, 2, Associativity::Left),
    ("==", 2, 5, Associativity::Left),
    ("EQUALS", 2, 5, Associativity::Left),
    ("!=", 2, 5, Associativity::Left),
    ("UNEQUAL", 2, 5, Associativity::Left),
    ("<", 2, 5, Associativity::Left),
    (">", 2, 5, Associativity::Left),
    ("<=", 2, 5, Associativity::Left),
    (">=", 2, 5, Associativity::Left),
    ("+", 2, 6, Associativity::Left),
    ("-", 2, 6, Associativity::Left),
    ("*", 2, 7, Associativity::Left),
    ("/", 2, 7, Associativity::Left),
    ("%", 2, 7, Associativity::Left),
    ("^", 2, 8, Associativity::Right),
    ("-", 1, 11, Associativity::Right),
    ("IN", 2, 6, Associativity::Left),
    ("CONTAINS", 2, 6, Associativity::Left),
    ("EXISTS", 1, 7, Associativity::Left),
    ("$", 1, 10, Associativity::Right),
    ("@", 2, 9, Associativity::Right),
    ("AT", 2, 9, Associativity::Right),
];

#[test]
fn metadata_matches_catalog() {
    let registry = Registry::with_builtins();
    assert_eq!(registry.len(), CATALOG.len());
    for &(symbol, arity, precedence, associativity) in CATALOG {
        let op = registry
            .get(symbol, arity)
            .unwrap_or_else(|| panic!("missing {symbol}/{arity}"));
        assert_eq!(
            (op.symbol(), op.arity(), op.precedence(), op.associativity()),
            (symbol, arity, precedence, associativity)
        );
    }
}

#[test]
fn metadata_is_stable_across_registries() {
    let a = Registry::with_builtins();
    let b = Registry::global();
    for op in a.operators() {
        let other = b.get(op.symbol(), op.arity()).unwrap();
        assert_eq!(op.info(), other.info());
    }
}

#[test]
fn element_access_binds_tightest_among_binary_operators() {
    let registry = Registry::with_builtins();
    let access = registry.get("@", 2).unwrap().precedence();
    for op in registry.operators().iter().filter(|op| op.arity() == 2) {
        if op.symbol() != "@" && op.symbol() != "AT" {
            assert!(access > op.precedence(), "{} binds tighter", op.symbol());
        }
    }
}

#[test]
fn parameter_info_covers_every_operand() {
    for op in Registry::with_builtins().operators() {
        for i in 0..op.arity() {
            let info = op
                .parameter_info(i)
                .unwrap_or_else(|| panic!("{} has no descriptor for operand {i}", op.symbol()));
            assert!(!info.name.is_empty());
            assert!(!info.kinds.is_empty());
        }
        assert_eq!(op.parameter_info(op.arity()), None);
    }
}

fn sample_operand(symbol: &str) -> Value {
    match symbol {
        "!" | "NOT" | "&" | "AND" | "|" | "OR" | "XOR" => Value::from(true),
        "@" | "AT" => Value::from(vec![Value::from(0.0)]),
        _ => Value::from(0.0),
    }
}

// Every operator consumes exactly `arity` operands and leaves the rest.
#[test]
fn consumes_exactly_arity_operands() {
    let vars = Variables::new().with("0.0", 1.0);
    let sentinel = Value::from("sentinel");
    for op in Registry::with_builtins().operators() {
        let mut operands: Vec<Value> = (0..op.arity()).map(|_| sample_operand(op.symbol())).collect();
        if op.symbol() == "@" || op.symbol() == "AT" {
            operands[1] = Value::from(0.0);
        }
        operands.push(sentinel.clone());
        let mut iter = operands.into_iter();
        op.evaluate(&mut iter, &vars)
            .unwrap_or_else(|e| panic!("{} failed: {e}", op.symbol()));
        assert_eq!(iter.next(), Some(sentinel.clone()), "{}", op.symbol());
        assert_eq!(iter.next(), None);
    }
}

#[test]
fn operators_are_shareable_across_threads() {
    let registry = Registry::global();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let vars = Variables::new().with("i", f64::from(i));
                let add = registry.get("+", 2).unwrap();
                let resolve = registry.get("$", 1).unwrap();
                let v = resolve
                    .evaluate(&mut std::iter::once(Value::from("i")), &vars)
                    .unwrap()
                    .unwrap();
                add.evaluate(&mut vec![v, Value::from(1.0)].into_iter(), &vars)
                    .unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(Value::from(i as f64 + 1.0)));
    }
}
