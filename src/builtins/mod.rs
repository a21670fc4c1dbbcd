// ABOUTME: Process-wide built-in function table, shared across every environment frame

use crate::env::Environment;
use crate::error::{LangError, UNKNOWN_LINE};
use crate::value::Value;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

mod arithmetic;
mod comparison;
mod console;
mod control;
mod higher_order;
mod lists;
mod logic;
mod strings;

/// A built-in's arguments are the unevaluated forms written at the call
/// site. Most built-ins evaluate every argument immediately via
/// [`crate::eval::eval_form`]; control built-ins (`if`, `quote`, `define`,
/// `define-func`, `let`) inspect their arguments before deciding what, if
/// anything, to evaluate.
pub type BuiltinFn = fn(&Rc<Environment>, &mut dyn Write, &[Value]) -> Result<Value, LangError>;

#[derive(Clone, Copy, Debug)]
pub struct Builtin {
    pub func: BuiltinFn,
}

impl Builtin {
    fn new(func: BuiltinFn) -> Self {
        Builtin { func }
    }
}

/// The line of the first argument, or `UNKNOWN_LINE` if there are none.
/// Used by arity/domain errors raised before any argument is evaluated.
pub(crate) fn arg_line(args: &[Value]) -> i64 {
    args.first().map(|a| a.line).unwrap_or(UNKNOWN_LINE)
}

pub fn build_table() -> HashMap<&'static str, Builtin> {
    let mut table = HashMap::new();
    arithmetic::register(&mut table);
    comparison::register(&mut table);
    logic::register(&mut table);
    strings::register(&mut table);
    console::register(&mut table);
    lists::register(&mut table);
    control::register(&mut table);
    higher_order::register(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_table_has_expected_entries() {
        let table = build_table();
        for name in [
            "+", "-", "*", "/", "pow", "sqrt", "=", ">", "<", ">=", "<=", "not", "and", "or",
            "string-append", "print", "print-line", "car", "cdr", "empty?", "quote", "if",
            "define", "define-func", "let", "help", "map", "foldl", "foldr",
        ] {
            assert!(table.contains_key(name), "missing builtin {}", name);
        }
    }
}
