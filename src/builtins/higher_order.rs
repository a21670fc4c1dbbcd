// ABOUTME: Higher-order built-ins: map, foldl, foldr

use super::{arg_line, Builtin};
use crate::env::Environment;
use crate::error::LangError;
use crate::eval::eval_form;
use crate::value::{Value, ValueKind};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("map", Builtin::new(map_fn));
    table.insert("foldl", Builtin::new(foldl));
    table.insert("foldr", Builtin::new(foldr));
}

/// Builds a fresh call list from a template plus one trailing argument.
/// A bare `Ident` template becomes a call with that one argument; a `List`
/// template (a partial application, e.g. `(+ 1)`) is copied and `x` is
/// appended as its last element. The template itself is never mutated.
fn build_call(template: &Value, x: &Value) -> Result<Value, LangError> {
    match &template.kind {
        ValueKind::Ident(_) => Ok(Value::list(vec![template.clone(), x.clone()], template.line)),
        ValueKind::List(items) => {
            let mut call = items.clone();
            call.push(x.clone());
            Ok(Value::list(call, template.line))
        }
        _ => Err(LangError::argument(
            "a map/fold template must be an identifier or a list",
            template.line,
        )),
    }
}

/// Same as [`build_call`] but appends two trailing arguments, `x` then
/// `acc`, as `foldl`/`foldr` require.
fn build_call_with_acc(template: &Value, x: &Value, acc: &Value) -> Result<Value, LangError> {
    match &template.kind {
        ValueKind::Ident(_) => Ok(Value::list(
            vec![template.clone(), x.clone(), acc.clone()],
            template.line,
        )),
        ValueKind::List(items) => {
            let mut call = items.clone();
            call.push(x.clone());
            call.push(acc.clone());
            Ok(Value::list(call, template.line))
        }
        _ => Err(LangError::argument(
            "a map/fold template must be an identifier or a list",
            template.line,
        )),
    }
}

/// `(map template list)`. `template` is a bare identifier or a partial
/// application list; `list` is consumed directly as literal list syntax
/// and never evaluated before iteration.
fn map_fn(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 2 {
        return Err(LangError::argument("'map' requires exactly 2 arguments", arg_line(args)));
    }
    let template = &args[0];
    let items = args[1].as_list()?;

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let call = build_call(template, item)?;
        out.push(eval_form(env, sink, &call)?);
    }
    Ok(Value::list(out, args[1].line))
}

/// `(foldl template init list)`. Traverses `list` left to right, building
/// each call as `template` applied to `(x acc)`.
fn foldl(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 3 {
        return Err(LangError::argument("'foldl' requires exactly 3 arguments", arg_line(args)));
    }
    let template = &args[0];
    let mut acc = eval_form(env, sink, &args[1])?;
    let items = args[2].as_list()?;

    for item in items {
        let call = build_call_with_acc(template, item, &acc)?;
        acc = eval_form(env, sink, &call)?;
    }
    Ok(acc)
}

/// `(foldr template init list)`. Same call shape as [`foldl`] but
/// traverses `list` right to left.
fn foldr(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 3 {
        return Err(LangError::argument("'foldr' requires exactly 3 arguments", arg_line(args)));
    }
    let template = &args[0];
    let mut acc = eval_form(env, sink, &args[1])?;
    let items = args[2].as_list()?;

    for item in items.iter().rev() {
        let call = build_call_with_acc(template, item, &acc)?;
        acc = eval_form(env, sink, &call)?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn eval_str(src: &str) -> Value {
        let env = Environment::new();
        let mut out = Vec::new();
        crate::eval::evaluate(&env, &mut out, &parse(&lex(src).unwrap()).unwrap()).unwrap()
    }

    #[test]
    fn test_map_with_partial_application_template() {
        let result = eval_str("(map (+ 1) (1 2 3 4 5))");
        let items = result.as_list().unwrap();
        let got: Vec<i32> = items.iter().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(got, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_map_with_bare_ident_template() {
        let result = eval_str("(define-func square (n) (* n n)) (map square (1 2 3 4))");
        let items = result.as_list().unwrap();
        let got: Vec<i32> = items.iter().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(got, vec![1, 4, 9, 16]);
    }

    #[test]
    fn test_map_list_argument_is_not_evaluated() {
        // Bare list syntax, no quote needed: the second argument is never
        // passed through the evaluator.
        let result = eval_str("(map (+ 0) (1 2 3))");
        assert_eq!(result.as_list().unwrap().len(), 3);
    }

    #[test]
    fn test_foldl_sums_left_to_right() {
        assert_eq!(eval_str("(foldl (+) 0 (1 2 3 4 5))").as_int().unwrap(), 15);
    }

    #[test]
    fn test_foldr_builds_in_reverse_order() {
        let result = eval_str(r#"(foldr (string-append) "" ("a" "b" "c"))"#);
        assert_eq!(result.as_string().unwrap(), "abc");
    }

    #[test]
    fn test_foldl_with_bare_ident_template() {
        assert_eq!(eval_str("(foldl + 0 (1 2 3 4))").as_int().unwrap(), 10);
    }

    #[test]
    fn test_map_template_is_not_mutated_across_iterations() {
        // If the template were mutated in place, the third call would see
        // arguments appended from the first two iterations.
        let result = eval_str("(map (+ 10) (1 2 3))");
        let items = result.as_list().unwrap();
        let got: Vec<i32> = items.iter().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(got, vec![11, 12, 13]);
    }
}
