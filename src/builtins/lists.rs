// ABOUTME: List built-ins: car, cdr, empty?

use super::{arg_line, Builtin};
use crate::env::Environment;
use crate::error::LangError;
use crate::eval::eval_form;
use crate::value::Value;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("car", Builtin::new(car));
    table.insert("cdr", Builtin::new(cdr));
    table.insert("empty?", Builtin::new(is_empty));
}

fn car(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 1 {
        return Err(LangError::argument("'car' requires exactly 1 argument", arg_line(args)));
    }
    let v = eval_form(env, sink, &args[0])?;
    let items = v.as_list()?;
    items
        .first()
        .cloned()
        .ok_or_else(|| LangError::argument("'car' called on an empty list", v.line))
}

/// The empty list's `cdr` is itself, not an error.
fn cdr(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 1 {
        return Err(LangError::argument("'cdr' requires exactly 1 argument", arg_line(args)));
    }
    let v = eval_form(env, sink, &args[0])?;
    let items = v.as_list()?;
    if items.is_empty() {
        return Ok(Value::list(Vec::new(), v.line));
    }
    Ok(Value::list(items[1..].to_vec(), v.line))
}

fn is_empty(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 1 {
        return Err(LangError::argument("'empty?' requires exactly 1 argument", arg_line(args)));
    }
    let v = eval_form(env, sink, &args[0])?;
    Ok(Value::bool(v.as_list()?.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn eval_str(src: &str) -> Result<Value, LangError> {
        let env = Environment::new();
        let mut out = Vec::new();
        crate::eval::evaluate(&env, &mut out, &parse(&lex(src).unwrap()).unwrap())
    }

    #[test]
    fn test_car_of_list() {
        assert_eq!(eval_str("(car (quote (1 2 3)))").unwrap().as_int().unwrap(), 1);
    }

    #[test]
    fn test_cdr_of_list() {
        let result = eval_str("(cdr (quote (1 2 3)))").unwrap();
        assert_eq!(result.as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_car_of_empty_list_is_error() {
        assert!(eval_str("(car (quote ()))").is_err());
    }

    #[test]
    fn test_cdr_of_empty_list_is_empty_list() {
        let result = eval_str("(cdr (quote ()))").unwrap();
        assert_eq!(result.as_list().unwrap().len(), 0);
    }

    #[test]
    fn test_empty_predicate() {
        assert!(eval_str("(empty? (quote ()))").unwrap().as_bool().unwrap());
        assert!(!eval_str("(empty? (quote (1)))").unwrap().as_bool().unwrap());
    }

    #[test]
    fn test_empty_predicate_on_non_list_is_error() {
        assert!(eval_str("(empty? 5)").is_err());
    }
}
