// ABOUTME: Comparison built-ins: =, >, <, >=, <=

use super::{arg_line, Builtin};
use crate::env::Environment;
use crate::error::LangError;
use crate::eval::eval_form;
use crate::value::Value;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("=", Builtin::new(eq));
    table.insert(">", Builtin::new(gt));
    table.insert("<", Builtin::new(lt));
    table.insert(">=", Builtin::new(ge));
    table.insert("<=", Builtin::new(le));
}

fn eval_pair_args(
    env: &Rc<Environment>,
    sink: &mut dyn Write,
    args: &[Value],
    name: &str,
) -> Result<(Value, Value), LangError> {
    if args.len() != 2 {
        return Err(LangError::argument(
            format!("'{}' requires exactly 2 arguments", name),
            arg_line(args),
        ));
    }
    let a = eval_form(env, sink, &args[0])?;
    let b = eval_form(env, sink, &args[1])?;
    Ok((a, b))
}

fn eq(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    let (a, b) = eval_pair_args(env, sink, args, "=")?;
    Ok(Value::bool(a.lang_eq(&b)))
}

/// Non-numeric operands compare as `false` rather than raising an error.
fn chain_numeric(
    env: &Rc<Environment>,
    sink: &mut dyn Write,
    args: &[Value],
    name: &str,
    op: fn(f64, f64) -> bool,
) -> Result<Value, LangError> {
    let (a, b) = eval_pair_args(env, sink, args, name)?;
    match (a.as_numeric(), b.as_numeric()) {
        (Ok(x), Ok(y)) => Ok(Value::bool(op(x, y))),
        _ => Ok(Value::bool(false)),
    }
}

fn gt(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    chain_numeric(env, sink, args, ">", |a, b| a > b)
}

fn lt(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    chain_numeric(env, sink, args, "<", |a, b| a < b)
}

fn ge(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    chain_numeric(env, sink, args, ">=", |a, b| a >= b)
}

fn le(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    chain_numeric(env, sink, args, "<=", |a, b| a <= b)
}
