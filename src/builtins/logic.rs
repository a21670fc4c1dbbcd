// ABOUTME: Boolean built-ins: not, and, or

use super::{arg_line, Builtin};
use crate::env::Environment;
use crate::error::LangError;
use crate::eval::eval_form;
use crate::value::Value;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("not", Builtin::new(not));
    table.insert("and", Builtin::new(and));
    table.insert("or", Builtin::new(or));
}

fn not(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 1 {
        return Err(LangError::argument("'not' requires exactly 1 argument", arg_line(args)));
    }
    let v = eval_form(env, sink, &args[0])?;
    Ok(Value::bool(!v.as_bool()?))
}

fn and(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() < 2 {
        return Err(LangError::argument("'and' requires at least 2 arguments", arg_line(args)));
    }
    for a in args {
        if !eval_form(env, sink, a)?.as_bool()? {
            return Ok(Value::bool(false));
        }
    }
    Ok(Value::bool(true))
}

fn or(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() < 2 {
        return Err(LangError::argument("'or' requires at least 2 arguments", arg_line(args)));
    }
    for a in args {
        if eval_form(env, sink, a)?.as_bool()? {
            return Ok(Value::bool(true));
        }
    }
    Ok(Value::bool(false))
}
