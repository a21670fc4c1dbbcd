// ABOUTME: Control built-ins that receive unevaluated arguments: quote, if, define, define-func, let, help

use super::{arg_line, Builtin};
use crate::env::{Environment, UserFunction};
use crate::error::LangError;
use crate::eval::{eval_form, evaluate};
use crate::value::Value;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("quote", Builtin::new(quote));
    table.insert("if", Builtin::new(if_form));
    table.insert("define", Builtin::new(define));
    table.insert("define-func", Builtin::new(define_func));
    table.insert("let", Builtin::new(let_form));
    table.insert("help", Builtin::new(help));
}

/// Returns its single argument completely unevaluated.
fn quote(_env: &Rc<Environment>, _sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 1 {
        return Err(LangError::argument("'quote' requires exactly 1 argument", arg_line(args)));
    }
    Ok(args[0].clone())
}

fn if_form(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 3 {
        return Err(LangError::argument("'if' requires exactly 3 arguments", arg_line(args)));
    }
    let cond = eval_form(env, sink, &args[0])?;
    if cond.as_bool()? {
        eval_form(env, sink, &args[1])
    } else {
        eval_form(env, sink, &args[2])
    }
}

/// `(define name value-expr)`. Evaluates `value-expr` and binds it in the
/// current frame; returns the bound value.
fn define(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 2 {
        return Err(LangError::argument("'define' requires exactly 2 arguments", arg_line(args)));
    }
    let name = args[0].as_ident()?.to_string();
    let value = eval_form(env, sink, &args[1])?;
    env.set_variable(name, value.clone());
    Ok(value)
}

/// `(define-func name (params...) body...)`. Stores a [`UserFunction`];
/// the body is never touched until the function is actually called.
fn define_func(env: &Rc<Environment>, _sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() < 3 {
        return Err(LangError::argument(
            "'define-func' requires a name, a parameter list, and a body",
            arg_line(args),
        ));
    }
    let name = args[0].as_ident()?.to_string();
    let param_items = args[1].as_list()?;
    let mut params = Vec::with_capacity(param_items.len());
    for p in param_items {
        params.push(p.as_ident()?.to_string());
    }
    let body = Value::list(args[2..].to_vec(), args[0].line);
    env.set_user_function(name.clone(), UserFunction { name, params, body });
    Ok(Value::none())
}

/// `(let ((name value-expr)...) body...)`. Bindings are evaluated in the
/// outer environment; the body runs in a fresh child frame so bindings
/// don't leak once `let` returns.
fn let_form(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.is_empty() {
        return Err(LangError::argument(
            "'let' requires a binding list and a body",
            arg_line(args),
        ));
    }
    let bindings = args[0].as_list()?;
    let child = Environment::with_parent(env.clone());
    for binding in bindings {
        // A binding must be a (name expr) pair with an identifier name;
        // anything else is silently skipped rather than rejected.
        let Ok(pair) = binding.as_list() else { continue };
        if pair.len() != 2 {
            continue;
        }
        let Ok(name) = pair[0].as_ident() else { continue };
        let value = eval_form(env, sink, &pair[1])?;
        child.set_variable(name.to_string(), value);
    }

    if args.len() == 1 {
        return Ok(Value::none());
    }
    evaluate(&child, sink, &Value::list(args[1..].to_vec(), args[0].line))
}

/// Lists every built-in, every user function, and every variable visible
/// from the current frame. Ignores its arguments.
fn help(env: &Rc<Environment>, sink: &mut dyn Write, _args: &[Value]) -> Result<Value, LangError> {
    let write_err = |e: std::io::Error| LangError::argument(format!("write to output sink failed: {}", e), -1);

    writeln!(sink, "builtins:").map_err(write_err)?;
    for name in env.builtin_names() {
        writeln!(sink, "  {}", name).map_err(write_err)?;
    }

    let user_fns = env.user_function_names();
    if !user_fns.is_empty() {
        writeln!(sink, "functions:").map_err(write_err)?;
        for name in user_fns {
            writeln!(sink, "  {}", name).map_err(write_err)?;
        }
    }

    let vars = env.variable_names();
    if !vars.is_empty() {
        writeln!(sink, "variables:").map_err(write_err)?;
        for name in vars {
            writeln!(sink, "  {}", name).map_err(write_err)?;
        }
    }
    Ok(Value::none())
}
