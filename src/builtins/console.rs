// ABOUTME: Output built-ins that write to the evaluator's injected sink: print, print-line

use super::Builtin;
use crate::env::Environment;
use crate::error::{LangError, UNKNOWN_LINE};
use crate::eval::eval_form;
use crate::value::Value;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("print", Builtin::new(print));
    table.insert("print-line", Builtin::new(print_line));
}

fn write_err(e: std::io::Error) -> LangError {
    LangError::argument(format!("write to output sink failed: {}", e), UNKNOWN_LINE)
}

/// Variadic: writes every operand's textual form followed by a trailing
/// space, including the last one. Flushes before returning so the host
/// observes output in program order even if a later form errors.
fn print(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    for a in args {
        let v = eval_form(env, sink, a)?;
        write!(sink, "{} ", v).map_err(write_err)?;
    }
    sink.flush().map_err(write_err)?;
    Ok(Value::none())
}

/// Same as [`print`], plus a trailing newline after all operands.
fn print_line(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    for a in args {
        let v = eval_form(env, sink, a)?;
        write!(sink, "{} ", v).map_err(write_err)?;
    }
    writeln!(sink).map_err(write_err)?;
    sink.flush().map_err(write_err)?;
    Ok(Value::none())
}
