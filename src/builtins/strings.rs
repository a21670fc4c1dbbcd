// ABOUTME: String built-ins: string-append

use super::{arg_line, Builtin};
use crate::env::Environment;
use crate::error::LangError;
use crate::eval::eval_form;
use crate::value::Value;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("string-append", Builtin::new(string_append));
}

fn string_append(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() < 2 {
        return Err(LangError::argument(
            "'string-append' requires at least 2 arguments",
            arg_line(args),
        ));
    }
    let mut out = String::new();
    for a in args {
        let v = eval_form(env, sink, a)?;
        out.push_str(v.as_string()?);
    }
    Ok(Value::string(out))
}
