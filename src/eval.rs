// ABOUTME: Tree-walking evaluator: form dispatch, identifier resolution, function invocation

use crate::env::Environment;
use crate::error::LangError;
use crate::value::{Value, ValueKind};
use std::io::Write;
use std::rc::Rc;

/// Evaluates a `List` of forms in order, returning the value of the last
/// one (or `Value::none()` for an empty list).
pub fn evaluate(env: &Rc<Environment>, sink: &mut dyn Write, forms: &Value) -> Result<Value, LangError> {
    let items = forms.as_list()?;
    let mut result = Value::none();
    for form in items {
        result = eval_one(env, sink, form)?;
    }
    Ok(result)
}

/// Evaluates a single form.
///
/// - A `List` headed by an `Ident` is a call: strip the head and dispatch
///   the rest as arguments.
/// - Any other list (quoted data, or a list headed by something other than
///   an identifier) evaluates to itself.
/// - A bare `Ident` is resolved built-in first, then user function, then
///   variable; a callable found this way is invoked with zero arguments.
/// - Any other atom evaluates to itself.
fn eval_one(env: &Rc<Environment>, sink: &mut dyn Write, form: &Value) -> Result<Value, LangError> {
    match &form.kind {
        ValueKind::List(items) => {
            if let Some(ValueKind::Ident(name)) = items.first().map(|f| &f.kind) {
                return call_named(env, sink, name, form.line, &items[1..]);
            }
            Ok(form.clone())
        }
        ValueKind::Ident(name) => eval_bare_ident(env, sink, name, form.line),
        _ => Ok(form.clone()),
    }
}

/// A standalone identifier with no sibling forms: built-in and user
/// function take priority over a same-named variable, and are invoked with
/// no arguments if found.
fn eval_bare_ident(env: &Rc<Environment>, sink: &mut dyn Write, name: &str, line: i64) -> Result<Value, LangError> {
    if let Some(builtin) = env.try_get_builtin(name) {
        return (builtin.func)(env, sink, &[]);
    }
    if env.try_get_user_function(name).is_some() {
        return call_named(env, sink, name, line, &[]);
    }
    env.try_get_variable(name)
        .ok_or_else(|| LangError::not_found(name, line))
}

/// Evaluates exactly one form. Built-ins and higher-order built-ins use
/// this to evaluate individual arguments without pulling in the whole
/// forms-list machinery.
pub fn eval_form(env: &Rc<Environment>, sink: &mut dyn Write, form: &Value) -> Result<Value, LangError> {
    eval_one(env, sink, form)
}

/// Looks up `name` as a built-in first, then as a user function, and
/// invokes it with `args` (unevaluated forms as written at the call site).
/// Neither case falls through to a variable lookup: a call form names a
/// callable or fails.
///
/// User-function calls are dynamically scoped: the new call frame's parent
/// is the *caller's* current environment, not the function's definition
/// environment. Arguments are evaluated in the caller's environment before
/// the frame is built.
pub fn call_named(
    env: &Rc<Environment>,
    sink: &mut dyn Write,
    name: &str,
    line: i64,
    args: &[Value],
) -> Result<Value, LangError> {
    if let Some(builtin) = env.try_get_builtin(name) {
        return (builtin.func)(env, sink, args);
    }

    if let Some(user_fn) = env.try_get_user_function(name) {
        if user_fn.params.len() != args.len() {
            return Err(LangError::argument(
                format!(
                    "'{}' expects {} argument(s), got {}",
                    user_fn.name,
                    user_fn.params.len(),
                    args.len()
                ),
                line,
            ));
        }

        // Each argument is evaluated against the fresh frame as it is
        // incrementally built, not against the caller's environment: a
        // parameter bound from an earlier argument is visible to a later
        // argument expression evaluated in the same call.
        let frame = Environment::with_parent(env.clone());
        for (param, a) in user_fn.params.iter().zip(args) {
            let value = eval_one(&frame, sink, a)?;
            frame.set_variable(param.clone(), value);
        }
        return evaluate(&frame, sink, &user_fn.body);
    }

    Err(LangError::not_found(name, line))
}
