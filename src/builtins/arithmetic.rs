// ABOUTME: Numeric built-ins: +, -, *, /, pow, sqrt

use super::{arg_line, Builtin};
use crate::env::Environment;
use crate::error::LangError;
use crate::eval::eval_form;
use crate::value::{Value, ValueKind};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<&'static str, Builtin>) {
    table.insert("+", Builtin::new(add));
    table.insert("-", Builtin::new(sub));
    table.insert("*", Builtin::new(mul));
    table.insert("/", Builtin::new(div));
    table.insert("pow", Builtin::new(pow));
    table.insert("sqrt", Builtin::new(sqrt));
}

fn eval_args(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Vec<Value>, LangError> {
    let mut out = Vec::with_capacity(args.len());
    for a in args {
        out.push(eval_form(env, sink, a)?);
    }
    Ok(out)
}

/// `Some(ints)` if every value is an `Int`, else `None` (caller falls back
/// to the float path).
fn all_int(values: &[Value]) -> Option<Vec<i32>> {
    values.iter().map(|v| v.as_int().ok()).collect()
}

fn numeric(values: &[Value]) -> Result<Vec<f64>, LangError> {
    values.iter().map(|v| v.as_numeric()).collect()
}

/// `+` has no minimum arity: zero operands is the additive identity.
fn add(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    let values = eval_args(env, sink, args)?;
    if let Some(ints) = all_int(&values) {
        Ok(Value::int(ints.iter().fold(0i32, |acc, n| acc.wrapping_add(*n))))
    } else {
        let nums = numeric(&values)?;
        Ok(Value::float(nums.iter().sum::<f64>() as f32))
    }
}

/// `-` uses the first operand as the running total and subtracts every
/// remaining one in order; with a single operand there's nothing left to
/// subtract, so it's returned unchanged. Zero operands has no sensible
/// initial value and is an error.
fn sub(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.is_empty() {
        return Err(LangError::argument("'-' requires at least 1 argument", arg_line(args)));
    }
    let values = eval_args(env, sink, args)?;
    if let Some(ints) = all_int(&values) {
        Ok(Value::int(ints[1..].iter().fold(ints[0], |acc, n| acc - n)))
    } else {
        let nums = numeric(&values)?;
        Ok(Value::float(nums[1..].iter().fold(nums[0], |acc, n| acc - n) as f32))
    }
}

/// `*` has no minimum arity: zero operands is the multiplicative identity.
fn mul(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    let values = eval_args(env, sink, args)?;
    if let Some(ints) = all_int(&values) {
        Ok(Value::int(ints.iter().fold(1i32, |acc, n| acc.wrapping_mul(*n))))
    } else {
        let nums = numeric(&values)?;
        Ok(Value::float(nums.iter().product::<f64>() as f32))
    }
}

/// `/` uses the first operand as the running total and divides by every
/// remaining one in order; with a single operand it's returned unchanged.
/// Zero operands is an error, as is dividing by zero anywhere in the chain.
fn div(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.is_empty() {
        return Err(LangError::argument("'/' requires at least 1 argument", arg_line(args)));
    }
    let values = eval_args(env, sink, args)?;
    let line = arg_line(args);
    if let Some(ints) = all_int(&values) {
        let mut acc = ints[0];
        for n in &ints[1..] {
            if *n == 0 {
                return Err(LangError::argument("cannot divide by zero", line));
            }
            acc /= n;
        }
        Ok(Value::int(acc))
    } else {
        let nums = numeric(&values)?;
        let mut acc = nums[0];
        for n in &nums[1..] {
            if *n == 0.0 {
                return Err(LangError::argument("cannot divide by zero", line));
            }
            acc /= n;
        }
        Ok(Value::float(acc as f32))
    }
}

fn pow(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 2 {
        return Err(LangError::argument("'pow' requires exactly 2 arguments", arg_line(args)));
    }
    let base = eval_form(env, sink, &args[0])?;
    let exp = eval_form(env, sink, &args[1])?;
    match (&base.kind, &exp.kind) {
        (ValueKind::Int(b), ValueKind::Int(e)) if *e >= 0 => Ok(Value::int(b.pow(*e as u32))),
        _ => {
            let b = base.as_numeric()?;
            let e = exp.as_numeric()?;
            Ok(Value::float(b.powf(e) as f32))
        }
    }
}

/// An `Int` operand returns a truncated `Int`; a `Float` operand returns a
/// `Float`.
fn sqrt(env: &Rc<Environment>, sink: &mut dyn Write, args: &[Value]) -> Result<Value, LangError> {
    if args.len() != 1 {
        return Err(LangError::argument("'sqrt' requires exactly 1 argument", arg_line(args)));
    }
    let v = eval_form(env, sink, &args[0])?;
    let n = v.as_numeric()?;
    if n < 0.0 {
        return Err(LangError::argument(
            "cannot take the square root of a negative number",
            arg_line(args),
        ));
    }
    match &v.kind {
        ValueKind::Int(_) => Ok(Value::int(n.sqrt() as i32)),
        _ => Ok(Value::float(n.sqrt() as f32)),
    }
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
    fn test_add_ints_stays_int() {
        assert_eq!(eval_str("(+ 1 2 3 4)").as_int().unwrap(), 10);
    }

    #[test]
    fn test_add_mixed_promotes_to_float() {
        assert_eq!(eval_str("(+ 1 2.5)").as_float().unwrap(), 3.5);
    }

    #[test]
    fn test_add_with_no_args_is_zero() {
        assert_eq!(eval_str("(+)").as_int().unwrap(), 0);
    }

    #[test]
    fn test_mul_with_no_args_is_one() {
        assert_eq!(eval_str("(*)").as_int().unwrap(), 1);
    }

    #[test]
    fn test_sub_single_arg_returns_it_unchanged() {
        assert_eq!(eval_str("(- 5)").as_int().unwrap(), 5);
    }

    #[test]
    fn test_div_single_arg_returns_it_unchanged() {
        assert_eq!(eval_str("(/ 5)").as_int().unwrap(), 5);
    }

    #[test]
    fn test_div_by_zero_is_argument_error() {
        let env = Environment::new();
        let mut out = Vec::new();
        let err =
            crate::eval::evaluate(&env, &mut out, &parse(&lex("(/ 10 0)").unwrap()).unwrap())
                .unwrap_err();
        assert!(matches!(err, LangError::Argument { .. }));
    }

    #[test]
    fn test_sub_with_no_args_is_error() {
        let env = Environment::new();
        let mut out = Vec::new();
        let err = crate::eval::evaluate(&env, &mut out, &parse(&lex("(-)").unwrap()).unwrap())
            .unwrap_err();
        assert!(matches!(err, LangError::Argument { .. }));
    }

    #[test]
    fn test_int_div_truncates() {
        assert_eq!(eval_str("(/ 7 2)").as_int().unwrap(), 3);
    }

    #[test]
    fn test_pow_int_exponent() {
        assert_eq!(eval_str("(pow 2 10)").as_int().unwrap(), 1024);
    }

    #[test]
    fn test_sqrt_int_operand_stays_int() {
        assert_eq!(eval_str("(sqrt 9)").as_int().unwrap(), 3);
    }

    #[test]
    fn test_sqrt_float_operand_stays_float() {
        assert_eq!(eval_str("(sqrt 2.25)").as_float().unwrap(), 1.5);
    }

    #[test]
    fn test_sqrt_negative_is_argument_error() {
        let env = Environment::new();
        let mut out = Vec::new();
        let err =
            crate::eval::evaluate(&env, &mut out, &parse(&lex("(sqrt -4)").unwrap()).unwrap())
                .unwrap_err();
        assert!(matches!(err, LangError::Argument { .. }));
    }
}
