// ABOUTME: Library root tying the lexer, parser, value model, environment, and evaluator together

pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod value;

use std::io::Write;
use std::rc::Rc;

pub use env::Environment;
pub use error::LangError;
pub use value::Value;

/// Lexes, parses, and evaluates `source` in one shot against `env`,
/// writing any `print`/`print-line` output to `sink`.
pub fn run(env: &Rc<Environment>, sink: &mut dyn Write, source: &str) -> Result<Value, LangError> {
    let tokens = lexer::lex(source)?;
    let forms = parser::parse(&tokens)?;
    eval::evaluate(env, sink, &forms)
}
