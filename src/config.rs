// ABOUTME: Ambient constants: version info and REPL welcome text

#[allow(dead_code)]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "lisp-core interpreter";
pub const WELCOME_SUBTITLE: &str = "lexer, parser, and tree-walking evaluator over a unified built-in table";

pub const HELP_TEXT: &str = r#"
Available REPL commands:
  (quit) or (exit)     - Exit the REPL
  (help)               - List every built-in and every defined function

Type any expression to evaluate it. Use Ctrl-D or (quit) to exit.
"#;
