// ABOUTME: CLI and REPL host: parses arguments, then either runs a script file or starts a REPL

use clap::Parser;
use lisp_core::config::{HELP_TEXT, VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use lisp_core::{run, Environment};
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::rc::Rc;

/// A small Lisp-family interpreter: lexer, parser, value model, and a
/// tree-walking evaluator over a unified built-in table.
#[derive(Parser, Debug)]
#[command(name = "lisp-core")]
#[command(version = VERSION)]
#[command(about = "A small Lisp-family interpreter")]
struct CliArgs {
    /// Script file to execute. If omitted, starts an interactive REPL.
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let env = Environment::new();

    if let Some(script_path) = args.script {
        return run_script(&script_path, &env);
    }

    run_repl(&env)
}

fn run_script(path: &PathBuf, env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;

    let mut stdout = std::io::stdout();
    match run(env, &mut stdout, &source) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_repl(env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = Editor::<(), rustyline::history::DefaultHistory>::with_config(config)
        .map_err(|e| format!("failed to initialize REPL: {}", e))?;

    let history_file = ".lisp_core_history";
    let _ = rl.load_history(history_file);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);
    println!("{}", HELP_TEXT);

    loop {
        let readline = rl.readline("lisp> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if matches!(line.trim(), "(quit)" | "(exit)") {
                    println!("Goodbye!");
                    break;
                }

                let mut stdout = std::io::stdout();
                match run(env, &mut stdout, &line) {
                    Ok(result) => {
                        if !result.is_none() {
                            println!("=> {}", result);
                        }
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}
