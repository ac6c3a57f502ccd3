//! Rill CLI and REPL
//!
//! Usage:
//!   rill <file.rill>   - Evaluate a Rill file
//!   rill               - Start interactive REPL
//!   rill help          - Show help message

use std::env;
use std::fs;
use std::process;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rill::{InterpretError, Vm, VERSION};

/// Exit status for a compile error (sysexits EX_DATAERR)
const EXIT_COMPILE_ERROR: i32 = 65;
/// Exit status for a runtime error (sysexits EX_SOFTWARE)
const EXIT_RUNTIME_ERROR: i32 = 70;

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => run_repl(),
        2 => match args[1].as_str() {
            "help" | "--help" | "-h" => print_help(),
            "version" | "--version" | "-V" => println!("rill {}", VERSION),
            path => run_file(path),
        },
        _ => {
            eprintln!("{}: too many arguments", "error".red());
            print_help();
            process::exit(64);
        }
    }
}

fn print_help() {
    println!("{}", "Rill".cyan().bold());
    println!("A small expression language on a bytecode VM");
    println!("{} {}\n", "Version".cyan(), VERSION);
    println!("{}", "USAGE:".yellow());
    println!("  rill <file.rill>   Evaluate a Rill file");
    println!("  rill               Start interactive REPL");
    println!("  rill help          Show this help message");
    println!("  rill version       Show version\n");
    println!("{}", "EXAMPLES:".yellow());
    println!("  rill demos/arithmetic.rill");
    println!("  rill\n");
    println!("{}", "EXPRESSIONS:".yellow());
    println!("  1 + 2 * 3                Arithmetic with precedence");
    println!("  \"ab\" + \"cd\"              String concatenation");
    println!("  !(1 + 2 >= 4)            Comparison and negation");
}

fn run_file(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}: cannot read file '{}': {}", "error".red(), path, e);
            process::exit(74);
        }
    };

    let mut vm = Vm::new();
    match vm.interpret(&source) {
        Ok(value) => println!("{}", value.display(&vm.heap)),
        Err(InterpretError::Compile) => process::exit(EXIT_COMPILE_ERROR),
        Err(InterpretError::Runtime) => process::exit(EXIT_RUNTIME_ERROR),
    }
}

fn run_repl() {
    println!(
        "{} {} - {}",
        "Rill".cyan().bold(),
        VERSION.cyan(),
        "an expression language".dimmed()
    );
    println!("Type {} to leave\n", "exit".yellow());

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("{}: cannot start line editor: {}", "error".red(), e);
            process::exit(74);
        }
    };

    // One VM for the whole session: heap objects accumulate across lines
    // and are released only on exit
    let mut vm = Vm::new();

    loop {
        match rl.readline(&format!("{} ", "rill>".green().bold())) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if line == "exit" || line == "quit" {
                    break;
                }

                match vm.interpret(line) {
                    Ok(value) => {
                        println!("{} {}", "=>".dimmed(), value.display(&vm.heap).cyan());
                    }
                    // Diagnostics were already printed; keep the session
                    Err(_) => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}: {:?}", "error".red(), err);
                break;
            }
        }
    }
}
