// ABOUTME: CLI demo binary: compiles an expression, optionally binds variables, prints the result

use std::cell::Cell;
use std::rc::Rc;

use clap::Parser;
use evalc::{compile, evaluate};

#[derive(Parser)]
#[command(name = "evalc", about = "Compile and evaluate an arithmetic expression")]
struct Cli {
    /// The expression to evaluate, e.g. "sqrt(x^2 + 1)"
    expression: String,

    /// Bind a variable as name=value; may be repeated
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut bindings: Vec<(&str, Rc<Cell<f64>>)> = Vec::new();
    for raw in &cli.vars {
        let Some((name, value)) = raw.split_once('=') else {
            eprintln!("invalid --var {raw}: expected NAME=VALUE");
            std::process::exit(1);
        };
        match value.parse::<f64>() {
            Ok(v) => bindings.push((name, Rc::new(Cell::new(v)))),
            Err(_) => {
                eprintln!("invalid value for --var {raw}: not a number");
                std::process::exit(1);
            }
        }
    }

    match compile(&cli.expression, &bindings) {
        Ok(expr) => println!("{}", evaluate(&expr)),
        Err(e) => {
            eprintln!("parse error at position {}", e.position);
            std::process::exit(1);
        }
    }
}
