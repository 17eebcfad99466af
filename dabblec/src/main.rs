mod cli;
mod repl;

use std::path::PathBuf;

use clap::Parser;
use cli::{
    print_evaluated, print_parsed, print_parsing, print_running, stderr_buffer_writer
};
use dabble_core::{
    eval::run_path,
    parser::prelude::parse_program,
    utils::prelude::Error,
};

#[derive(Parser)]
enum Command {
    /// Evaluates a source file and prints the resulting value
    Run {
        /// Path of source file
        path: PathBuf,
    },
    /// Parses a source file and prints the tree it produces
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Print the raw tree instead of its rendered form
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Evaluate Print Loop
    Repl,
}

fn main() {
    match Command::parse() {
        Command::Run { path } => {
            let buf_writer = stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            print_running(&path.to_string_lossy());
            let start = std::time::Instant::now();

            match run_path(path) {
                Ok(value) => {
                    print_evaluated(std::time::Instant::now() - start);
                    println!("{value}");
                },
                Err(err) => {
                    err.pretty(&mut buf);
                    buf_writer
                        .print(&buf)
                        .expect("Writing error to stderr");

                    std::process::exit(1);
                }
            }
        },
        Command::Parse { path, print_ast } => {
            let buf_writer = stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            print_parsing(&path.to_string_lossy());
            let start = std::time::Instant::now();

            let src = match std::fs::read_to_string(&path) {
                Ok(src) => src,
                Err(err) => {
                    let err = Error::StdIo { err: err.kind() };
                    err.pretty(&mut buf);
                    buf_writer
                        .print(&buf)
                        .expect("Writing error to stderr");

                    std::process::exit(1);
                }
            };

            match parse_program(&src) {
                Ok(program) => {
                    print_parsed(std::time::Instant::now() - start);

                    if print_ast {
                        println!("{:#?}", program);
                    } else {
                        println!("{}", program);
                    }
                },
                Err(error) => {
                    let err = Error::Parse { path, src, error };
                    err.pretty(&mut buf);
                    buf_writer
                        .print(&buf)
                        .expect("Writing error to stderr");

                    std::process::exit(1);
                }
            }
        },
        Command::Repl => {
            if let Err(err) = repl::start() {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }
}
