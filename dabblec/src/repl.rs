use std::io::Write;
use std::{cell::RefCell, path::PathBuf, rc::Rc};

use dabble_core::{
    environment::prelude::Environment,
    eval::{eval_program, pervasives},
    parser::prelude::parse_program,
    utils::prelude::Error,
};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	// One scope chain for the whole session, so vars stick around between
	// lines.
	let env = Rc::new(RefCell::new(Environment::with_parent(pervasives())));

	ctrlc::set_handler(|| std::process::exit(0)).expect("Setting Ctrl-C handler");

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				match parse_program(&input) {
                    Ok(program) => match eval_program(&program, env.clone()) {
                        Ok(value) => println!("{value}"),
                        Err(error) => {
                            let err = Error::Runtime { error };
                            print!("{}", err.pretty_string());
                        }
                    },
                    Err(error) => {
                        let err = Error::Parse {
                            path: PathBuf::new(),
                            src: input.clone(),
                            error
                        };
                        print!("{}", err.pretty_string());
                    }
                }
			}
		}
	}
}
