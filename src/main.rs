//! Small CLI for rolling dice expressions from the command line.

#[cfg(feature = "build-binary")]
fn main() {
	use std::env;
	use std::io::{self, Write};

	use fortuna::{dice::roller::FastRand, line, parse::parse};

	let args = env::args();
	let input = if args.len() > 1 {
		// Obtain the expression by combining all args passed to the executable, so that it can be left unquoted
		// even with spaces. The first argument is ignored since it is typically the name of the executable itself.
		args.skip(1).collect::<Vec<String>>().join(" ")
	} else {
		let mut lines = io::stdin().lines();

		// If there isn't already input available in stdin, display a prompt for it
		if lines.size_hint().1.is_none() {
			print!("Enter dice expression: ");
			io::stdout().flush().unwrap();
		}

		// Grab the first line available from stdin
		lines.next().unwrap().unwrap()
	};

	match parse(&input) {
		Ok(mut parsed) => {
			let mut rng = FastRand::default();
			for line in &mut parsed {
				let result = line.roll_in_place(&mut rng).clone();
				let marker = if result.critical_success {
					" (nat 20!)"
				} else if result.critical_failure {
					" (nat 1)"
				} else {
					""
				};
				println!("{line}: {result}{marker}");
			}
			println!("Total: {}", line::combine(&parsed));
		}
		Err(err) => eprintln!("Error: {err}"),
	};
}

#[cfg(not(feature = "build-binary"))]
fn main() {
	println!("Nothing to do since the build-binary feature is disabled.")
}
