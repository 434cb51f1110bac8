//! Print the tokens of a COOL program, one per line:
//! position, kind, and the lexeme as a quoted string.
//!
//! ```ignore
//! <input.cl cool_tokens
//! ```
//!
//! Set `RUST_LOG=cool_highlight=trace` to see each rule match as it happens.

use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt::init();

    let mut input = std::io::stdin().lock();
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .expect("error: could not read input as UTF-8");

    for token in cool_highlight::tokenize(&source) {
        match token {
            Ok(token) => println!("{}\t{}\t{:?}", token.position, token.kind, token.text),
            Err(err) => {
                eprintln!("error: <stdin>:{err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
