//! Product API entry point
//!
//! Parses arguments via `cli::run`, prints errors to stderr and exits
//! non-zero on failure. Configuration, logging and the server are all set
//! up inside the CLI module.

use product_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
