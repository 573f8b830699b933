//! Just main(). Keep as small as possible.

// Lint attributes here do not reach the library, so blanket allows are fine.
#![allow(clippy::cargo)]
#![allow(clippy::restriction)]

use bookstore::utils::cli::run;

fn main() -> std::io::Result<()> {
    run()
}
