//! Solves the system of equations given on the command line, or read from stdin when no
//! arguments are given.
//!
//!     cargo run --example solve -- "2x + 3y = 8, 3x - y = 1"
//!     x = 1 y = 2
use std::io::Read;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let text = if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.join("\n")
    };

    println!("{}", lineq::solve_equation_text(&text));
    Ok(())
}
