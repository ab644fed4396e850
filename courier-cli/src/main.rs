//! Entry point for the `courier` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = courier_cli::run() {
        eprintln!("courier: {err}");
        std::process::exit(1);
    }
}
