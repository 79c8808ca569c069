//! Inspect a JSON TLV fixture from the command line.
//!
//! Usage: `tlv_inspect <FIXTURE> <count|dump|find|shallowest|payload> [--flat] [--max-depth N]`
//!
//! Prints `key=value` lines on stdout. Exit code 2 on argument errors,
//! 1 on fixture or traversal errors.

use clap::Parser;
use onboard_tools::inspect::{run, InspectConfig};

fn main() {
    // Argument errors exit with status 2.
    let config = InspectConfig::parse();

    match run(&config) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("tlv_inspect: {e}");
            std::process::exit(1);
        }
    }
}
