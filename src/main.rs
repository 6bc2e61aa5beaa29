//! dashlogger main entrypoint.

use dashlogger::run;

fn main() {
    println!();
    if let Err(e) = run() {
        dashlogger::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
