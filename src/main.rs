//! rCountdown main entrypoint.

use rcountdown::run;
use rcountdown::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
