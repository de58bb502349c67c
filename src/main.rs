//! fleetlog main entrypoint.

use fleetlog::run;
use fleetlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e.user_message());
        if e.is_transient() {
            eprintln!("({})", e);
        }
        std::process::exit(1);
    }
}
