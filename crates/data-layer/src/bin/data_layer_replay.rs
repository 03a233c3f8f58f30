//! `data-layer-replay` — replay a data layer queue.
//!
//! Usage:
//!   data-layer-replay [--events] [--strict]
//!
//! The queue is read from stdin as a JSON array of items. The resulting state
//! is printed to stdout. With `--events`, every dispatched payload is printed
//! first, one JSON object per line. Logs go to stderr and follow `RUST_LOG`.

use std::io::{self, Read, Write};

use data_layer::cli::{replay, ReplayOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("data_layer=info,data_layer_core=info")),
        )
        .with_writer(io::stderr)
        .init();

    let options = match ReplayOptions::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match replay(buf.trim(), &options) {
        Ok(output) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{}", output.render(&options)) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
