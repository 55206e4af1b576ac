use std::io;

use rref_latex::shell;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_env("RREF_LOG"))
        .init();

    if let Err(e) = shell::run(io::stdin().lock(), io::stdout()) {
        println!("{}", e);
    }
}
