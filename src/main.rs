mod app;
mod args;
mod config;
mod entry;
mod error;
mod logger;
mod metrics;
mod scan;
mod sinks;
mod source;
mod window;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
