use clap::Parser;
use log::{debug, error, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod poll;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
    debug!("args: {:?}", args);

    let res = poll::run_poll(
        args.input.as_str(),
        args.poll_type.as_deref(),
        args.out.as_deref(),
        args.reference.as_deref(),
    );

    if let Err(e) = res {
        error!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
