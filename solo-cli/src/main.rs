#![allow(clippy::doc_markdown)]
#![doc = include_str!("../../README.md")]

mod cli;
mod prelude;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Settle(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
