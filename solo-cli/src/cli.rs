mod settle;

use clap::{Parser, Subcommand};

use crate::cli::settle::SettleArgs;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Settle a stay from the meter readings and print the guest message.
    #[clap(name = "settle")]
    Settle(Box<SettleArgs>),
}
