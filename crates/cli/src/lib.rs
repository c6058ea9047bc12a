//! `subtrack` command-line front end.

pub mod args;
mod output;
mod run;

pub use args::{Cli, Command, GlobalArgs, LogCommand, OrderArgs};
pub use run::run;
