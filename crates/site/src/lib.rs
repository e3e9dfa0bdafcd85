//! Terminal front end for the catalog: each subcommand renders one page.

pub mod cli;
pub mod commands;
pub mod pages;
pub mod style;

pub use cli::{Cli, Command};
pub use commands::run;
pub use style::Style;
