//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};

/// Henk - development-cluster companion for customer database dumps
#[derive(Parser, Debug)]
#[command(name = "henk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output (NO_COLOR in the environment does too)
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover and import a customer database dump
    Import {
        /// Import this client's dump without prompting.
        /// Matched case-insensitively against the discovered dump menu.
        #[arg(short, long)]
        client: Option<String>,

        /// Extra arguments passed through to the import tool unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra_args: Vec<String>,
    },
}

impl Cli {
    /// Color output enabled for this invocation.
    pub fn colors_enabled(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}
