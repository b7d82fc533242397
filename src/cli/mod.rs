//! Command line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod account;
pub mod prompt;
pub mod signup;

pub use prompt::Prompter;

#[derive(Debug, Parser)]
#[command(name = "jams")]
#[command(about = "Create and sign in to a Jams account", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path (defaults to jams.toml in the app data dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the signup wizard, resuming saved progress. Type `back` to return a step.
    Signup,

    /// Show saved signup progress
    Status,

    /// Discard saved signup progress
    Reset,

    /// Sign in with email and password and keep the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Show the signed-in account
    Whoami,

    /// End the stored session
    Logout,
}
