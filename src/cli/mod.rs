//! CLI module for Enterprise Jarvis
//!
//! Provides the `serve` subcommand, which runs the assistant API and the chat
//! UI on one port.

pub mod serve;

use clap::{Parser, Subcommand};

/// Enterprise Jarvis - retrieval-augmented assistant for department knowledge
#[derive(Parser)]
#[command(name = "jarvis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run API + UI server
    Serve(serve::ServeArgs),
}
