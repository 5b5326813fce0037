//! CLI module for modelstream.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and help display
//! - The chat command
//!
//! # Usage
//!
//! ```ignore
//! use modelstream::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, &mut std::io::stdout()).await?;
//! ```

pub mod args;
pub mod chat;
pub mod version;

pub use args::{parse_args, ArgsError, ChatArgs, CliCommand, USAGE};
pub use chat::{run_chat, stream_to_writer};
pub use version::{version_line, VERSION};

use std::io::Write;

use color_eyre::Result;

use crate::adapters::{GhCredentialsProvider, ReqwestHttpClient};
use crate::config::ClientConfig;

/// Run a parsed CLI command, writing its output to `out`.
pub async fn run_cli_command<W: Write>(command: CliCommand, out: &mut W) -> Result<()> {
    match command {
        CliCommand::Version => writeln!(out, "{}", version_line())?,
        CliCommand::Help => writeln!(out, "{}", USAGE)?,
        CliCommand::Chat(args) => {
            let config = chat::resolve_config(&args, ClientConfig::from_env());
            let http = ReqwestHttpClient::from_config(&config)?;
            run_chat(&args, config, http, &GhCredentialsProvider::new(), out).await?;
        }
    }
    Ok(())
}
