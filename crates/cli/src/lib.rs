//! Library side of the `flowlang` command-line tool.
//!
//! [`run`] executes a parsed [`Cli`] against explicit input and output
//! streams so commands can be driven from tests without a process.

pub mod args;
mod commands;
pub mod store;

pub use args::{Cli, Command, RenderFormat};
pub use store::{DiagramRecord, DiagramStore, FileStore, MemoryStore, StoreError};

use anyhow::Result;
use std::io::{Read, Write};

/// Run one CLI command.
///
/// `stdin` is read only by commands invoked without an input file.
pub fn run(cli: &Cli, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    let store = FileStore::new(&cli.store);
    commands::dispatch(&cli.command, &store, stdin, out)
}
