//! Command-line argument definitions for the FlowLang CLI.
//!
//! Input files are optional everywhere; without one the command reads
//! standard input.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// FlowLang - translate diagrams between text and graph form
#[derive(Parser, Debug)]
#[command(name = "flowlang")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding saved diagrams
    #[arg(long, global = true, env = "FLOWLANG_STORE", default_value = ".flowlang")]
    pub store: PathBuf,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse FlowLang into editor graph JSON
    Parse {
        /// FlowLang file (default: stdin)
        file: Option<PathBuf>,

        /// Wrap the result in a {"success": ...} envelope
        #[arg(long)]
        envelope: bool,
    },

    /// Serialize editor graph JSON ({nodes, edges}) into FlowLang
    Sync {
        /// Graph JSON file (default: stdin)
        file: Option<PathBuf>,

        /// Diagram title, overriding `diagram_title` in the input
        #[arg(long)]
        title: Option<String>,

        /// Wrap the result in a {"success": ...} envelope
        #[arg(long)]
        envelope: bool,
    },

    /// Parse FlowLang and render it for export
    Render {
        /// FlowLang file (default: stdin)
        file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = RenderFormat::Svg)]
        format: RenderFormat,
    },

    /// Print the completion request that asks a model for FlowLang
    Prompt {
        /// What the diagram should show
        text: String,

        /// Model to request
        #[arg(long, env = "FLOWLANG_MODEL")]
        model: Option<String>,
    },

    /// Strip Markdown code fences from a model answer
    Clean {
        /// Answer file (default: stdin)
        file: Option<PathBuf>,

        /// Input is a raw chat-completion response body
        #[arg(long)]
        chat_response: bool,
    },

    /// Parse FlowLang and save it under its title
    Save {
        /// FlowLang file (default: stdin)
        file: Option<PathBuf>,

        /// Title (default: the diagram's own title)
        #[arg(long)]
        title: Option<String>,

        /// The request the diagram was generated from
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Print a saved diagram
    Load {
        key: String,

        /// Print the stored graph JSON instead of FlowLang
        #[arg(long)]
        graph: bool,
    },

    /// List saved diagrams
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderFormat {
    Svg,
    Graphml,
    /// Graph statistics as JSON
    Stats,
}
