use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    pub pdb_path: PathBuf,
    #[command(subcommand)]
    pub command: Command,
    /// Reject stream pages at or beyond the superblock's page count.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print superblock fields and the stream count.
    Info,
    /// List every stream with its size, pages and decoded kind.
    Streams,
    /// Hex dump the bytes of one stream.
    Dump { stream: u32 },
    /// List free pages.
    Free,
}
