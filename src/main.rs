use anyhow::{Context, Result};
use clap::Parser;
use pdb_msf::{msf::stream::Stream, Cli, Command, Pdb};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let pdb = Pdb::builder()
        .check_page_bounds(cli.strict)
        .dispatch(matches!(cli.command, Command::Streams))
        .open(&cli.pdb_path)
        .with_context(|| format!("loading {}", cli.pdb_path.display()))?;

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Info => {
            let sb = pdb.superblock();
            writeln!(out, "page size: {}", sb.page_size())?;
            writeln!(out, "page count: {}", sb.page_count())?;
            writeln!(out, "free page map page: {}", sb.free_page_map_page())?;
            writeln!(out, "directory size: {}", sb.directory_info().byte_len())?;
            writeln!(out, "directory pages: {:?}", sb.directory_pages())?;
            writeln!(out, "number of streams: {}", pdb.num_streams())?;
            let free = pdb.free_page_map().free_pages(sb.page_count() as u32).count();
            writeln!(out, "free pages: {free}")?;
        }
        Command::Streams => {
            for (num, stream) in pdb.streams().iter().enumerate() {
                let num = num as u32;
                let pages = pdb.directory().pages(num)?;
                let size = pdb.stream_size(num)?;
                write!(out, "{num:>5} {size:>10} {:<10}", stream.kind())?;
                if let Stream::Info(info) = stream {
                    write!(
                        out,
                        " version={} signature={:#010x} age={}",
                        info.version, info.signature, info.age
                    )?;
                }
                writeln!(out, " pages={pages:?}")?;
            }
        }
        Command::Dump { stream } => {
            let data = pdb.read_stream(stream)?;
            for (i, row) in data.chunks(16).enumerate() {
                let hex = row
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let ascii: String = row
                    .iter()
                    .map(|b| match b {
                        b' ' | 0x21..=0x7e => *b as char,
                        _ => '.',
                    })
                    .collect();
                writeln!(out, "{:08x}  {hex:<47}  |{ascii}|", i * 16)?;
            }
        }
        Command::Free => {
            let count = pdb.superblock().page_count() as u32;
            for page in pdb.free_page_map().free_pages(count) {
                writeln!(out, "{page}")?;
            }
        }
    }

    Ok(())
}
