//! Main entry point for the codelib CLI application.
//!
//! This binary packs and unpacks ZIP archives on the local filesystem and
//! converts files to and from raw deflate streams.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codelib::cli::Command;
use codelib::io::{create_file, file_size, open_file};
use codelib::{
    Cli, DeflateOptions, OwnedString, ZipContentInfo, ZipExtractor, ZipFileEntry, deflate, inflate,
    unzip, zip,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Zip { output, inputs } => {
            zip(output, inputs.as_slice()).with_context(|| format!("failed to create '{output}'"))
        }
        Command::Unzip {
            archive,
            extract_dir,
            raw,
            pipe,
        } => {
            if *pipe {
                pipe_members(archive, *raw)
            } else {
                extract_archive(archive, extract_dir, *raw, cli.is_quiet())
            }
        }
        Command::List { archive, verbose } => list_files(archive, *verbose),
        Command::Deflate {
            input,
            output,
            level,
        } => {
            let mut reader = open_file(input)?;
            let mut writer = create_file(output)?;
            let written = deflate(&mut reader, &mut writer, &DeflateOptions::with_level(*level))
                .with_context(|| format!("failed to deflate '{input}'"))?;
            info!(
                "{input} ({}) -> {output} ({})",
                format_size(file_size(&reader)?),
                format_size(written)
            );
            Ok(())
        }
        Command::Inflate { input, output } => {
            let mut reader = open_file(input)?;
            let mut writer = create_file(output)?;
            let written = inflate(&mut reader, &mut writer)
                .with_context(|| format!("failed to inflate '{input}'"))?;
            info!(
                "{input} ({}) -> {output} ({})",
                format_size(file_size(&reader)?),
                format_size(written)
            );
            Ok(())
        }
    }
}

/// Extract every member below `extract_dir` and report what was written.
fn extract_archive(archive: &str, extract_dir: &str, raw: bool, quiet: bool) -> Result<()> {
    let mut content = ZipContentInfo::new(&OwnedString::from_source(archive)?);

    let extracted = if raw {
        ZipExtractor::open(archive)?
            .raw(true)
            .extract_all(&mut content, extract_dir)
    } else {
        unzip(&mut content, &OwnedString::from_source(extract_dir)?)
    };
    extracted.with_context(|| format!("failed to extract '{archive}'"))?;

    if !quiet {
        for path in content.unzipped_file_paths() {
            println!("  extracting: {path}");
        }
    }
    Ok(())
}

/// Stream every file member to stdout, in archive order.
fn pipe_members(archive: &str, raw: bool) -> Result<()> {
    let mut extractor = ZipExtractor::open(archive)?.raw(raw);
    let entries = extractor.list_files()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (index, entry) in entries.iter().enumerate() {
        if entry.is_directory {
            continue;
        }
        extractor
            .extract_to_writer(index, &mut out)
            .with_context(|| format!("failed to extract '{}'", entry.file_name))?;
    }
    out.flush()?;
    Ok(())
}

/// List members of the archive.
///
/// Supports two output formats:
/// - Simple format: just member names, one per line
/// - Verbose format (`-v`): table with size, compression ratio and CRC-32
fn list_files(archive: &str, verbose: bool) -> Result<()> {
    let entries = ZipExtractor::open(archive)?.list_files()?;

    if !verbose {
        for entry in &entries {
            println!("{}", entry.file_name);
        }
        return Ok(());
    }

    println!(
        "{:>10}  {:>10}  {:>5}  {:>8}  {:>7}  Name",
        "Length", "Size", "Cmpr", "CRC-32", "Method"
    );
    println!("{}", "-".repeat(70));

    let mut total_uncompressed = 0u64;
    let mut total_compressed = 0u64;
    let mut file_count = 0usize;

    for entry in &entries {
        println!(
            "{:>10}  {:>10}  {:>4}%  {:08x}  {:>7}  {}",
            entry.uncompressed_size,
            entry.compressed_size,
            entry.saved_percent(),
            entry.crc32,
            method_label(entry),
            entry.file_name
        );

        // Directories are not counted
        if !entry.is_directory {
            total_uncompressed += entry.uncompressed_size;
            total_compressed += entry.compressed_size;
            file_count += 1;
        }
    }

    println!("{}", "-".repeat(70));
    let total_ratio = if total_uncompressed > total_compressed {
        100 - total_compressed * 100 / total_uncompressed
    } else {
        0
    };
    println!(
        "{:>10}  {:>10}  {:>4}%  {:>17}  {} files ({})",
        total_uncompressed,
        total_compressed,
        total_ratio,
        "",
        file_count,
        format_size(total_uncompressed)
    );

    Ok(())
}

fn method_label(entry: &ZipFileEntry) -> String {
    match entry.compression_method {
        codelib::CompressionMethod::Stored => "Stored".to_string(),
        codelib::CompressionMethod::Deflate => "Defl".to_string(),
        other @ codelib::CompressionMethod::Other(_) => format!("#{}", other.as_u16()),
    }
}

/// Format a byte size into a human-readable string.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
