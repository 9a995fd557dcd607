// main.rs      stillgif command
//
// Copyright (c) 2019-2025  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::error::Error;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Read, Write};
use stillgif::block::{ScreenDesc, HEADER_LSD_SZ};
use stillgif::{Deanimator, ReadChunks, MIN_CHUNK_SZ, READ_SZ};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &str = std::env!("CARGO_PKG_VERSION");

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    match create_app().get_matches().subcommand() {
        ("strip", Some(matches)) => strip(matches)?,
        ("peek", Some(matches)) => {
            let mut out = StandardStream::stdout(ColorChoice::Auto);
            peek(&mut out, matches)?;
            out.reset()?;
        }
        _ => unreachable!("subcommand required"),
    }
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("stillgif")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("Streaming GIF de-animator")
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("strip")
                .about("Keep first frame of a GIF, without looping")
                .arg(Arg::with_name("file").required(true).help("input file"))
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("output file (default: stdout)"),
                )
                .arg(
                    Arg::with_name("chunk")
                        .long("chunk")
                        .takes_value(true)
                        .validator(is_size)
                        .help("minimum output chunk size"),
                )
                .arg(
                    Arg::with_name("read")
                        .long("read")
                        .takes_value(true)
                        .validator(is_size)
                        .help("input read size"),
                ),
        )
        .subcommand(
            SubCommand::with_name("peek")
                .about("Peek at de-animation of GIF file(s)")
                .arg(
                    Arg::with_name("files")
                        .required(true)
                        .min_values(1)
                        .help("input file(s)"),
                ),
        )
}

/// Validate a size argument
fn is_size(v: String) -> Result<(), String> {
    match v.parse::<usize>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(format!("invalid size: {}", v)),
    }
}

/// Get a size argument
fn size_arg(matches: &ArgMatches, name: &str, dflt: usize) -> usize {
    matches
        .value_of(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

/// Handle strip subcommand
fn strip(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let path = matches.value_of_os("file").ok_or("missing file")?;
    let min_chunk_sz = size_arg(matches, "chunk", MIN_CHUNK_SZ);
    let read_sz = size_arg(matches, "read", READ_SZ);
    let reader = ReadChunks::with_read_sz(File::open(path)?, read_sz);
    let mut writer: Box<dyn Write> = match matches.value_of_os("output") {
        Some(out) => Box::new(File::create(out)?),
        None => Box::new(io::stdout().lock()),
    };
    let chunks = Deanimator::new(reader).min_chunk_sz(min_chunk_sz);
    for chunk in chunks {
        writer.write_all(&chunk?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Handle peek subcommand
fn peek(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let values = matches.values_of_os("files").ok_or("missing files")?;
    for path in values {
        peek_file(out, path)?;
    }
    Ok(())
}

/// Peek at one GIF file
fn peek_file(
    out: &mut StandardStream,
    path: &OsStr,
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    out.set_color(&magenta)?;
    writeln!(out, "{:?}", path)?;
    let mut head = Vec::with_capacity(HEADER_LSD_SZ);
    let hsz = HEADER_LSD_SZ as u64;
    File::open(path)?.take(hsz).read_to_end(&mut head)?;
    let desc = match ScreenDesc::new(&head) {
        Some(desc) if desc.is_gif() => desc,
        _ => {
            out.set_color(&red)?;
            writeln!(out, "  not a GIF!")?;
            return Ok(());
        }
    };
    out.set_color(&bold)?;
    let version = String::from_utf8_lossy(&desc.version()).to_string();
    write!(out, "GIF{}", version)?;
    writeln!(out, ", {}x{}", desc.screen_width(), desc.screen_height())?;
    let gct = desc.color_table_config();
    out.set_color(&yellow)?;
    if gct.is_present() {
        write!(out, "  global colors: {}", gct.len())?;
        writeln!(out, ", background: {}", desc.background_color_idx())?;
    } else {
        writeln!(out, "  no global colors")?;
    }
    let reader = File::open(path)?;
    let mut frags = Deanimator::from_reader(reader).into_fragments();
    for frag in &mut frags {
        if let Err(e) = frag {
            out.set_color(&red)?;
            writeln!(out, "  error: {}", e)?;
            return Ok(());
        }
    }
    let tx = frags.transducer();
    out.set_color(&yellow)?;
    write!(out, "  {:>8} {:>8}", "Read", "Written")?;
    writeln!(out, " {:>5} {:>5}", "Kept", "Drop")?;
    out.set_color(&bold)?;
    write!(
        out,
        "  {:>8} {:>8} {:>5}",
        tx.consumed(),
        tx.emitted(),
        tx.extensions_kept()
    )?;
    if tx.extensions_dropped() > 0 {
        out.set_color(&red)?;
    }
    writeln!(out, " {:>5}", tx.extensions_dropped())?;
    if !tx.is_done() {
        out.set_color(&red)?;
        writeln!(out, "  truncated!")?;
    }
    Ok(())
}
