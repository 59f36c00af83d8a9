use std::ffi::OsStr;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Error, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dirmatch")]
#[command(version)]
#[command(about = "List the entries of a directory whose names match a glob pattern")]
#[command(long_about = None)]
struct CliArguments {
    /// Directory whose immediate entries are listed
    #[arg(value_parser = clap::value_parser!(PathBuf), allow_hyphen_values = true)]
    directory: PathBuf,

    /// Shell glob (`*`, `?`, `[...]`); backslash matches itself
    #[arg(allow_hyphen_values = true)]
    pattern: String,
}

fn run(args: CliArguments) -> Result<(), Error> {
    debug!("Arguments parsed: {:?}", args);

    let matches = dirmatch::scan(&args.directory, &args.pattern)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for item in matches {
        match item {
            // Literal concatenation, `dir/` gives `dir//name`.
            Ok(entry) => {
                write_os(&mut out, args.directory.as_os_str())?;
                out.write_all(b"/")?;
                write_os(&mut out, &entry.name)?;
                out.write_all(b"\n")?;
            }
            Err(e) if e.is_recoverable() => warn!("{:#}", Error::from(e)),
            Err(e) => return Err(e.into()),
        }
    }

    out.flush()?;
    Ok(())
}

/// Names are written byte for byte, whatever their encoding.
#[cfg(unix)]
fn write_os(out: &mut impl Write, s: &OsStr) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(s.as_bytes())
}

#[cfg(not(unix))]
fn write_os(out: &mut impl Write, s: &OsStr) -> io::Result<()> {
    out.write_all(s.to_string_lossy().as_bytes())
}

fn main() -> ExitCode {
    // Logs go to stderr, stdout carries only matches
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {e}");
    }

    // Usage errors exit with 1, not clap's default 2
    let args = match CliArguments::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dirmatch: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
