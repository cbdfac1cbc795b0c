mod prompt;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use passify_pdf::encrypt_pdf;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "passifypdf",
    about = "Encrypt a PDF file with a password of your choice.",
    after_help = "For more information, visit: https://github.com/SUPAIDEAS/passifypdf",
    version,
    author,
    disable_version_flag = true
)]
struct Cli {
    /// Path to the input PDF file to be encrypted
    #[arg(short, long)]
    input: PathBuf,

    /// Path where the encrypted PDF file will be saved
    #[arg(short, long)]
    output: PathBuf,

    /// Password to encrypt the PDF file with
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    passwd: String,

    /// Overwrite the output file if it already exists without prompting
    #[arg(short, long)]
    force: bool,
}

/// The derived command with `-v/--version` in place of clap's `-V`.
fn command() -> clap::Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Show the version and exit"),
    )
}

fn try_parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

/// Accept only paths that name an existing regular file.
///
/// Runs after parsing so `--version` wins regardless of where it appears.
fn existing_file(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("file '{}' does not exist", path.display()));
    }
    if !path.is_file() {
        return Err(format!("'{}' is not a file", path.display()));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit());
    if let Err(message) = existing_file(&cli.input) {
        command()
            .error(
                ErrorKind::ValueValidation,
                format!("invalid value for '--input <INPUT>': {message}"),
            )
            .exit();
    }

    if cli.output.exists() && !cli.force {
        if !prompt::confirm_overwrite(&cli.output)? {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    debug!(input = %cli.input.display(), output = %cli.output.display(), "encrypting");

    match encrypt_pdf(&cli.input, &cli.output, &cli.passwd) {
        Ok(report) => {
            println!("Congratulations!");
            println!(
                "PDF file encrypted successfully and saved as '{}'",
                report.output.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
