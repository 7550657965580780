use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use dtsgen::{translate, Config};

#[derive(Parser, Debug)]
#[command(
    name = "dtsgen",
    version,
    about = "Translate TypeScript type declarations into C++ headers or proto3 schemas"
)]
struct Cli {
    /// Input declaration file, or '-' for stdin
    input: String,
    /// Output file, or '-' for stdout
    output: String,
    /// Optional TOML configuration file
    config: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        report_error(&err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let (source, source_name) = if cli.input == "-" {
        let mut src = String::new();
        io::stdin()
            .read_to_string(&mut src)
            .context("failed to read from stdin")?;
        (src, "stdin".to_string())
    } else {
        let src = fs::read_to_string(&cli.input)
            .with_context(|| format!("failed to open file '{}'", cli.input))?;
        (src, cli.input.clone())
    };

    let output = translate(&source, &source_name, &config)?;

    if cli.output == "-" {
        io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write to stdout")?;
    } else {
        fs::write(&cli.output, output)
            .with_context(|| format!("failed to write output file '{}'", cli.output))?;
    }

    Ok(())
}

fn report_error(err: &anyhow::Error) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stderr, "error: ");
    let _ = stderr.reset();
    let _ = writeln!(stderr, "{:#}", err);
}
