use clap::Parser;
use pdfmaker::{MakerConfig, MakerError, PdfMaker};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Render marked-up text into a PDF, optionally over a template document.
#[derive(Parser, Debug)]
#[command(name = "pdfmaker", version, about)]
struct Cli {
    /// Text file with the markup to render, or `-` for stdin.
    input: PathBuf,

    /// Where to write the PDF.
    output: PathBuf,

    /// PDF whose pages are drawn behind the generated ones.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// JSON layout settings (page size, margins, fonts).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Body font size in points.
    #[arg(long)]
    default_font_size: Option<f32>,

    /// Font size inside <SMALL> in points.
    #[arg(long)]
    small_font_size: Option<f32>,
}

fn read_input(input: &Path) -> io::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input)
    }
}

fn run(cli: Cli) -> Result<bool, MakerError> {
    let text = read_input(&cli.input)?;
    let config = match &cli.config {
        Some(path) => MakerConfig::from_json_file(path)?,
        None => MakerConfig::default(),
    };

    let mut maker = PdfMaker::new(text, &cli.output, cli.template.as_deref())?.with_config(config);
    if let Some(size) = cli.default_font_size {
        maker = maker.with_default_font_size(size);
    }
    if let Some(size) = cli.small_font_size {
        maker = maker.with_small_font_size(size);
    }

    let status = maker.create()?;
    for message in status.messages() {
        eprintln!("{}", message);
    }
    Ok(status.is_ok())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
