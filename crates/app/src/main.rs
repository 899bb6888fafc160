use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use services::{AssistantService, Clock, TextbookService};
use storage::{BundledCurriculum, CurriculumSource, JsonFileCurriculum};
use textbook_core::model::TextbookSettings;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;
mod shell;

use command::{Command, CommandError};
use shell::{Flow, Shell};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidContentPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidContentPath { raw } => write!(f, "invalid --content value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--content <file.json>] [--seed <u64>] [--verbose]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --content  the bundled textbook");
    eprintln!("  --seed     random practice sets");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TEXTBOOK_CONTENT, RUST_LOG");
    eprintln!("  TEXTBOOK_AI_API_KEY, TEXTBOOK_AI_BASE_URL, TEXTBOOK_AI_MODEL");
}

#[derive(Debug, Default)]
struct Args {
    content: Option<PathBuf>,
    seed: Option<u64>,
    verbose: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            content: std::env::var("TEXTBOOK_CONTENT")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidContentPath { raw: value });
                    }
                    parsed.content = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(args.verbose);

    let source: Box<dyn CurriculumSource> = match &args.content {
        Some(path) => Box::new(JsonFileCurriculum::new(path.clone())),
        None => Box::new(BundledCurriculum::new()),
    };
    let assistant = AssistantService::from_env();
    if !assistant.enabled() {
        info!("tutor disabled: TEXTBOOK_AI_API_KEY is not set");
    }

    let service = TextbookService::load(
        source.as_ref(),
        TextbookSettings::default(),
        Clock::default(),
        assistant,
    )
    .await?;

    let mut shell = Shell::new(service, args.seed);
    let mut stdout = std::io::stdout();
    shell.welcome(&mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(stdout)?;
            break;
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };
        if shell.execute(command, &mut stdout).await? == Flow::Quit {
            break;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Binary glue: print once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
