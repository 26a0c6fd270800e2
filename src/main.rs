//! hilite - syntax highlighting for Python, JavaScript, HTML and CSS
//!
//! Highlights a file (or stdin) to the terminal.

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use hilite::config::Config;
use hilite::error::{Error, Result};
use hilite::terminal::{RenderOptions, Terminal};
use hilite::{Language, Session, TagLayout};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    file: Option<PathBuf>,
    language: Option<Language>,
    line_numbers: bool,
    tokens: bool,
    no_color: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Highlight(Options),
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HILITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args)? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Highlight(options) => options,
    };

    let config = Config::load();
    debug!(?config, "loaded config");

    let contents = match &options.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut session = Session::with_language(TagLayout::new(), config.default_language);
    match &options.file {
        Some(path) => session.open(path, contents),
        None => session.on_text_changed(contents),
    }
    if let Some(language) = options.language {
        session.on_language_changed(language);
    }

    let render_options = RenderOptions {
        line_numbers: options.line_numbers || config.line_numbers,
        tab_width: config.tab_width,
        color: config.color && !options.no_color,
    };
    let mut terminal = Terminal::new(io::stdout().lock(), render_options);

    if options.tokens {
        let text = session.text();
        terminal.dump_tokens(text, session.language().tokenize(text))
    } else {
        terminal.render(session.text(), session.surface())
    }
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--language" | "-l" => {
                let id = args
                    .next()
                    .ok_or_else(|| Error::Message(format!("{} needs a language", arg)))?;
                options.language = Some(id.parse()?);
            }
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--tokens" | "-t" => options.tokens = true,
            "--no-color" => options.no_color = true,
            "-" => options.file = None,
            flag if flag.starts_with('-') => {
                return Err(Error::Message(format!("Unknown option: {}", flag)));
            }
            file => {
                if options.file.is_some() {
                    return Err(Error::Message("Only one file can be highlighted".to_string()));
                }
                options.file = Some(PathBuf::from(file));
            }
        }
    }

    Ok(Command::Highlight(options))
}

fn print_usage() {
    println!("hilite {} - syntax highlighting in the terminal", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: hilite [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE, or stdin when FILE is missing or '-'.");
    println!();
    println!("Options:");
    println!("  -l, --language ID   Highlight as python, javascript, html or css");
    println!("  -n, --line-numbers  Show line numbers");
    println!("  -t, --tokens        List tokens instead of coloring");
    println!("      --no-color      Print without colors");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!();
    println!("Languages:");
    for language in Language::ALL {
        println!("  {:<12}{} (.{})", language.id(), language.display_name(), language.extensions().join(", ."));
    }
    println!();
    println!("Settings are read from $HILITE_CONFIG or ~/.hilite.toml");
}

fn print_version() {
    println!("hilite {}", env!("CARGO_PKG_VERSION"));
}
