use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use hi::{grammar, Config, DEFAULT_LANGUAGE};

#[derive(Parser)]
#[command(name = "hi")]
#[command(about = "Highlight a code snippet with HTML markup")]
struct Args {
    /// Keyword set to highlight with
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// TOML file with extra languages and markup tags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tag comments are wrapped in, overriding the config
    #[arg(long)]
    comment_tag: Option<String>,

    /// List the known languages and exit
    #[arg(long)]
    list: bool,

    /// Print the highlight grammar and exit
    #[arg(long)]
    print_grammar: bool,

    /// Snippet to highlight, stdin if omitted
    file: Option<PathBuf>,
}

fn init_logging() -> Result<()> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "WARN".to_owned());
    let level =
        log::LevelFilter::from_str(&level).map_err(|_| anyhow!("invalid RUST_LOG: {}", level))?;

    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_format_custom(&[])
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Never,
    )
    .map_err(|err| anyhow!("unable to set logger: {}", err))
}

fn read_source(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(tag) = args.comment_tag {
        config.markup.comment = tag;
    }
    let registry = config.registry();

    if args.list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    if args.print_grammar {
        print!("{}", grammar::grammar()?);
        return Ok(());
    }

    let highlighter = registry
        .configure(&args.language)?
        .with_markup(config.markup);
    let source = read_source(args.file.as_ref())?;
    log::debug!(
        "highlighting {} bytes as {}",
        source.len(),
        args.language
    );

    let out = highlighter.render(&source)?;
    print!("{}", out);
    Ok(())
}
