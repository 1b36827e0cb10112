//! lingo CLI - translate messages, inspect locale catalogs and run the demo server.

mod commands;
mod locale;
mod serve;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "lingo")]
#[command(author, version, about = "Locale catalogs, language matching and translation")]
#[command(
    long_about = "lingo is a CLI for internationalization and localization.

It provides two primary functions:
  - A web server for translating messages in a web UI
  - Tools for inspecting and checking locale files"
)]
struct Cli {
    /// Language to use (BCP-47 tag, e.g. "fr" or "fr-CA")
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Config file path (default: .lingo.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load *.json message files from this directory instead of the bundled set
    #[arg(long, global = true)]
    locales_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a message key
    Translate {
        /// Message key, e.g. "app.ui.search"
        key: String,

        /// Template argument as NAME=VALUE (repeatable)
        #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_template_arg)]
        args: Vec<(String, String)>,
    },

    /// List available languages
    Languages {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the language detected from the environment
    Detect,

    /// Check a directory of message files for missing and extra keys
    Check {
        /// Directory to check (default: --locales-dir or locales_dir from config)
        dir: Option<PathBuf>,
    },

    /// Start the demo web server
    Serve {
        /// Address to listen on (default: 127.0.0.1:8080)
        #[arg(long)]
        addr: Option<String>,

        /// Directory with the static web UI
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn parse_template_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = locale::load_config(cli.config.as_deref())?;

    let init = || locale::init(cli.locale.as_deref(), cli.locales_dir.as_deref(), &config);

    match cli.command {
        None => commands::greet(&init()?),
        Some(Commands::Translate { key, args }) => commands::translate(&init()?, &key, &args),
        Some(Commands::Languages { format }) => commands::languages(&init()?, format),
        Some(Commands::Detect) => commands::detect(&init()?),
        Some(Commands::Check { dir }) => {
            // check loads its own catalog and reports load errors itself
            let Some(dir) = dir.or_else(|| locale::locales_dir(cli.locales_dir.as_deref(), &config))
            else {
                bail!("no directory to check: pass one or set --locales-dir");
            };
            commands::check(&dir)
        }
        Some(Commands::Serve { addr, static_dir }) => {
            let translator = init()?;
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            let static_dir = static_dir.unwrap_or_else(|| config.server.static_dir.clone());
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            runtime.block_on(serve::run(translator, &addr, &static_dir))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
