//! textbook-qa - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use textbook_qa::{
    cli::{Args, Commands, Config, Verbosity},
    events::{drain, NotificationBus},
    ingest::load_text_file,
    rag::QaPipeline,
    repl::{display::format_answer, ReplSession},
    session::QaSession,
};

const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    if let Some(latency_ms) = args.latency_ms {
        config.session.simulated_latency_ms = latency_ms;
    }

    let verbosity = effective_verbosity(&args, &config);
    init_tracing(verbosity);

    if !config.repl.color_output {
        colored::control::set_override(false);
    }

    match args.command {
        Some(Commands::Start { ref file }) => run_repl(config, verbosity, file.as_deref()).await?,
        None => run_repl(config, verbosity, None).await?,
        Some(Commands::Ask {
            ref file,
            json,
            ref question,
        }) => ask_once(&config, file, question, json).await?,
        Some(Commands::Config) => show_config(&args, &config)?,
    }

    Ok(())
}

/// Command-line flags win over the configured default
fn effective_verbosity(args: &Args, config: &Config) -> Verbosity {
    if args.quiet || args.verbose > 0 {
        return args.verbosity();
    }
    Verbosity::from_config(&config.repl.default_verbosity).unwrap_or(Verbosity::Normal)
}

/// Log to stderr; `RUST_LOG` overrides the verbosity default
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_repl(config: Config, verbosity: Verbosity, file: Option<&Path>) -> Result<()> {
    let mut repl_session =
        ReplSession::new(config, verbosity).context("Failed to start interactive session")?;

    repl_session.show_welcome(VERSION);

    if let Some(path) = file {
        repl_session.load_file(path).await;
    }

    repl_session.run().await
}

/// Answer one question against a file and exit
async fn ask_once(config: &Config, file: &Path, question: &str, json: bool) -> Result<()> {
    let loaded = load_text_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let (bus, mut notices) = NotificationBus::new();
    let mut session = QaSession::new(config.session.clone())
        .with_engine(Arc::new(QaPipeline::with_config(config.pipeline_config())))
        .with_notifier(Arc::new(bus));

    session
        .submit_corpus(&loaded.content)
        .await
        .context("Failed to load textbook content")?;

    let Some(record) = session.submit_question(question).await.cloned() else {
        let reason = drain(&mut notices)
            .into_iter()
            .last()
            .map(|notice| format!("{}: {}", notice.title, notice.description))
            .unwrap_or_else(|| "no answer produced".to_string());
        anyhow::bail!(reason);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", format_answer(&record, config.repl.show_passages));
    }

    Ok(())
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    println!("{}", "textbook-qa Configuration".bold().cyan());
    println!("{}", "=".repeat(60).cyan());

    let source = args
        .config
        .clone()
        .or_else(|| Config::default_path().filter(|path| path.exists()));
    match source {
        Some(path) => println!("# Loaded from {}\n", path.display()),
        None => println!("# Built-in defaults\n"),
    }

    print!("{}", config.to_toml().context("Failed to render configuration")?);
    Ok(())
}
