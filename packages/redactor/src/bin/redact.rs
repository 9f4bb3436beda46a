// Command-line entry point: redact a file or stdin
//
// Options come from the environment (and `.env`); flags override them.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use redactor::{RedactionError, Redactor, RedactorOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "redact", about = "Redact private or sensitive information from text")]
struct Args {
    /// File to read (defaults to stdin)
    input: Option<PathBuf>,

    /// Replacement token
    #[arg(short, long, default_value = "<<<REDACTED>>>")]
    to: String,

    /// Model to use (overrides OPENAI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// API base URL (overrides OPENAI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Log request and response bodies
    #[arg(short, long)]
    verbose: bool,

    /// Print detected strings, one per line, instead of redacting
    #[arg(long)]
    detect_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,redactor=debug,openai_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut options = RedactorOptions::from_env().context("Failed to load configuration")?;
    if let Some(model) = args.model {
        options = options.with_model(model);
    }
    if let Some(url) = args.base_url {
        options = options.with_base_url(url);
    }
    if args.verbose {
        options = options.with_verbose(true);
    }

    let text = read_input(args.input.as_ref())?;

    let redactor = Redactor::new(options)
        .await
        .context("Failed to create redactor")?;

    if args.detect_only {
        let detected = redactor.detect(&text).await.context("Detection failed")?;
        for d in detected {
            println!("{}", d);
        }
        return Ok(());
    }

    match redactor.redact(&text, &args.to).await {
        Ok(redacted) => print!("{}", redacted),
        Err(RedactionError::NothingToRedact) => {
            tracing::warn!("No private or sensitive information detected");
            print!("{}", text);
        }
        Err(e) => return Err(e).context("Redaction failed"),
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
