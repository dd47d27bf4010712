//! labscore — command-line front end for the scoring pipeline.
//!
//! Loads the configured model once, then answers a single score, health or
//! info request and prints the JSON reply.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rand::Rng;
use serde_json::Value;
use tracing::info;

use labscore::{Config, ModelState, PredictionItem, Reply, RequestHandler, ResponseFormatter};

/// labscore CLI
#[derive(Parser)]
#[command(name = "labscore")]
#[command(version = labscore::PKG_VERSION)]
#[command(about = "Minimal model-serving request pipeline")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the model name.
    #[arg(long, env = "MODEL_NAME")]
    model_name: Option<String>,

    /// Override the model version.
    #[arg(long, env = "MODEL_VERSION")]
    model_version: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a JSON request body
    Score {
        /// File containing the body (or omit to read from stdin)
        file: Option<PathBuf>,
        /// Pretty-print the reply
        #[arg(short, long)]
        pretty: bool,
    },

    /// Report liveness and model identity
    Health,

    /// Report model metadata
    Info,

    /// Score randomly generated items
    Demo {
        /// Number of items to generate
        #[arg(short = 'n', long, default_value_t = 2)]
        items: usize,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let name = args.model_name.unwrap_or_else(|| config.model.name.clone());
    let version = args
        .model_version
        .unwrap_or_else(|| config.model.version.clone());

    let mut model = ModelState::new(config.model.identity(name, version));
    model.reload()?;
    info!(
        version = labscore::version_string(),
        model = %model.identity().name,
        "model ready"
    );

    let handler = RequestHandler::with_formatter(Arc::new(model), ResponseFormatter::new(config.lab));

    let reply = match args.command {
        Command::Score { file, pretty } => {
            let body = read_body(file)?;
            let reply = handler.handle(&body);
            print_reply(&reply, pretty)?;
            reply
        }
        Command::Health => {
            let reply = handler.health();
            print_reply(&reply, true)?;
            reply
        }
        Command::Info => {
            let reply = handler.info();
            print_reply(&reply, true)?;
            reply
        }
        Command::Demo { items } => {
            let body = demo_body(handler.predictor(), items)?;
            let reply = handler.handle(&body);
            print_reply(&reply, true)?;
            reply
        }
    };

    Ok(if reply.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read the request body from a file, or from stdin when piped.
fn read_body(file: Option<PathBuf>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(path) = file {
        return fs::read(&path).map_err(|e| format!("failed to read {path:?}: {e}").into());
    }
    if io::stdin().is_terminal() {
        return Err("score: no input provided (pass a file or pipe JSON via stdin)".into());
    }
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Build a `{"data": [...]}` body of uniformly random feature values.
fn demo_body(model: &ModelState, count: usize) -> Result<Vec<u8>, serde_json::Error> {
    let mut rng = rand::thread_rng();
    let items: Vec<PredictionItem> = (0..count)
        .map(|_| {
            PredictionItem::from_features(
                model
                    .schema()
                    .names()
                    .iter()
                    .map(|name| (name.clone(), rng.gen_range(0.0..1.0))),
            )
        })
        .collect();
    serde_json::to_vec(&serde_json::json!({ "data": items }))
}

fn print_reply(reply: &Reply, pretty: bool) -> Result<(), serde_json::Error> {
    if pretty {
        let value: Value = serde_json::from_slice(&reply.body)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", String::from_utf8_lossy(&reply.body));
    }
    Ok(())
}
