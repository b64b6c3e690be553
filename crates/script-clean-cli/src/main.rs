//! Command-line boundary: read one script document, print it cleaned.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use script_clean::{
    clean_block, decode_reply, fallback_document, generation_payload, shape, ScriptRequest,
    ShapedPayload,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "script-clean",
    version,
    about = "Clean markdown and list artifacts from generated video scripts"
)]
struct Cli {
    /// JSON document to clean (reads standard input when omitted)
    input: Option<PathBuf>,

    /// Treat the input as a raw model reply (JSON, optionally fenced)
    #[arg(long)]
    reply: bool,

    /// Topic for the fallback document when a reply cannot be decoded
    #[arg(long, requires = "reply")]
    topic: Option<String>,

    /// Platform for the fallback document
    #[arg(long, default_value = "YouTube")]
    platform: String,

    /// Tone for the fallback document
    #[arg(long, default_value = "Casual")]
    tone: String,

    /// Length for the fallback document
    #[arg(long, default_value = "Short (2-3 min)")]
    length: String,

    /// Print single-line JSON instead of indented output
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn fallback_request(&self) -> Option<ScriptRequest> {
        self.topic.as_ref().map(|topic| ScriptRequest {
            topic: topic.clone(),
            platform: self.platform.clone(),
            tone: self.tone.clone(),
            length: self.length.clone(),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let raw = read_input(cli.input.as_deref(), io::stdin().lock())?;
    let shaped = process(&cli, &raw)?;
    let rendered = render(&shaped, cli.compact)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write output")?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

// Without a path the document comes from `stdin`.
fn read_input(path: Option<&Path>, mut stdin: impl Read) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read standard input")?;
            Ok(buf)
        }
    }
}

fn process(cli: &Cli, raw: &str) -> Result<ShapedPayload> {
    if !cli.reply {
        let payload: Value = serde_json::from_str(raw).context("input is not valid JSON")?;
        return Ok(shape(&payload));
    }

    match decode_reply(raw) {
        Ok(script) => Ok(shape(&generation_payload(script))),
        Err(err) => {
            let Some(request) = cli.fallback_request() else {
                return Err(err).context("model reply could not be decoded");
            };
            tracing::warn!(error = %err, topic = %request.topic, "using fallback document");
            let doc = fallback_document(&request);
            Ok(doc.map_text(|text| clean_block(Some(text))).into())
        }
    }
}

fn render(shaped: &ShapedPayload, compact: bool) -> Result<String> {
    let rendered = if compact {
        shaped.to_json()
    } else {
        shaped.to_pretty_json()
    };
    rendered.context("failed to serialize cleaned document")
}
