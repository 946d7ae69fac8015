//! Rollex CLI - replay a scripted UV brush session against a document.
//!
//! Usage: rollex --document <DOC> --script <SCRIPT> [--settings <FILE>] [--output <DOC>]

use std::path::PathBuf;

use clap::Parser;

use rollex::app::replay::{run_replay, ReplayError, ReplayScript};
use rollex::scene::serialization::{load_document_from_file, save_document_to_file};
use rollex::JsonSettings;

#[derive(Parser)]
#[command(name = "rollex")]
#[command(author, version, about = "Rolling-expand UV brush replay", long_about = None)]
struct Cli {
    /// Input document (JSON)
    #[arg(short, long)]
    document: PathBuf,

    /// Replay script (JSON)
    #[arg(short, long)]
    script: PathBuf,

    /// Host settings (JSON); defaults apply when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the edited document here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let mut doc = load_document_from_file(&cli.document)?;
    log::info!(
        "Loaded {} with {} objects",
        cli.document.display(),
        doc.objects().len()
    );

    let settings = match &cli.settings {
        Some(path) => JsonSettings::load_from_file(path)?,
        None => JsonSettings::new(),
    };
    let script = ReplayScript::load_from_file(&cli.script)?;
    log::info!("Replaying {} steps", script.steps.len());

    let summary = run_replay(&mut doc, &settings, &script);
    log::info!(
        "{} events ({} consumed), {} draws, {} undo checkpoints",
        summary.events,
        summary.consumed,
        summary.draws,
        summary.undo_checkpoints
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(output) = &cli.output {
        save_document_to_file(&doc, output)?;
        log::info!("Saved {}", output.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
