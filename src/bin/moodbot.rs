//! CLI binary for moodbot.

use clap::Parser;
use moodbot::logging::{self, LogTarget};
use moodbot::responses::{Picker, RandomPicker, ResponseSelector, ResponseTable};
use moodbot::sentiment::build_classifier;
use moodbot::translate::build_translator;
use moodbot::{ChatConfig, ChatEngine, Console, HistoryStore, SessionContext, app_dirs};
use std::path::PathBuf;
use tracing::info;

/// moodbot: a chat companion that reads the mood of the conversation.
#[derive(Parser)]
#[command(name = "moodbot", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// History file to load and save (overrides config).
    #[arg(long)]
    history: Option<PathBuf>,

    /// Do not translate input before classifying it.
    #[arg(long)]
    no_translate: bool,

    /// Seed for reply selection, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to stderr instead of the log directory.
    #[arg(long)]
    log_stderr: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logs_dir = app_dirs::logs_dir();
    let target = if cli.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::Directory(&logs_dir)
    };
    let _log_guard = logging::init(target)?;

    let mut config = match cli.config {
        Some(ref path) => ChatConfig::from_file(path)?,
        None => ChatConfig::load_or_default()?,
    };
    if let Some(path) = cli.history {
        config.history.path = path;
    }
    if cli.no_translate {
        config.translation.enabled = false;
    }

    // Fail before the first prompt if any collaborator is misconfigured.
    let table = match config.responses.path {
        Some(ref path) => ResponseTable::from_file(path)?,
        None => ResponseTable::builtin(),
    };
    table.validate()?;
    let classifier = build_classifier(&config.classifier)?;
    let translator = build_translator(&config.translation);
    let picker: Box<dyn Picker> = match cli.seed {
        Some(seed) => Box::new(RandomPicker::seeded(seed)),
        None => Box::new(RandomPicker::from_entropy()),
    };
    let mut engine = ChatEngine::new(classifier, translator, ResponseSelector::new(table, picker));

    let store = HistoryStore::new(config.history.path.clone());
    let mut ctx = SessionContext::restore(&store);
    info!(
        path = %store.path().display(),
        exchanges = ctx.history.len(),
        translation = config.translation.enabled,
        "session starting"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config.session);
    let outcome = console.run(&mut engine, &mut ctx, &store)?;

    info!(?outcome, "session ended");
    Ok(())
}
