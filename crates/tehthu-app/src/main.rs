use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tehthu_config::Config;
use tehthu_core::{DiagnosticsLog, Direction};
use tehthu_translator::Translator;
use tokio::signal;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod log_pump;
pub mod session;
pub mod settings;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::session::Session;
use self::state::AppState;
use self::ui::OutputStyle;

/// Word-for-word translator between two languages that share a grammar
#[derive(Parser, Debug)]
#[command(name = "tehthu", version)]
struct Cli {
    /// Dictionary file: `.teh` plain text or an `.ods`/`.xlsx`/`.xls` workbook
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Translation direction
    #[arg(long, value_parser = parse_direction, default_value = "ltr")]
    direction: Direction,

    /// Translate right-to-left (flips --direction)
    #[arg(short, long)]
    reverse: bool,

    /// Field delimiter for plain-text dictionaries
    #[arg(long, value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Don't read or update the remembered dictionary
    #[arg(long)]
    no_session: bool,

    /// Sentence to translate; without one an interactive session starts
    sentence: Vec<String>,
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    Direction::from_str(value).ok_or_else(|| format!("expected `ltr` or `rtl`, got `{value}'"))
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    match tehthu_config::single_char(value) {
        Some('\n' | '\r') | None => Err(format!("expected a single character, got `{value}'")),
        Some(c) => Ok(c),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = settings::load_config(cli.config.as_deref())?;
    if let Some(delimiter) = cli.delimiter {
        config.dictionary.delimiter = delimiter;
    }

    let session = if cli.no_session {
        Session::disabled()
    } else {
        Session::user()
    };
    let direction = if cli.reverse {
        cli.direction.reversed()
    } else {
        cli.direction
    };
    let dictionary = settings::choose_dictionary(cli.dictionary.clone(), &config, &session);

    if cli.sentence.is_empty() {
        run_interactive(config, direction, session, dictionary).await
    } else {
        let sentence = cli.sentence.join(" ");
        let output = translate_once(&sentence, dictionary, &config, direction, &session)?;
        println!("{output}");
        Ok(())
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the dictionary, translate one sentence and return the result
pub fn translate_once(
    sentence: &str,
    dictionary: Option<PathBuf>,
    config: &Config,
    direction: Direction,
    session: &Session,
) -> anyhow::Result<String> {
    let path = dictionary
        .context("No dictionary given; pass --dictionary PATH or set TEHTHU_DICTIONARY")?;

    // nobody drains the log here, so diagnostics only surface through tracing
    let log = if config.log.echo {
        DiagnosticsLog::with_capacity(config.log.capacity)
    } else {
        DiagnosticsLog::silent(config.log.capacity)
    };

    let translator = Translator::load(&path, config, log)
        .with_context(|| format!("loading dictionary {}", path.display()))?;
    if let Err(e) = session.remember(&path) {
        tracing::warn!("Could not save session: {e:#}");
    }

    Ok(translator.translate_sentence(sentence, direction))
}

async fn run_interactive(
    config: Config,
    direction: Direction,
    session: Session,
    dictionary: Option<PathBuf>,
) -> anyhow::Result<()> {
    // the log pump shows every diagnostic, so they aren't echoed to tracing too
    let log = DiagnosticsLog::silent(config.log.capacity);
    let state = Arc::new(AppState::new(config, direction, log, session));
    let controller = AppController::new(state);

    match dictionary {
        Some(path) => controller.open_on_start(path).await?,
        None => tracing::info!("No dictionary yet; load one with :open PATH"),
    }

    let style = OutputStyle {
        prompt: atty::is(atty::Stream::Stdin),
    };
    let mut tasks = controller.spawn_tasks(BufReader::new(std::io::stdin()), style)?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            report_task(result);
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        report_task(result);
    }

    Ok(())
}

fn report_task(result: Result<anyhow::Result<()>, JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("task exited: {e:#}"),
        Err(e) => tracing::error!("task panicked: {e}"),
    }
}
