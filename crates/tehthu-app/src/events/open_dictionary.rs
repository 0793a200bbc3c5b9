use std::path::PathBuf;

use kanal::AsyncSender;
use tehthu_core::types::{AppEvent, DictionaryInfo};
use tehthu_translator::Translator;

use crate::state::AppState;

/// Load `path`, replacing whatever dictionary was active.
///
/// On failure nothing stays loaded, so sentences are refused until a
/// dictionary parses.
pub async fn handle_open_dictionary(
    state: &AppState,
    path: PathBuf,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut guard = state.translator.clone().write_owned().await;
    let config = state.config.clone();
    let log = state.log.clone();
    let target = path.clone();

    // parsing blocks whenever the diagnostics log is full
    let loaded = tokio::task::spawn_blocking(move || {
        let loaded = match guard.take() {
            Some(mut translator) => translator.set_file(&target).map(|_| translator),
            None => Translator::load(&target, &config, log),
        };
        loaded.map(|translator| {
            let info = dictionary_info(&translator);
            *guard = Some(translator);
            info
        })
    })
    .await?;

    let event = match loaded {
        Ok(info) => {
            if let Err(e) = state.session.remember(&path) {
                tracing::warn!("Could not save session: {e:#}");
            }
            AppEvent::DictionaryLoaded(info)
        }
        Err(e) => {
            tracing::error!("Failed to open {}: {e}", path.display());
            AppEvent::Error(format!("{e}; no dictionary loaded"))
        }
    };

    output_tx.send(event).await?;
    Ok(())
}

pub fn dictionary_info(translator: &Translator) -> DictionaryInfo {
    let names = translator.names();
    DictionaryInfo {
        path: translator.store().path().to_path_buf(),
        left: names.left.clone(),
        right: names.right.clone(),
        mappings: translator.store().last_report().mappings,
    }
}
