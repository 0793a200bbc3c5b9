use kanal::AsyncSender;
use tehthu_core::types::AppEvent;

use super::open_dictionary::dictionary_info;
use crate::state::AppState;

pub async fn handle_reload(state: &AppState, output_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let mut guard = state.translator.clone().write_owned().await;
    let Some(mut translator) = guard.take() else {
        drop(guard);
        output_tx
            .send(AppEvent::Error("No dictionary loaded; use :open PATH".to_string()))
            .await?;
        return Ok(());
    };

    let reloaded = tokio::task::spawn_blocking(move || match translator.reparse() {
        Ok(report) => {
            tracing::info!("Reloaded {} mappings", report.mappings);
            let info = dictionary_info(&translator);
            *guard = Some(translator);
            Ok(info)
        }
        Err(e) => {
            tracing::error!("Reload of {} failed: {e}", translator.store().path().display());
            Err(e)
        }
    })
    .await?;

    let event = match reloaded {
        Ok(info) => AppEvent::DictionaryLoaded(info),
        Err(e) => AppEvent::Error(format!("{e}; no dictionary loaded")),
    };

    output_tx.send(event).await?;
    Ok(())
}
