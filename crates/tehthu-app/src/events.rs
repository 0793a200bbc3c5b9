use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tehthu_core::types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod open_dictionary;
pub mod reload;
pub mod text_input;

use open_dictionary::handle_open_dictionary;
use reload::handle_reload;
use text_input::handle_text_input;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("Event loop started");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = input_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        if !handle_event(&state, event, &output_tx).await? {
            break;
        }
    }

    tracing::debug!("Event loop stopped");
    Ok(())
}

/// Returns `false` once the user asked to quit
pub async fn handle_event(
    state: &AppState,
    event: AppEvent,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::TextInput(text) => {
            handle_text_input(state, text, output_tx).await?;
        }
        AppEvent::OpenDictionary(path) => {
            handle_open_dictionary(state, path, output_tx).await?;
        }
        AppEvent::Reload => {
            handle_reload(state, output_tx).await?;
        }
        AppEvent::SwapDirection => {
            let direction = state.swap_direction();
            let message = match state.translator.read().await.as_ref() {
                Some(translator) => format!("Now translating {}", translator.names().label(direction)),
                None => format!("Now translating {direction}"),
            };
            output_tx.send(AppEvent::ShowMessage(message)).await?;
        }
        AppEvent::ShowNames => {
            let message = match state.translator.read().await.as_ref() {
                Some(translator) => {
                    let names = translator.names();
                    format!(
                        "Left: {}, right: {} (translating {})",
                        names.left,
                        names.right,
                        names.label(state.direction())
                    )
                }
                None => "No dictionary loaded".to_string(),
            };
            output_tx.send(AppEvent::ShowMessage(message)).await?;
        }
        AppEvent::Quit => {
            tracing::info!("Quit requested");
            output_tx.send(AppEvent::Quit).await?;
            return Ok(false);
        }
        // typing mistakes from the input side go straight to the user
        AppEvent::Error(message) => {
            output_tx.send(AppEvent::Error(message)).await?;
        }
        AppEvent::ShowTranslation(_)
        | AppEvent::DictionaryLoaded(_)
        | AppEvent::ShowMessage(_)
        | AppEvent::LogLine(_) => {
            // output-only events
        }
    }

    Ok(true)
}
