use kanal::AsyncSender;
use tehthu_core::types::{AppEvent, Translation};

use crate::state::AppState;

pub async fn handle_text_input(
    state: &AppState,
    text: String,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let guard = state.translator.clone().read_owned().await;
    let direction = state.direction();
    let sentence = text.clone();

    // unknown words log notes, and logging blocks while the log is full
    let translated = tokio::task::spawn_blocking(move || {
        guard.as_ref().map(|translator| {
            let output = translator.translate_sentence(&sentence, direction);
            (output, translator.names().label(direction))
        })
    })
    .await?;

    let Some((output, label)) = translated else {
        output_tx
            .send(AppEvent::Error(
                "No dictionary loaded; use :open PATH".to_string(),
            ))
            .await?;
        return Ok(());
    };
    tracing::debug!("Translated {} words into {} chars", text.split_whitespace().count(), output.len());

    output_tx
        .send(AppEvent::ShowTranslation(Translation {
            input: text,
            output,
            label,
        }))
        .await?;

    Ok(())
}
