use std::io::Write;

use kanal::AsyncReceiver;
use tehthu_core::types::AppEvent;
use tokio_util::sync::CancellationToken;

pub const PROMPT: &str = "> ";

/// How events are turned into terminal text
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputStyle {
    /// Print a prompt after each answer (stdin is a terminal)
    pub prompt: bool,
}

/// Render one event; `None` for events that print nothing
pub fn render(event: &AppEvent) -> Option<(Stream, String)> {
    match event {
        AppEvent::ShowTranslation(t) => Some((Stream::Out, t.output.clone())),
        AppEvent::DictionaryLoaded(info) => Some((
            Stream::Out,
            format!(
                "Loaded {} ({} / {}, {} mappings)",
                info.path.display(),
                info.left,
                info.right,
                info.mappings
            ),
        )),
        AppEvent::ShowMessage(message) => Some((Stream::Out, message.clone())),
        AppEvent::LogLine(line) => Some((Stream::Err, line.clone())),
        AppEvent::Error(message) => Some((Stream::Err, format!("error: {message}"))),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Out,
    Err,
}

pub async fn output_loop(
    output_rx: AsyncReceiver<AppEvent>,
    style: OutputStyle,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if style.prompt {
        show_prompt()?;
    }

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = output_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        if event == AppEvent::Quit {
            break;
        }

        let answers_input = !matches!(event, AppEvent::LogLine(_));
        if let Some((stream, text)) = render(&event) {
            match stream {
                Stream::Out => println!("{text}"),
                Stream::Err => eprintln!("{text}"),
            }
        }
        if style.prompt && answers_input {
            show_prompt()?;
        }
    }

    Ok(())
}

fn show_prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(PROMPT.as_bytes())?;
    stdout.flush()
}
