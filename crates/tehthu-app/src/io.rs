use std::io::BufRead;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use kanal::AsyncSender;
use tehthu_core::types::AppEvent;
use tokio_util::sync::CancellationToken;

/// What one line typed at the prompt asks for
pub fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Some(AppEvent::TextInput(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    Some(match name {
        "open" | "o" if !arg.is_empty() => AppEvent::OpenDictionary(PathBuf::from(arg)),
        "open" | "o" => AppEvent::Error("usage: :open PATH".to_string()),
        "reload" | "r" => AppEvent::Reload,
        "swap" | "s" => AppEvent::SwapDirection,
        "names" | "n" => AppEvent::ShowNames,
        "quit" | "q" | "exit" => AppEvent::Quit,
        other => AppEvent::Error(format!(
            "unknown command `:{other}' (try :open, :reload, :swap, :names, :quit)"
        )),
    })
}

/// Read `input` line by line on a dedicated thread.
///
/// Stdin reads can't be interrupted, so this runs outside the runtime and
/// simply stops forwarding once `cancel` fires. End of input becomes `Quit`.
pub fn spawn_input_reader<R>(
    input: R,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    let tx = event_tx.to_sync();

    thread::Builder::new()
        .name("tehthu-input".into())
        .spawn(move || {
            for line in input.lines() {
                if cancel.is_cancelled() {
                    return;
                }

                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("Failed to read input: {e}");
                        break;
                    }
                };

                let Some(event) = parse_line(&line) else {
                    continue;
                };
                let quit = event == AppEvent::Quit;
                if tx.send(event).is_err() || quit {
                    return;
                }
            }

            tracing::debug!("Input closed");
            let _ = tx.send(AppEvent::Quit);
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line(":reload"), Some(AppEvent::Reload));
        assert_eq!(parse_line(":swap"), Some(AppEvent::SwapDirection));
        assert_eq!(parse_line(":names"), Some(AppEvent::ShowNames));
        assert_eq!(parse_line(" :q "), Some(AppEvent::Quit));
        assert_eq!(
            parse_line(":open  /tmp/my words.teh "),
            Some(AppEvent::OpenDictionary(PathBuf::from("/tmp/my words.teh")))
        );
        assert!(matches!(parse_line(":open"), Some(AppEvent::Error(_))));
        assert!(matches!(parse_line(":frobnicate"), Some(AppEvent::Error(e)) if e.contains(":frobnicate")));
    }

    #[test]
    fn test_other_lines_are_sentences() {
        assert_eq!(
            parse_line("  Hello world  "),
            Some(AppEvent::TextInput("Hello world".to_string()))
        );
    }
}
