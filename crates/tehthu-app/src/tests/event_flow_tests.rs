use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tehthu_config::Config;
use tehthu_core::types::AppEvent;
use tehthu_core::{DiagnosticsLog, Direction};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::controller::AppController;
use crate::events::event_loop;
use crate::session::Session;
use crate::state::AppState;
use crate::ui::OutputStyle;

const DICTIONARY: &str = "[English] [Spanish]\nhello|hola\ncat|gato\n";

struct Harness {
    dir: tempfile::TempDir,
    dict: PathBuf,
    state: Arc<AppState>,
    input: AsyncSender<AppEvent>,
    output: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
    task: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("maren.teh");
        fs::write(&dict, DICTIONARY).unwrap();

        let state = Arc::new(AppState::new(
            Config::default(),
            Direction::LeftToRight,
            DiagnosticsLog::silent(100),
            Session::disabled(),
        ));
        let (input, input_rx) = kanal::bounded_async(16);
        let (output_tx, output) = kanal::bounded_async(16);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(event_loop(state.clone(), input_rx, output_tx, cancel.clone()));

        Self {
            dir,
            dict,
            state,
            input,
            output,
            cancel,
            task,
        }
    }

    async fn send(&self, event: AppEvent) {
        self.input.send(event).await.expect("send failed");
    }

    async fn next(&self) -> AppEvent {
        timeout(Duration::from_secs(2), self.output.recv())
            .await
            .expect("Timeout - no event from the event loop")
            .expect("output channel closed")
    }

    async fn open(&self) {
        self.send(AppEvent::OpenDictionary(self.dict.clone())).await;
        match self.next().await {
            AppEvent::DictionaryLoaded(info) => {
                assert_eq!(info.left, "English");
                assert_eq!(info.right, "Spanish");
                assert_eq!(info.mappings, 2);
            }
            other => panic!("Wrong event type: {other:?}"),
        }
    }

    async fn translate(&self, text: &str) -> AppEvent {
        self.send(AppEvent::TextInput(text.to_string())).await;
        self.next().await
    }
}

#[tokio::test]
async fn test_open_then_translate() {
    let h = Harness::new();
    h.open().await;

    match h.translate("Hello world").await {
        AppEvent::ShowTranslation(t) => {
            assert_eq!(t.input, "Hello world");
            assert_eq!(t.output, "Hola");
            assert_eq!(t.label, "English-to-Spanish");
        }
        other => panic!("Wrong event type: {other:?}"),
    }
}

#[tokio::test]
async fn test_swap_direction() {
    let h = Harness::new();
    h.open().await;

    h.send(AppEvent::SwapDirection).await;
    match h.next().await {
        AppEvent::ShowMessage(message) => assert!(message.contains("Spanish-to-English"), "{message}"),
        other => panic!("Wrong event type: {other:?}"),
    }
    assert_eq!(h.state.direction(), Direction::RightToLeft);

    match h.translate("Gato").await {
        AppEvent::ShowTranslation(t) => assert_eq!(t.output, "Cat"),
        other => panic!("Wrong event type: {other:?}"),
    }
}

#[tokio::test]
async fn test_sentences_refused_without_dictionary() {
    let h = Harness::new();
    match h.translate("hello").await {
        AppEvent::Error(message) => assert!(message.contains("No dictionary"), "{message}"),
        other => panic!("Wrong event type: {other:?}"),
    }

    h.send(AppEvent::ShowNames).await;
    assert_eq!(h.next().await, AppEvent::ShowMessage("No dictionary loaded".to_string()));
}

#[tokio::test]
async fn test_failed_open_disables_translation() {
    let h = Harness::new();
    h.open().await;

    h.send(AppEvent::OpenDictionary(h.dir.path().join("missing.teh"))).await;
    match h.next().await {
        AppEvent::Error(message) => assert!(message.contains("missing.teh"), "{message}"),
        other => panic!("Wrong event type: {other:?}"),
    }
    assert!(h.state.translator.read().await.is_none());

    assert!(matches!(h.translate("hello").await, AppEvent::Error(_)));
}

#[tokio::test]
async fn test_reload_picks_up_edits() {
    let h = Harness::new();
    h.open().await;

    fs::write(&h.dict, format!("{DICTIONARY}dog|perro\n")).unwrap();
    h.send(AppEvent::Reload).await;
    match h.next().await {
        AppEvent::DictionaryLoaded(info) => assert_eq!(info.mappings, 3),
        other => panic!("Wrong event type: {other:?}"),
    }

    match h.translate("DOG").await {
        AppEvent::ShowTranslation(t) => assert_eq!(t.output, "PERRO"),
        other => panic!("Wrong event type: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_reload_disables_translation() {
    let h = Harness::new();
    h.open().await;

    fs::remove_file(&h.dict).unwrap();
    h.send(AppEvent::Reload).await;
    assert!(matches!(h.next().await, AppEvent::Error(_)));
    assert!(h.state.translator.read().await.is_none());
}

#[tokio::test]
async fn test_quit_ends_event_loop() {
    let h = Harness::new();
    h.send(AppEvent::Quit).await;
    assert_eq!(h.next().await, AppEvent::Quit);

    let result = timeout(Duration::from_secs(2), h.task).await;
    assert!(matches!(result, Ok(Ok(Ok(())))), "event loop did not stop cleanly");
}

#[tokio::test]
async fn test_cancel_ends_event_loop() {
    let h = Harness::new();
    h.cancel.cancel();

    let result = timeout(Duration::from_secs(2), h.task).await;
    assert!(result.is_ok(), "Timeout - event loop ignored cancellation");
}

#[tokio::test]
async fn test_controller_runs_until_quit() {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("maren.teh");
    fs::write(&dict, DICTIONARY).unwrap();

    let state = Arc::new(AppState::new(
        Config::default(),
        Direction::LeftToRight,
        DiagnosticsLog::silent(4),
        Session::disabled(),
    ));
    let controller = AppController::new(state.clone());
    controller.open_on_start(dict).await.unwrap();

    // unknown words produce more diagnostics than the log holds
    let input = Cursor::new(b"hello\nfoo bar baz qux quux corge\n:swap\nhola\n:quit\n".to_vec());
    let tasks = controller
        .spawn_tasks(input, OutputStyle::default())
        .unwrap();
    run_to_quit(&controller, tasks).await;

    assert!(state.translator.read().await.is_some());
    assert_eq!(state.direction(), Direction::RightToLeft);
    assert!(state.log.is_closed());
}

async fn run_to_quit(controller: &AppController, mut tasks: JoinSet<anyhow::Result<()>>) {
    let first = timeout(Duration::from_secs(10), tasks.join_next()).await;
    assert!(first.is_ok(), "Timeout - nothing finished after :quit");

    controller.shutdown();
    let rest = timeout(Duration::from_secs(10), async {
        while let Some(result) = tasks.join_next().await {
            assert!(matches!(result, Ok(Ok(()))));
        }
    })
    .await;
    assert!(rest.is_ok(), "Timeout - tasks still running after shutdown");
}

#[tokio::test]
async fn test_log_attached_before_startup_parse() {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("maren.teh");
    fs::write(&dict, "hello|hola\nnot a mapping\n").unwrap();

    let state = Arc::new(AppState::new(
        Config::default(),
        Direction::LeftToRight,
        DiagnosticsLog::silent(16),
        Session::disabled(),
    ));
    let controller = AppController::new(state.clone());
    controller.open_on_start(dict).await.unwrap();
    assert!(!state.log.is_attached());

    let tasks = controller
        .spawn_tasks(Cursor::new(b":quit\n".to_vec()), OutputStyle::default())
        .unwrap();
    // nothing spawned has been polled yet on this runtime
    assert!(state.log.is_attached());

    run_to_quit(&controller, tasks).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_noisy_dictionary_on_single_worker() {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("noisy.teh");
    let junk: String = (0..500).map(|i| format!("junk line {i}\n")).collect();
    fs::write(&dict, format!("hello|hola\n{junk}")).unwrap();

    // far fewer slots than diagnostics, so producers wait on the pump
    let state = Arc::new(AppState::new(
        Config::default(),
        Direction::LeftToRight,
        DiagnosticsLog::silent(4),
        Session::disabled(),
    ));
    let controller = AppController::new(state.clone());
    controller.open_on_start(dict).await.unwrap();

    let input = Cursor::new(b":reload\nhello nope\n:quit\n".to_vec());
    let tasks = controller
        .spawn_tasks(input, OutputStyle::default())
        .unwrap();
    run_to_quit(&controller, tasks).await;

    let guard = state.translator.read().await;
    let translator = guard.as_ref().expect("dictionary should still be loaded");
    assert_eq!(translator.store().last_report().skipped, 500);
}
