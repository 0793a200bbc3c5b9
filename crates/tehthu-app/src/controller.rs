use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tehthu_core::types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::spawn_input_reader;
use crate::log_pump::log_pump;
use crate::state::AppState;
use crate::ui::{OutputStyle, output_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_output: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input_to_app: kanal::bounded_async(64),
            // diagnostics bursts during a parse
            app_to_output: kanal::bounded_async(256),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Queue a dictionary to open before any typed input is handled
    pub async fn open_on_start(&self, path: PathBuf) -> anyhow::Result<()> {
        self.channels
            .input_to_app
            .0
            .send(AppEvent::OpenDictionary(path))
            .await?;
        Ok(())
    }

    pub fn spawn_tasks<R>(&self, input: R, style: OutputStyle) -> anyhow::Result<JoinSet<anyhow::Result<()>>>
    where
        R: BufRead + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        // before the event loop runs, or the startup parse logs into the void
        self.state.log.attach();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_output.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Output loop
        tasks.spawn(output_loop(
            self.channels.app_to_output.1.clone(),
            style,
            self.cancel_token.child_token(),
        ));

        // Diagnostics
        tasks.spawn(log_pump(
            self.state.log.clone(),
            self.channels.app_to_output.0.clone(),
        ));

        // Input runs on its own thread and is left behind at exit
        spawn_input_reader(
            input,
            self.channels.input_to_app.0.clone(),
            self.cancel_token.child_token(),
        )?;

        Ok(tasks)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        self.state.log.close();
        let _ = self.channels.app_to_output.0.close();
    }
}
