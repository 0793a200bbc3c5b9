//! Bounded, blocking queue of human-readable parse and translation messages.
//!
//! Producers (parsing, translation) call [`DiagnosticsLog::push`] or one of the
//! level helpers; a consumer thread (a log viewer) calls [`DiagnosticsLog::pop`].
//! Nothing is queued until a consumer has attached, so a caller that never
//! reads the log never fills it up.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

pub const DEFAULT_CAPACITY: usize = 100;

/// Shared handle to a diagnostics queue. Clones refer to the same queue.
#[derive(Clone)]
pub struct DiagnosticsLog {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<State>,
    changed: Condvar,
    capacity: usize,
    echo: bool,
}

struct State {
    lines: VecDeque<String>,
    attached: bool,
    closed: bool,
}

impl DiagnosticsLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(capacity, true)
    }

    /// Queue without mirroring messages to `tracing`
    pub fn silent(capacity: usize) -> Self {
        Self::build(capacity, false)
    }

    fn build(capacity: usize, echo: bool) -> Self {
        let capacity = capacity.max(1);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    lines: VecDeque::with_capacity(capacity),
                    attached: false,
                    closed: false,
                }),
                changed: Condvar::new(),
                capacity,
                echo,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Queue a line, blocking while the queue is full.
    ///
    /// No-op while no consumer is attached. A producer blocked on a full queue
    /// gives up and drops its line once the log is closed.
    pub fn push(&self, line: impl Into<String>) {
        let mut state = self.shared.state.lock();
        if !state.attached || state.closed {
            return;
        }

        while state.lines.len() >= self.shared.capacity && !state.closed {
            self.shared.changed.wait(&mut state);
        }
        if state.closed {
            return;
        }

        state.lines.push_back(line.into());
        self.shared.changed.notify_all();
    }

    /// Take the oldest line, blocking until one is available.
    ///
    /// Attaches a consumer on first call. Returns `None` only after the log is
    /// closed and every queued line has been taken.
    pub fn pop(&self) -> Option<String> {
        let mut state = self.shared.state.lock();
        state.attached = true;

        loop {
            if let Some(line) = state.lines.pop_front() {
                self.shared.changed.notify_all();
                return Some(line);
            }
            if state.closed {
                return None;
            }
            self.shared.changed.wait(&mut state);
        }
    }

    /// Like [`pop`](Self::pop) but gives up after `timeout`
    pub fn pop_timeout(&self, timeout: Duration) -> Option<String> {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        state.attached = true;

        loop {
            if let Some(line) = state.lines.pop_front() {
                self.shared.changed.notify_all();
                return Some(line);
            }
            if state.closed {
                return None;
            }
            if self
                .shared
                .changed
                .wait_until(&mut state, deadline)
                .timed_out()
            {
                return state.lines.pop_front().inspect(|_| {
                    self.shared.changed.notify_all();
                });
            }
        }
    }

    /// Take the oldest line without waiting
    pub fn try_pop(&self) -> Option<String> {
        let mut state = self.shared.state.lock();
        let line = state.lines.pop_front();
        if line.is_some() {
            self.shared.changed.notify_all();
        }
        line
    }

    /// Start accepting lines
    pub fn attach(&self) {
        self.shared.state.lock().attached = true;
    }

    /// Stop accepting new lines. Lines already queued are kept.
    pub fn detach(&self) {
        self.shared.state.lock().attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.shared.state.lock().attached
    }

    /// Wake every waiter and stop accepting lines for good
    pub fn close(&self) {
        let mut state = self.shared.state.lock();
        state.closed = true;
        self.shared.changed.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    pub fn len(&self) -> usize {
        self.shared.state.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn info(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if self.shared.echo {
            tracing::info!("{message}");
        }
        self.push(format!("Info: {message}"));
    }

    pub fn note(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if self.shared.echo {
            tracing::debug!("{message}");
        }
        self.push(format!("Note: {message}"));
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if self.shared.echo {
            tracing::warn!("{message}");
        }
        self.push(format!("Warning: {message}"));
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if self.shared.echo {
            tracing::error!("{message}");
        }
        self.push(format!("Critical error: {message}"));
    }
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DiagnosticsLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("DiagnosticsLog")
            .field("capacity", &self.shared.capacity)
            .field("queued", &state.lines.len())
            .field("attached", &state.attached)
            .field("closed", &state.closed)
            .finish()
    }
}
