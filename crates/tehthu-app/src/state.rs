use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tehthu_config::Config;
use tehthu_core::{DiagnosticsLog, Direction};
use tehthu_translator::Translator;
use tokio::sync::RwLock;

use crate::session::Session;

pub struct AppState {
    pub config: Config,
    /// `None` until a dictionary parses; cleared again when one fails to.
    /// Parsing and translating push diagnostics, which can block, so the
    /// handlers move an owned guard onto a blocking thread.
    pub translator: Arc<RwLock<Option<Translator>>>,
    pub log: DiagnosticsLog,
    pub session: Session,
    right_to_left: AtomicBool,
}

impl AppState {
    pub fn new(config: Config, direction: Direction, log: DiagnosticsLog, session: Session) -> Self {
        Self {
            config,
            translator: Arc::new(RwLock::new(None)),
            log,
            session,
            right_to_left: AtomicBool::new(direction == Direction::RightToLeft),
        }
    }

    pub fn direction(&self) -> Direction {
        if self.right_to_left.load(Ordering::Relaxed) {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        }
    }

    /// Flip the translation direction, returning the new one
    pub fn swap_direction(&self) -> Direction {
        let was_rtl = self.right_to_left.fetch_xor(true, Ordering::Relaxed);
        if was_rtl {
            Direction::LeftToRight
        } else {
            Direction::RightToLeft
        }
    }
}
