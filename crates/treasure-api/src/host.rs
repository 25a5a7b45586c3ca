//! Hosts the single in-flight run and bridges its prompts to HTTP.
//!
//! The sequencer runs in a background task and talks to a `WebSink`. Every
//! narration line lands on a shared board that the page polls; every prompt
//! parks a one-shot reply channel on the board until the matching POST
//! arrives.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{info, warn};
use treasure_core::error::DomainError;
use treasure_core::presentation::{PresentationSink, position_of};
use treasure_core::stage::{DEFAULT_BACKGROUND, Stage};
use treasure_expedition::domain::outcomes::RunOutcome;

/// Lifecycle of the hosted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No run has been started yet.
    Idle,
    /// A run is in flight.
    Running,
    /// The last run found the treasure.
    Completed,
    /// The last run ended on a failed stage.
    Aborted,
    /// The last run stopped on a collaborator fault.
    Interrupted,
}

/// The prompt currently waiting for the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromptView {
    /// Pick one of the labelled options.
    Choice {
        /// Offered labels, in display order.
        options: Vec<String>,
    },
    /// Type an answer and confirm it.
    TextInput,
}

/// Snapshot of the hosted run, as served to the page.
#[derive(Debug, Clone, Serialize)]
pub struct RunView {
    /// Run lifecycle state.
    pub status: RunStatus,
    /// Narration shown so far, oldest first.
    pub transcript: Vec<String>,
    /// Current background asset.
    pub background: String,
    /// The pending prompt, if the run is waiting on the player.
    pub prompt: Option<PromptView>,
    /// How the run ended, once it has.
    pub outcome: Option<RunOutcome>,
    /// Collaborator fault that stopped the run, if any.
    pub error: Option<String>,
    /// Whether a restart should be offered.
    pub can_restart: bool,
    /// When the run started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the run ended.
    pub finished_at: Option<DateTime<Utc>>,
}

enum PendingPrompt {
    Choice {
        options: Vec<String>,
        reply: oneshot::Sender<String>,
    },
    TextInput {
        reply: oneshot::Sender<String>,
    },
}

impl PendingPrompt {
    fn view(&self) -> PromptView {
        match self {
            PendingPrompt::Choice { options, .. } => PromptView::Choice {
                options: options.clone(),
            },
            PendingPrompt::TextInput { .. } => PromptView::TextInput,
        }
    }
}

struct Board {
    status: RunStatus,
    transcript: Vec<String>,
    background: &'static str,
    pending: Option<PendingPrompt>,
    outcome: Option<RunOutcome>,
    error: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    record_held: bool,
}

impl Board {
    fn idle() -> Self {
        Self {
            status: RunStatus::Idle,
            transcript: Vec::new(),
            background: DEFAULT_BACKGROUND,
            pending: None,
            outcome: None,
            error: None,
            started_at: None,
            finished_at: None,
            record_held: false,
        }
    }

    fn nothing_pending(&self, prompt: &str) -> DomainError {
        match self.status {
            RunStatus::Completed | RunStatus::Aborted | RunStatus::Interrupted => {
                DomainError::Presentation("the run stopped waiting".to_owned())
            }
            RunStatus::Idle | RunStatus::Running => {
                DomainError::Conflict(format!("no {prompt} is pending"))
            }
        }
    }
}

/// Shared handle on the hosted run.
#[derive(Clone)]
pub struct RunHost {
    board: Arc<Mutex<Board>>,
}

impl Default for RunHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RunHost {
    /// Creates a host with no run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::idle())),
        }
    }

    fn board(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserves the player record for a write outside a run. No run can
    /// start until the returned hold is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if a run is in flight or the record is
    /// already held.
    pub fn hold_record(&self) -> Result<RecordHold, DomainError> {
        let mut board = self.board();
        if board.status == RunStatus::Running {
            return Err(DomainError::Conflict("a run is in progress".to_owned()));
        }
        if board.record_held {
            return Err(DomainError::Conflict(
                "the player record is being updated".to_owned(),
            ));
        }
        board.record_held = true;
        Ok(RecordHold {
            board: Arc::clone(&self.board),
        })
    }

    /// Clears the board for a fresh run.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if a run is already in flight or the
    /// player record is held.
    pub fn begin(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut board = self.board();
        if board.status == RunStatus::Running {
            return Err(DomainError::Conflict("a run is already in progress".to_owned()));
        }
        if board.record_held {
            return Err(DomainError::Conflict(
                "the player record is being updated".to_owned(),
            ));
        }
        *board = Board::idle();
        board.status = RunStatus::Running;
        board.started_at = Some(now);
        Ok(())
    }

    /// Records how the run ended.
    pub fn finish(&self, result: Result<RunOutcome, DomainError>, now: DateTime<Utc>) {
        let mut board = self.board();
        board.pending = None;
        board.finished_at = Some(now);
        match result {
            Ok(outcome) => {
                board.status = match outcome {
                    RunOutcome::Completed(_) => RunStatus::Completed,
                    RunOutcome::Aborted(_) => RunStatus::Aborted,
                };
                board.outcome = Some(outcome);
            }
            Err(err) => {
                warn!(error = %err, "hosted run interrupted");
                board.status = RunStatus::Interrupted;
                board.error = Some(err.to_string());
            }
        }
    }

    /// A presentation sink that draws on this host's board.
    #[must_use]
    pub fn sink(&self) -> WebSink {
        WebSink {
            board: Arc::clone(&self.board),
        }
    }

    /// Snapshot of the board.
    #[must_use]
    pub fn view(&self) -> RunView {
        let board = self.board();
        RunView {
            status: board.status,
            transcript: board.transcript.clone(),
            background: board.background.to_owned(),
            prompt: board.pending.as_ref().map(PendingPrompt::view),
            outcome: board.outcome.clone(),
            error: board.error.clone(),
            can_restart: matches!(board.status, RunStatus::Aborted | RunStatus::Interrupted),
            started_at: board.started_at,
            finished_at: board.finished_at,
        }
    }

    /// Answers the pending choice prompt with `label`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if no choice prompt is pending,
    /// `DomainError::Validation` if `label` was not offered, and
    /// `DomainError::Presentation` if the run has already ended.
    pub fn choose(&self, label: &str) -> Result<(), DomainError> {
        let mut board = self.board();
        match board.pending.take() {
            Some(PendingPrompt::Choice { options, reply }) => {
                let offered: Vec<&str> = options.iter().map(String::as_str).collect();
                if let Err(err) = position_of(&offered, label) {
                    board.pending = Some(PendingPrompt::Choice { options, reply });
                    return Err(err);
                }
                reply
                    .send(label.to_owned())
                    .map_err(|_| DomainError::Presentation("the run stopped waiting".to_owned()))
            }
            other => {
                board.pending = other;
                Err(board.nothing_pending("choice"))
            }
        }
    }

    /// Confirms the pending text prompt with `text`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if no text prompt is pending and
    /// `DomainError::Presentation` if the run has already ended.
    pub fn answer(&self, text: &str) -> Result<(), DomainError> {
        let mut board = self.board();
        match board.pending.take() {
            Some(PendingPrompt::TextInput { reply }) => reply
                .send(text.to_owned())
                .map_err(|_| DomainError::Presentation("the run stopped waiting".to_owned())),
            other => {
                board.pending = other;
                Err(board.nothing_pending("text input"))
            }
        }
    }
}

/// Exclusive hold on the player record, released on drop.
pub struct RecordHold {
    board: Arc<Mutex<Board>>,
}

impl Drop for RecordHold {
    fn drop(&mut self) {
        self.board
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record_held = false;
    }
}

/// `PresentationSink` that renders onto a `RunHost` board.
pub struct WebSink {
    board: Arc<Mutex<Board>>,
}

impl WebSink {
    fn board(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn park(
        &self,
        prompt: PendingPrompt,
        reply: oneshot::Receiver<String>,
    ) -> Result<String, DomainError> {
        self.board().pending = Some(prompt);
        reply
            .await
            .map_err(|_| DomainError::Presentation("prompt abandoned".to_owned()))
    }
}

#[async_trait]
impl PresentationSink for WebSink {
    async fn show_text(&self, message: &str) -> Result<(), DomainError> {
        self.board().transcript.push(message.to_owned());
        Ok(())
    }

    async fn show_image(&self, stage: Stage) -> Result<(), DomainError> {
        info!(stage = %stage, "scenery changed");
        self.board().background = stage.background_asset();
        Ok(())
    }

    async fn present_choices(&self, options: &[&str]) -> Result<String, DomainError> {
        let (tx, rx) = oneshot::channel();
        let prompt = PendingPrompt::Choice {
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            reply: tx,
        };
        self.park(prompt, rx).await
    }

    async fn present_text_input(&self) -> Result<String, DomainError> {
        let (tx, rx) = oneshot::channel();
        self.park(PendingPrompt::TextInput { reply: tx }, rx).await
    }
}
