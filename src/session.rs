use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::score::{
    accuracy_percent, count_errors, trim_text, word_count, words_per_minute, ScoreResult,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `score` was called before `start`, or after the attempt was already scored.
    #[error("typing session has not been started")]
    NotStarted,
    /// The reference text is empty once surrounding whitespace is trimmed.
    #[error("cannot score an empty exercise")]
    EmptyReference,
}

/// The snippet a user must reproduce. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeText(String);

impl PracticeText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PracticeText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for PracticeText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Running {
        reference: PracticeText,
        started_at: Instant,
    },
}

/// One timed practice attempt: `start`, let the user type, then `score`.
///
/// Time is supplied by the caller so the session never reads a clock itself.
/// A scored session goes back to idle and has to be started again.
#[derive(Debug, Clone, Default)]
pub struct TypingSession {
    state: State,
}

impl TypingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins an attempt. Starting a running session discards the interrupted attempt.
    pub fn start(&mut self, reference: impl Into<PracticeText>, now: Instant) {
        if self.is_running() {
            debug!("restarting a running typing session");
        }
        self.state = State::Running {
            reference: reference.into(),
            started_at: now,
        };
    }

    pub fn score(&mut self, typed: &str, now: Instant) -> Result<ScoreResult, SessionError> {
        let State::Running {
            reference,
            started_at,
        } = &self.state
        else {
            return Err(SessionError::NotStarted);
        };

        let typed = trim_text(typed);
        let reference = trim_text(reference.as_str());

        let error_count = count_errors(typed, reference);
        let accuracy = accuracy_percent(error_count, reference.chars().count())
            .ok_or(SessionError::EmptyReference)?;

        let elapsed_secs = now.saturating_duration_since(*started_at).as_secs_f64();
        let result = ScoreResult {
            elapsed_secs,
            error_count,
            wpm: words_per_minute(word_count(reference), elapsed_secs),
            accuracy,
        };

        self.state = State::Idle;
        debug!(
            errors = result.error_count,
            wpm = result.wpm,
            "typing session scored"
        );
        Ok(result)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn reference(&self) -> Option<&PracticeText> {
        match &self.state {
            State::Running { reference, .. } => Some(reference),
            State::Idle => None,
        }
    }

    /// Seconds since the attempt started, for a live timer.
    pub fn elapsed(&self, now: Instant) -> Option<f64> {
        match &self.state {
            State::Running { started_at, .. } => {
                Some(now.saturating_duration_since(*started_at).as_secs_f64())
            }
            State::Idle => None,
        }
    }
}
