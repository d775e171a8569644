// Library surface for the binary, headless tests and reuse of the scoring engine.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod docs;
pub mod runtime;
pub mod score;
pub mod session;
pub mod ui;

pub use score::ScoreResult;
pub use session::{PracticeText, SessionError, TypingSession};
