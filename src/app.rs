use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error};

use crate::catalog::{Catalog, Language, Level, Topic};
use crate::config::Config;
use crate::docs::{BrowserOpener, LinkOpener};
use crate::runtime::{Clock, SystemClock};
use crate::score::ScoreResult;
use crate::session::{PracticeText, SessionError, TypingSession};

pub const SELECT_TOPIC_FIRST: &str = "Selecione um tópico primeiro";
pub const EMPTY_EXERCISE: &str = "Não é possível avaliar um exercício vazio";

const TAB_AS_SPACES: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Practice,
    Results,
}

/// What the event loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// Catalogue browsing plus typing practice.
///
/// Every practice attempt gets a fresh [`TypingSession`]; the app only feeds
/// it the snippet, the typed buffer and the current time, then shows the result.
pub struct App {
    pub catalog: Catalog,
    pub language: Language,
    pub level: Level,
    pub selected: usize,
    pub screen: Screen,
    pub session: TypingSession,
    pub practice_text: Option<PracticeText>,
    pub typed: String,
    pub result: Option<ScoreResult>,
    pub status: Option<Status>,
    clock: Box<dyn Clock>,
    opener: Box<dyn LinkOpener>,
}

impl App {
    pub fn new(
        catalog: Catalog,
        config: Config,
        clock: Box<dyn Clock>,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        Self {
            catalog,
            language: config.language,
            level: config.level,
            selected: 0,
            screen: Screen::Catalog,
            session: TypingSession::new(),
            practice_text: None,
            typed: String::new(),
            result: None,
            status: None,
            clock,
            opener,
        }
    }

    /// App wired to the real clock and the system browser
    pub fn with_system(catalog: Catalog, config: Config) -> Self {
        Self::new(catalog, config, Box::new(SystemClock), Box::new(BrowserOpener))
    }

    pub fn config(&self) -> Config {
        Config {
            language: self.language,
            level: self.level,
        }
    }

    pub fn topics(&self) -> &[Topic] {
        self.catalog.topics(self.language, self.level)
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        self.catalog.topic(self.language, self.level, self.selected)
    }

    /// Seconds on the clock of the running attempt
    pub fn elapsed(&self) -> Option<f64> {
        self.session.elapsed(self.clock.now())
    }

    pub fn select(&mut self, idx: usize) {
        if idx < self.topics().len() {
            self.selected = idx;
        }
    }

    pub fn select_next(&mut self) {
        let count = self.topics().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.topics().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.selected = 0;
        self.status = None;
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        self.selected = 0;
        self.status = None;
    }

    pub fn select_random(&mut self) {
        if let Some(idx) =
            self.catalog
                .random_topic(self.language, self.level, &mut rand::thread_rng())
        {
            self.selected = idx;
        }
    }

    pub fn open_documentation(&mut self) {
        let Some(url) = self.selected_topic().map(|t| t.url.clone()) else {
            self.status = Some(Status::warning(SELECT_TOPIC_FIRST));
            return;
        };

        match self.opener.open(&url) {
            Ok(()) => {
                debug!(%url, "opened documentation");
                self.status = None;
            }
            Err(err) => {
                self.status = Some(Status::error(format!("Não foi possível abrir: {err}")));
            }
        }
    }

    /// Starts practising the selected topic's snippet.
    pub fn start_practice(&mut self) {
        match self.selected_topic().map(|t| t.snippet.clone()) {
            Some(snippet) => self.begin(PracticeText::new(snippet)),
            None => self.status = Some(Status::warning(SELECT_TOPIC_FIRST)),
        }
    }

    /// Starts practising arbitrary text instead of a catalogue snippet.
    pub fn start_custom(&mut self, text: impl Into<String>) {
        self.begin(PracticeText::new(text));
    }

    /// Practises the last snippet again.
    pub fn restart(&mut self) {
        if let Some(text) = self.practice_text.clone() {
            self.begin(text);
        }
    }

    fn begin(&mut self, text: PracticeText) {
        self.session = TypingSession::new();
        self.session.start(text.clone(), self.clock.now());
        self.practice_text = Some(text);
        self.typed.clear();
        self.result = None;
        self.status = None;
        self.screen = Screen::Practice;
        debug!(language = %self.language, level = %self.level, "practice started");
    }

    pub fn submit(&mut self) {
        match self.session.score(&self.typed, self.clock.now()) {
            Ok(result) => {
                self.result = Some(result);
                self.status = None;
                self.screen = Screen::Results;
            }
            Err(SessionError::EmptyReference) => {
                self.status = Some(Status::error(EMPTY_EXERCISE));
            }
            Err(err @ SessionError::NotStarted) => {
                error!(%err, "scored a practice attempt that was never started");
                self.back_to_catalog();
            }
        }
    }

    /// Leaves practice or results, abandoning any unscored attempt.
    pub fn back_to_catalog(&mut self) {
        self.session = TypingSession::new();
        self.typed.clear();
        self.status = None;
        self.screen = Screen::Catalog;
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        match self.screen {
            Screen::Catalog => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
                KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Left => self.set_language(self.language.prev()),
                KeyCode::Right => self.set_language(self.language.next()),
                KeyCode::Tab => self.set_level(self.level.toggle()),
                KeyCode::Enter | KeyCode::Char('p') => self.start_practice(),
                KeyCode::Char('d') => self.open_documentation(),
                KeyCode::Char('x') => self.select_random(),
                _ => {}
            },
            Screen::Practice => match key.code {
                KeyCode::Esc => self.back_to_catalog(),
                KeyCode::F(2) => self.submit(),
                KeyCode::Char('s') if ctrl => self.submit(),
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.typed.push(c)
                }
                KeyCode::Enter => self.typed.push('\n'),
                KeyCode::Tab => self.typed.push_str(TAB_AS_SPACES),
                KeyCode::Backspace => {
                    self.typed.pop();
                }
                _ => {}
            },
            Screen::Results => match key.code {
                KeyCode::Char('q') => return Control::Quit,
                KeyCode::Char('r') => self.restart(),
                KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => self.back_to_catalog(),
                _ => {}
            },
        }

        Control::Continue
    }
}
