use clap::{builder::RangedU64ValueParser, error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;

use snipkey::{
    app::{App, Control},
    app_dirs::AppDirs,
    catalog::{Catalog, Language, Level},
    config::{ConfigStore, FileConfigStore},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
};

const LOG_ENV: &str = "SNIPKEY_LOG";

/// browse programming snippets and practice typing them
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Browse a catalogue of programming-language snippets, open their documentation, and practice typing them with speed and accuracy scoring."
)]
pub struct Cli {
    /// language whose snippets are shown first
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// level whose snippets are shown first
    #[clap(short = 'n', long, value_enum)]
    level: Option<Level>,

    /// start practising the n-th topic (1-based) right away
    #[clap(short = 't', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    topic: Option<usize>,

    /// custom text to practise instead of a catalogue snippet
    #[clap(short = 'p', long, conflicts_with = "topic")]
    prompt: Option<String>,

    /// print the catalogue and exit
    #[clap(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();

    let catalog = Catalog::builtin()?;

    if cli.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(level) = cli.level {
        config.level = level;
    }

    let mut app = App::with_system(catalog, config);
    if let Err(err) = open_requested_practice(&mut app, &cli) {
        err.exit();
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let outcome = run_app(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = store.save(&app.config()) {
        tracing::warn!(path = %store.path().display(), %err, "failed to save config");
    }

    outcome
}

/// Starts the practice asked for with `--prompt` or `--topic`, if any.
fn open_requested_practice(app: &mut App, cli: &Cli) -> Result<(), clap::Error> {
    if let Some(prompt) = &cli.prompt {
        app.start_custom(prompt.as_str());
    } else if let Some(topic) = cli.topic {
        let available = app.topics().len();
        if topic > available {
            return Err(Cli::command().error(
                ErrorKind::InvalidValue,
                format!("{} / {} has only {available} topics", app.language, app.level),
            ));
        }
        app.select(topic - 1);
        app.start_practice();
    }
    Ok(())
}

fn run_app<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    return Ok(());
                }
            }
            // redraw refreshes the live timer and adapts to the new size
            AppEvent::Tick | AppEvent::Resize => {}
        }
    }
}

fn print_catalog(catalog: &Catalog) {
    for language in catalog.languages() {
        for level in [Level::Beginner, Level::Intermediate] {
            let topics = catalog.topics(language, level);
            if topics.is_empty() {
                continue;
            }
            println!(
                "{language} / {level}: {}",
                topics
                    .iter()
                    .enumerate()
                    .map(|(idx, topic)| format!("{}. {}", idx + 1, topic.name))
                    .join(", ")
            );
        }
    }
}

/// Logs go to a file because the terminal belongs to the UI.
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
