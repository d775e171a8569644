use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use snipkey::app::{App, Control, Screen};
use snipkey::catalog::{Catalog, Language, Level};
use snipkey::config::Config;
use snipkey::docs::RecordingOpener;
use snipkey::runtime::{AppEvent, FixedTicker, ManualClock, Runner, TestEventSource};

const TICK: Duration = Duration::from_millis(5);

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_text(tx: &mpsc::Sender<AppEvent>, text: &str) {
    for c in text.chars() {
        let code = match c {
            '\n' => KeyCode::Enter,
            c => KeyCode::Char(c),
        };
        tx.send(key(code)).unwrap();
    }
}

// Drives the event loop until the queue runs dry; every handled event moves the clock 100ms.
fn drive(app: &mut App, runner: &Runner<TestEventSource, FixedTicker>, clock: &ManualClock) -> Control {
    for _ in 0..500u32 {
        match runner.step() {
            AppEvent::Tick => return Control::Continue,
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    return Control::Quit;
                }
            }
        }
        clock.advance(Duration::from_millis(100));
    }
    Control::Continue
}

fn headless_app() -> (App, ManualClock, Rc<RecordingOpener>) {
    let clock = ManualClock::new();
    let opener = Rc::new(RecordingOpener::new());
    let app = App::new(
        Catalog::builtin().unwrap(),
        Config::default(),
        Box::new(clock.clone()),
        Box::new(opener.clone()),
    );
    (app, clock, opener)
}

#[test]
fn headless_practice_flow_scores_snippet() {
    let (mut app, clock, _) = headless_app();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(TICK));

    // Pick "Loops" and start practising it
    tx.send(key(KeyCode::Down)).unwrap();
    tx.send(key(KeyCode::Down)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    assert_eq!(drive(&mut app, &runner, &clock), Control::Continue);
    assert_eq!(app.screen, Screen::Practice);

    let snippet = "for i in range(5):\n    print(i)\n\nwhile x > 0:\n    print(x)\n    x -= 1";
    assert_eq!(
        app.session.reference().map(|r| r.as_str()),
        Some(snippet)
    );

    // One typo: 'j' instead of 'i' in the loop variable
    send_text(&tx, &snippet.replacen("for i", "for j", 1));
    assert_eq!(drive(&mut app, &runner, &clock), Control::Continue);

    clock.advance(Duration::from_secs(30));
    tx.send(key(KeyCode::F(2))).unwrap();
    drive(&mut app, &runner, &clock);

    assert_eq!(app.screen, Screen::Results);
    let result = app.result.unwrap();
    assert_eq!(result.error_count, 1);
    assert!(result.elapsed_secs > 30.0);
    assert!(result.wpm > 0.0);
    let expected_accuracy = 100.0 - (1.0 / snippet.chars().count() as f64 * 100.0);
    assert!((result.accuracy - expected_accuracy).abs() < 1e-9);
}

#[test]
fn headless_navigation_and_documentation() {
    let (mut app, clock, opener) = headless_app();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(TICK));

    tx.send(key(KeyCode::Right)).unwrap();
    tx.send(key(KeyCode::Down)).unwrap();
    tx.send(key(KeyCode::Char('d'))).unwrap();
    drive(&mut app, &runner, &clock);

    assert_eq!(app.language, Language::JavaScript);
    assert_eq!(app.level, Level::Beginner);
    assert_eq!(app.selected_topic().unwrap().name, "Condicionais");
    assert_eq!(
        opener.opened(),
        vec!["https://developer.mozilla.org/pt-BR/docs/Web/JavaScript/Reference/Statements/if...else"]
    );
}

#[test]
fn headless_restart_after_results_then_quit() {
    let (mut app, clock, _) = headless_app();
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(TICK));

    app.start_custom("hello");
    send_text(&tx, "hello");
    tx.send(key(KeyCode::F(2))).unwrap();
    drive(&mut app, &runner, &clock);
    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.result.unwrap().error_count, 0);

    tx.send(key(KeyCode::Char('r'))).unwrap();
    drive(&mut app, &runner, &clock);
    assert_eq!(app.screen, Screen::Practice);
    assert!(app.session.is_running());
    assert!(app.typed.is_empty());

    tx.send(key(KeyCode::Esc)).unwrap();
    tx.send(key(KeyCode::Char('q'))).unwrap();
    assert_eq!(drive(&mut app, &runner, &clock), Control::Quit);
    assert_eq!(app.screen, Screen::Catalog);
    assert!(!app.session.is_running());
}

#[test]
fn headless_tick_without_input_keeps_state() {
    let (mut app, clock, _) = headless_app();
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(TICK));

    app.start_custom("abc");
    assert_eq!(drive(&mut app, &runner, &clock), Control::Continue);

    assert_eq!(app.screen, Screen::Practice);
    assert_eq!(app.elapsed(), Some(0.0));
}
