use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use snipkey::{SessionError, TypingSession};

fn score_after(reference: &str, typed: &str, secs: u64) -> Result<snipkey::ScoreResult, SessionError> {
    let mut session = TypingSession::new();
    let t0 = Instant::now();
    session.start(reference, t0);
    session.score(typed, t0 + Duration::from_secs(secs))
}

#[test]
fn equal_length_pairs_count_every_mismatch() {
    let reference = "numeros = [1, 2, 3, 4, 5]";
    let chars: Vec<char> = reference.chars().collect();

    for k in 0..=5usize {
        // flip the first k non-space characters
        let mut flipped = 0;
        let typed: String = chars
            .iter()
            .map(|&c| {
                if flipped < k && c != ' ' {
                    flipped += 1;
                    if c == '#' {
                        '%'
                    } else {
                        '#'
                    }
                } else {
                    c
                }
            })
            .collect();

        let result = score_after(reference, &typed, 10).unwrap();
        assert_eq!(result.error_count, k, "typed {typed:?}");
    }
}

#[test]
fn identical_text_is_perfect() {
    for text in ["x = 10", "let x = 10;\nconst y = 3.14;", "  pessoa = {\"nome\": \"João\"}  "] {
        let result = score_after(text, text.trim(), 5).unwrap();
        assert_eq!(result.error_count, 0);
        assert_eq!(result.accuracy, 100.0);
    }
}

#[test]
fn short_typed_text_only_checks_overlap() {
    let result = score_after("print(x)", "prin", 4).unwrap();
    assert_eq!(result.error_count, 0);

    let result = score_after("print(x)", "pXin", 4).unwrap();
    assert_eq!(result.error_count, 1);
    assert_eq!(result.accuracy, 100.0 - (1.0 / 8.0 * 100.0));
}

#[test]
fn long_typed_text_ignores_extra_characters() {
    let result = score_after("abc", "abcdefghij", 4).unwrap();
    assert_eq!(result.error_count, 0);
    assert_eq!(result.accuracy, 100.0);
}

#[test]
fn zero_elapsed_means_zero_wpm() {
    let result = score_after("one two three four", "one two", 0).unwrap();
    assert_eq!(result.elapsed_secs, 0.0);
    assert_eq!(result.wpm, 0.0);
}

#[test]
fn scoring_before_start_fails() {
    let mut session = TypingSession::new();
    assert_matches!(session.score("", Instant::now()), Err(SessionError::NotStarted));
}

#[test]
fn empty_reference_fails() {
    assert_matches!(score_after("", "abc", 3), Err(SessionError::EmptyReference));
}

#[test]
fn one_mismatch_over_thirty_seconds() {
    let result = score_after("abc def", "abc xef", 30).unwrap();

    assert_eq!(result.error_count, 1);
    assert_eq!(result.wpm, 4.0);
    assert_eq!(format!("{:.1}", result.accuracy), "85.7");
}

#[test]
fn empty_typed_text_over_ten_seconds() {
    let result = score_after("hello", "", 10).unwrap();

    assert_eq!(result.error_count, 0);
    assert_eq!(result.wpm, 6.0);
    assert_eq!(result.accuracy, 100.0);
}

#[test]
fn accuracy_stays_within_bounds() {
    let cases = [
        ("a", "b"),
        ("ab", "ba"),
        ("hello", "HELLO"),
        ("x", ""),
        ("maçã", "abcdefgh"),
    ];
    for (reference, typed) in cases {
        let result = score_after(reference, typed, 1).unwrap();
        assert!(
            (0.0..=100.0).contains(&result.accuracy),
            "{reference:?} / {typed:?} -> {}",
            result.accuracy
        );
    }
}
