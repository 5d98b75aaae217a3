#![allow(dead_code)]

use hangman_core::{GameSession, WordDictionary};
use hangman_types::{GameStatus, GuessOutcome, WordEntry};

/// Creates a dictionary holding a known set of words
pub fn create_test_dictionary() -> WordDictionary {
    WordDictionary::from_entries(vec![
        create_entry("MINT", "Tingly fresh and good for leaves and code."),
        create_entry("HANGMAN", "Your limbs depend on your guesses in this game."),
        create_entry("KNOLL", "A hill so small it barely boasts."),
    ])
    .expect("test dictionary is valid")
}

pub fn create_entry(word: &str, hint: &str) -> WordEntry {
    WordEntry {
        word: word.to_string(),
        hint: hint.to_string(),
    }
}

/// Creates a session for a specific word
pub fn create_session_with_word(word: &str) -> GameSession {
    GameSession::new(create_entry(word, "test hint"), 1001, "Test Player")
}

/// Applies every letter of `letters`, expecting each to be accepted
pub fn guess_letters(session: &mut GameSession, letters: &str) -> Vec<GuessOutcome> {
    letters
        .chars()
        .map(|letter| {
            session
                .apply_guess(&letter.to_string())
                .unwrap_or_else(|e| panic!("guess {letter} rejected: {e}"))
        })
        .collect()
}

/// Asserts that a session is in a specific state
pub fn assert_session_state(session: &GameSession, expected_status: GameStatus, expected_lives: u8) {
    assert_eq!(
        session.status(),
        expected_status,
        "Expected status {:?}, got {:?}",
        expected_status,
        session.status()
    );
    assert_eq!(
        session.lives(),
        expected_lives,
        "Expected {} lives, got {}",
        expected_lives,
        session.lives()
    );
}
