use std::collections::BTreeSet;

use hangman_types::{GameError, GameStatus, GuessOutcome, MAX_LIVES, PlayerId, WordEntry};
use tracing::debug;

use crate::{ScoringEngine, is_valid_word};

/// One hangman game bound to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    word: String,
    hint: String,
    guessed_letters: BTreeSet<char>,
    lives: u8,
    owner_id: PlayerId,
    owner_name: String,
}

impl GameSession {
    /// `entry` must hold a dictionary-checked word (see `is_valid_word`).
    pub fn new(entry: WordEntry, owner_id: PlayerId, owner_name: impl Into<String>) -> Self {
        debug_assert!(
            is_valid_word(&entry.word),
            "unchecked word {:?}",
            entry.word
        );
        Self {
            word: entry.word,
            hint: entry.hint,
            guessed_letters: BTreeSet::new(),
            lives: MAX_LIVES,
            owner_id,
            owner_name: owner_name.into(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Guessed letters in alphabetical order.
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn owner_id(&self) -> PlayerId {
        self.owner_id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn is_revealed(&self, letter: char) -> bool {
        self.guessed_letters.contains(&letter)
    }

    /// Current state. A fully revealed word wins even if no lives remain.
    pub fn status(&self) -> GameStatus {
        if self.word.chars().all(|c| self.guessed_letters.contains(&c)) {
            GameStatus::Won
        } else if self.lives == 0 {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Points earned so far: the win score once won, zero otherwise.
    pub fn score(&self) -> i32 {
        match self.status() {
            GameStatus::Won => {
                ScoringEngine::win_score(self.word.chars().count(), self.lives)
            }
            GameStatus::InProgress | GameStatus::Lost => 0,
        }
    }

    /// Apply one guess. Rejected guesses leave the session untouched.
    pub fn apply_guess(&mut self, input: &str) -> Result<GuessOutcome, GameError> {
        if self.status().is_terminal() {
            return Err(GameError::GameAlreadyCompleted);
        }

        let letter = parse_letter(input)?;
        if !self.guessed_letters.insert(letter) {
            return Err(GameError::DuplicateGuess { letter });
        }

        let correct = self.word.contains(letter);
        if !correct {
            self.lives = self.lives.saturating_sub(1);
        }

        let status = self.status();
        debug!(
            "Guess {} ({}) -> {:?}, {} lives left",
            letter,
            if correct { "hit" } else { "miss" },
            status,
            self.lives
        );

        Ok(GuessOutcome {
            letter,
            correct,
            status,
            lives_remaining: self.lives,
            score: (status == GameStatus::Won).then(|| self.score()),
        })
    }
}

/// Normalize a guess: exactly one alphabetic character (surrounding
/// whitespace ignored), uppercased. Letters whose uppercase form is more
/// than one character, like `ß`, are rejected.
pub fn parse_letter(input: &str) -> Result<char, GameError> {
    let invalid = || GameError::InvalidInput {
        input: input.to_string(),
    };

    let mut chars = input.trim().chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => c,
        _ => return Err(invalid()),
    };

    let mut upper = letter.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Ok(u),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(word: &str) -> GameSession {
        GameSession::new(
            WordEntry {
                word: word.to_string(),
                hint: "test hint".to_string(),
            },
            7,
            "Tester",
        )
    }

    fn guess_all(session: &mut GameSession, letters: &str) {
        for letter in letters.chars() {
            session.apply_guess(&letter.to_string()).unwrap();
        }
    }

    #[test]
    fn test_new_session() {
        let game = session("MINT");
        assert_eq!(game.lives(), MAX_LIVES);
        assert!(game.guessed_letters().is_empty());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.owner_id(), 7);
        assert_eq!(game.owner_name(), "Tester");
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_correct_guess_keeps_lives() {
        let mut game = session("MINT");
        let outcome = game.apply_guess("m").unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.letter, 'M');
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(outcome.lives_remaining, 6);
        assert_eq!(outcome.score, None);
        assert!(game.is_revealed('M'));
    }

    #[test]
    fn test_wrong_guess_costs_a_life() {
        let mut game = session("MINT");
        let outcome = game.apply_guess("Z").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.lives_remaining, 5);
        assert_eq!(game.lives(), 5);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut game = session("MINT");
        for input in ["", "ab", "1", "?", "ß", "  ", "éa"] {
            let err = game.apply_guess(input).unwrap_err();
            assert!(matches!(err, GameError::InvalidInput { .. }), "{input:?}");
        }
        assert_eq!(game, session("MINT"));
    }

    #[test]
    fn test_whitespace_around_letter_is_ignored() {
        assert_eq!(parse_letter(" a\n"), Ok('A'));
    }

    #[test]
    fn test_non_ascii_letter_is_a_guess() {
        assert_eq!(parse_letter("é"), Ok('É'));
        assert_eq!(parse_letter("ж"), Ok('Ж'));

        let mut game = session("MINT");
        let outcome = game.apply_guess("é").unwrap();
        assert_eq!(outcome.letter, 'É');
        assert!(!outcome.correct);
        assert_eq!(game.lives(), 5);
        assert_eq!(
            game.apply_guess("É").unwrap_err(),
            GameError::DuplicateGuess { letter: 'É' }
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unchecked word")]
    fn test_unchecked_word_is_refused() {
        session("");
    }

    #[test]
    fn test_duplicate_guess_rejected_without_second_penalty() {
        let mut game = session("MINT");
        game.apply_guess("z").unwrap();
        let before = game.clone();

        let err = game.apply_guess("Z").unwrap_err();
        assert_eq!(err, GameError::DuplicateGuess { letter: 'Z' });
        assert_eq!(game, before);
        assert_eq!(game.lives(), 5);
    }

    #[test]
    fn test_win_flawless_mint() {
        let mut game = session("MINT");
        guess_all(&mut game, "MIN");
        let outcome = game.apply_guess("t").unwrap();
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(outcome.score, Some(70));
        assert_eq!(game.score(), 70);
    }

    #[test]
    fn test_win_hangman_with_two_misses() {
        let mut game = session("HANGMAN");
        guess_all(&mut game, "HAXZNG");
        let outcome = game.apply_guess("M").unwrap();
        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(outcome.lives_remaining, 4);
        assert_eq!(outcome.score, Some(90));
    }

    #[test]
    fn test_repeated_letters_revealed_together() {
        let mut game = session("KNOLL");
        guess_all(&mut game, "KNO");
        let outcome = game.apply_guess("L").unwrap();
        assert_eq!(outcome.status, GameStatus::Won);
    }

    #[test]
    fn test_loss_after_six_misses() {
        let mut game = session("MINT");
        guess_all(&mut game, "ABCDE");
        assert_eq!(game.status(), GameStatus::InProgress);

        let outcome = game.apply_guess("F").unwrap();
        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(outcome.lives_remaining, 0);
        assert_eq!(outcome.score, None);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_no_guesses_after_terminal_state() {
        let mut game = session("MINT");
        guess_all(&mut game, "ABCDEF");
        assert_eq!(
            game.apply_guess("M").unwrap_err(),
            GameError::GameAlreadyCompleted
        );
        assert_eq!(game.lives(), 0);
    }
}
