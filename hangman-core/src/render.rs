use hangman_types::MAX_LIVES;

use crate::GameSession;

/// Glyph shown for letters that have not been guessed yet.
pub const HIDDEN_LETTER: char = '_';

/// Stages of the drawing, indexed by lives lost.
pub const HANGMAN_ART: [&str; 7] = [
    r"
    ┌─────
    │    │
    │
    │
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    😮
    │
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    😮
    │    │
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    😮
    │   /│
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    😮
    │   /│\
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    😮
    │   /│\
    │   /
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    😵
    │   /│\
    │   / \
    │
    ┴───────",
];

/// The same stages with the emoji faces spelled as letters.
pub const HANGMAN_ART_PLAIN: [&str; 7] = [
    r"
    ┌─────
    │    │
    │
    │
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    O
    │
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    O
    │    │
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    O
    │   /│
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    O
    │   /│\
    │
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    O
    │   /│\
    │   /
    │
    ┴───────",
    r"
    ┌─────
    │    │
    │    X
    │   /│\
    │   / \
    │
    ┴───────",
];

/// Whether the destination can display emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Rich,
    Plain,
}

struct Labels {
    word: &'static str,
    hint: &'static str,
    guessed: &'static str,
    lives: &'static str,
}

const RICH_LABELS: Labels = Labels {
    word: "🔠 Word:",
    hint: "💡 Hint:",
    guessed: "📝 Guessed:",
    lives: "❤️ Lives:",
};

const PLAIN_LABELS: Labels = Labels {
    word: "Word:",
    hint: "Hint:",
    guessed: "Guessed:",
    lives: "Lives:",
};

/// Index into the art tables for the given lives left.
pub fn illustration_index(lives: u8) -> usize {
    usize::from(MAX_LIVES - lives.min(MAX_LIVES))
}

pub fn illustration(lives: u8, mode: RenderMode) -> &'static str {
    let index = illustration_index(lives);
    match mode {
        RenderMode::Rich => HANGMAN_ART[index],
        RenderMode::Plain => HANGMAN_ART_PLAIN[index],
    }
}

/// Word with unguessed letters hidden, e.g. `M _ _ T`.
pub fn masked_word(session: &GameSession) -> String {
    session
        .word()
        .chars()
        .map(|c| {
            if session.is_revealed(c) {
                c.to_string()
            } else {
                HIDDEN_LETTER.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Guessed letters, sorted and comma separated, or `None`.
pub fn guessed_list(session: &GameSession) -> String {
    if session.guessed_letters().is_empty() {
        return "None".to_string();
    }
    session
        .guessed_letters()
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Status message for a game in progress.
pub fn render(session: &GameSession, mode: RenderMode) -> String {
    let labels = match mode {
        RenderMode::Rich => &RICH_LABELS,
        RenderMode::Plain => &PLAIN_LABELS,
    };

    format!(
        "{} {}\n{} {}\n{} {}\n{} {}/{}\n{}",
        labels.word,
        masked_word(session),
        labels.hint,
        session.hint(),
        labels.guessed,
        guessed_list(session),
        labels.lives,
        session.lives(),
        MAX_LIVES,
        illustration(session.lives(), mode),
    )
}
