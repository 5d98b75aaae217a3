use std::sync::LazyLock;

use hangman_types::{GameError, WordEntry};
use rand::Rng;

const BUILTIN_WORDS: &[(&str, &str)] = &[
    ("PYTHON", "A snake that's fluent in syntax."),
    ("JAVASCRIPT", "Often tied in knots, but makes websites run."),
    ("TELEGRAM", "It delivers texts, stickers, and bots alike."),
    ("HANGMAN", "Your limbs depend on your guesses in this game."),
    ("DEVELOPER", "One who builds with lines but no bricks."),
    ("GAMING", "When pixels meet passion and reflex."),
    ("PROGRAMMING", "Long word for long hours of logic loops."),
    ("LOFT", "A small space up high or a stylish apartment?"),
    ("GAZE", "A lingering look or a crystal ball skill."),
    ("MINT", "Tingly fresh and good for leaves and code."),
    ("BRIM", "The edge that barely holds it all together."),
    ("COVE", "A curve in the coast or a hollow in sound."),
    ("SNAP", "Quick motion with a sound to match."),
    ("WISP", "A curl of air or a soft spirit-like trail."),
    ("HUSH", "Silence's twin, often whispered."),
    ("DUNE", "Where sand sleeps and wind sketches."),
    ("GLIM", "A faint light or a rare spark of insight."),
    ("CRISP", "Sharp and cool, like a chip or a breeze."),
    ("BLAZE", "Flame's cousin, often in comic books."),
    ("NUDGE", "A soft push that might change your mind."),
    ("TWINE", "Twisted strands that hold things close."),
    ("PLUME", "Feathered puff or a poet's breath."),
    ("GRASP", "A firm hold on ideas or objects."),
    ("KNACK", "A knack for problems, often quirky."),
    ("SLOPE", "This slope's slippery, step carefully."),
    ("QUEST", "The dragon's trail or the hero's aim."),
    ("FABLE", "A tale that teaches, told with charm."),
    ("FLINT", "Hard as rock, but sparks fly when struck."),
    ("SPIRE", "It reaches for the sky, but never leaves the ground."),
    ("DRIFT", "It moves without purpose, like snow or thought."),
    ("FORGE", "Where metal meets fire, or truth meets fiction."),
    ("RAVEN", "Dark as night, it croaks of omens."),
    ("CHIME", "It sings when struck, marking time or mood."),
    ("FLICK", "A quick move or a short film."),
    ("GRIME", "Dirt's stubborn cousin, clings to effort."),
    ("THORN", "Beauty's bodyguard on a stem."),
    ("CRATE", "A box with purpose, often wooden and worn."),
    ("SPOOK", "A whisper in the dark or a sudden chill."),
    ("BRISK", "Quick and cool, like a morning walk."),
    ("LEDGE", "A narrow edge where birds or danger rest."),
    ("MIRTH", "Laughter's quieter twin, full of light."),
    ("KNOLL", "A hill so small it barely boasts."),
];

static BUILTIN: LazyLock<WordDictionary> = LazyLock::new(|| WordDictionary {
    entries: BUILTIN_WORDS
        .iter()
        .map(|(word, hint)| WordEntry {
            word: (*word).to_string(),
            hint: (*hint).to_string(),
        })
        .collect(),
});

/// Immutable word → hint table that games draw their secret word from.
#[derive(Debug, Clone)]
pub struct WordDictionary {
    entries: Vec<WordEntry>,
}

impl WordDictionary {
    /// The process-wide built-in dictionary.
    pub fn builtin() -> &'static WordDictionary {
        &BUILTIN
    }

    /// Build a dictionary from custom entries. Words are normalized to
    /// uppercase; anything that is not ASCII letters is rejected.
    pub fn from_entries(entries: Vec<WordEntry>) -> Result<Self, GameError> {
        if entries.is_empty() {
            return Err(GameError::InvalidDictionary {
                reason: "dictionary has no words".to_string(),
            });
        }

        let entries = entries
            .into_iter()
            .map(|entry| {
                let word = entry.word.trim().to_ascii_uppercase();
                if !is_valid_word(&word) {
                    return Err(GameError::InvalidDictionary {
                        reason: format!("{:?} is not an alphabetic word", entry.word),
                    });
                }
                Ok(WordEntry {
                    word,
                    hint: entry.hint,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// Uniformly random entry; repeats across calls are allowed.
    pub fn pick_random_word(&self) -> &WordEntry {
        // Construction guarantees at least one entry.
        let index = rand::thread_rng().gen_range(0..self.entries.len());
        &self.entries[index]
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Non-empty and made of uppercase ASCII letters only.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase())
}
