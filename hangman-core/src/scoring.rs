pub struct ScoringEngine;

impl ScoringEngine {
    /// Points per letter of the solved word.
    pub const POINTS_PER_LETTER: i32 = 10;
    /// Points per life left when the word is solved.
    pub const POINTS_PER_LIFE: i32 = 5;

    /// Score awarded for solving `word_length` letters with `lives` left.
    pub fn win_score(word_length: usize, lives: u8) -> i32 {
        word_length as i32 * Self::POINTS_PER_LETTER + i32::from(lives) * Self::POINTS_PER_LIFE
    }
}
