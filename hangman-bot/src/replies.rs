//! Reply texts. Every reply carries a rich rendering and a plain one with
//! emoji and markup replaced by textual labels.

use hangman_core::{GameSession, RenderMode, render};
use hangman_types::{InboundMessage, LeaderboardEntry, OutgoingMessage, PlayerRecord};

pub const GENERIC_ERROR: &str = "⚠️ An error occurred. Please try again or /start a new game.";
const GENERIC_ERROR_PLAIN: &str = "An error occurred. Please try again or /start a new game.";

pub fn game_started(message: &InboundMessage, session: &GameSession) -> OutgoingMessage {
    let letters = session.word().len();
    OutgoingMessage::markdown(
        format!(
            "🎮 *Hangman Game Started!* {}\n📏 Word has {} letters\n💡 Hint: {}",
            message.sender_mention(),
            letters,
            session.hint()
        ),
        format!(
            "Hangman Game Started! {}\nWord has {} letters\nHint: {}",
            message.sender_name,
            letters,
            session.hint()
        ),
    )
}

pub fn game_state(session: &GameSession) -> OutgoingMessage {
    OutgoingMessage::plain(
        render(session, RenderMode::Rich),
        render(session, RenderMode::Plain),
    )
}

pub fn guess_feedback(correct: bool) -> OutgoingMessage {
    if correct {
        OutgoingMessage::plain("✅ Correct guess!", "Correct guess!")
    } else {
        OutgoingMessage::plain("❌ Incorrect guess!", "Incorrect guess!")
    }
}

pub fn invalid_guess() -> OutgoingMessage {
    OutgoingMessage::text("Please enter a single letter!")
}

pub fn duplicate_guess() -> OutgoingMessage {
    OutgoingMessage::text("You already guessed that letter!")
}

pub fn no_active_game() -> OutgoingMessage {
    OutgoingMessage::text("Type /start to begin a new game!")
}

pub fn game_already_over() -> OutgoingMessage {
    OutgoingMessage::text("That game is over. Type /start to play again!")
}

pub fn game_won(word: &str, score: i32) -> OutgoingMessage {
    OutgoingMessage::markdown(
        format!(
            "🎉 *You won!* The word was: {}\n🏆 Score: +{} points!\nPlay again with /start\nCheck /stats for your progress",
            word, score
        ),
        format!(
            "You won! The word was: {}\nScore: +{} points!\nPlay again with /start\nCheck /stats for your progress",
            word, score
        ),
    )
}

pub fn game_lost(word: &str) -> OutgoingMessage {
    OutgoingMessage::markdown(
        format!(
            "💀 *Game Over!* The word was: {}\n\nPlay again with /start\nCheck /stats for your progress",
            word
        ),
        format!(
            "Game Over! The word was: {}\n\nPlay again with /start\nCheck /stats for your progress",
            word
        ),
    )
}

pub fn score_not_saved() -> OutgoingMessage {
    OutgoingMessage::plain(
        "🚨 Couldn't save your score this time.",
        "Couldn't save your score this time.",
    )
}

pub fn stats(message: &InboundMessage, record: &PlayerRecord) -> OutgoingMessage {
    let percentage = record.win_percentage();
    OutgoingMessage::markdown(
        format!(
            "📊 *Your Stats* {}\n\n🎮 Games Played: {}\n🏆 Games Won: {} ({:.1}%)\n⭐ Total Score: {}\n\nCheck /leaderboard for top players",
            message.sender_mention(),
            record.games_played,
            record.games_won,
            percentage,
            record.total_score
        ),
        format!(
            "Your Stats {}\n\nGames Played: {}\nGames Won: {} ({:.1}%)\nTotal Score: {}\n\nCheck /leaderboard for top players",
            message.sender_name,
            record.games_played,
            record.games_won,
            percentage,
            record.total_score
        ),
    )
}

pub fn no_stats_yet() -> OutgoingMessage {
    OutgoingMessage::text("You haven't played any games yet! Type /start to begin.")
}

pub fn stats_unavailable() -> OutgoingMessage {
    OutgoingMessage::plain(
        "🚨 Couldn't fetch your stats. Please try again.",
        "Couldn't fetch your stats. Please try again.",
    )
}

pub fn leaderboard(entries: &[LeaderboardEntry]) -> OutgoingMessage {
    let lines: String = entries
        .iter()
        .map(|entry| {
            format!(
                "{}. {}: {} pts ({} wins)\n",
                entry.rank, entry.player.display_name, entry.player.total_score, entry.player.games_won
            )
        })
        .collect();

    OutgoingMessage::markdown(
        format!("🏆 *Top Players* 🏆\n\n{}", lines),
        format!("Top Players\n\n{}", lines),
    )
}

pub fn empty_leaderboard() -> OutgoingMessage {
    OutgoingMessage::text("No players yet! Be the first with /start")
}

pub fn leaderboard_unavailable() -> OutgoingMessage {
    OutgoingMessage::plain(
        "🚨 Couldn't fetch leaderboard. Please try again.",
        "Couldn't fetch leaderboard. Please try again.",
    )
}

pub fn stats_disabled() -> OutgoingMessage {
    OutgoingMessage::text("Score tracking is disabled on this bot.")
}

pub fn help() -> OutgoingMessage {
    OutgoingMessage::markdown(
        "🆘 *Hangman Bot Help*\n\n\
         🔹 /start - Begin new game\n\
         🔹 /stats - View your statistics\n\
         🔹 /leaderboard - See top players\n\
         🔹 /help - Show this message\n\n\
         How to play:\n\
         1. Guess letters one at a time\n\
         2. Solve the word before the hangman is complete\n\
         3. Earn more points for longer words and remaining lives",
        "Hangman Bot Help\n\n\
         /start - Begin new game\n\
         /stats - View your statistics\n\
         /leaderboard - See top players\n\
         /help - Show this message\n\n\
         How to play:\n\
         1. Guess letters one at a time\n\
         2. Solve the word before the hangman is complete\n\
         3. Earn more points for longer words and remaining lives",
    )
}

pub fn unknown_command() -> OutgoingMessage {
    OutgoingMessage::text("Unknown command. Type /help for the list of commands.")
}

pub fn generic_error() -> OutgoingMessage {
    OutgoingMessage::plain(GENERIC_ERROR, GENERIC_ERROR_PLAIN)
}
