//! Static achievement catalog.

use super::types::{AchievementDef, AchievementId, AchievementKind};

macro_rules! def {
    ($kind:ident, $req:expr, $name:expr, $desc:expr, $icon:expr) => {
        AchievementDef {
            id: AchievementId {
                kind: AchievementKind::$kind,
                requirement: $req,
            },
            name: $name,
            description: $desc,
            icon: $icon,
        }
    };
}

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // Games played
    def!(GamesPlayed, 1, "First Round", "Finish your first game", "🎮"),
    def!(GamesPlayed, 10, "Regular", "Finish 10 games", "🎮"),
    def!(GamesPlayed, 50, "Dedicated", "Finish 50 games", "🎮"),
    def!(GamesPlayed, 250, "Obsessed", "Finish 250 games", "🎮"),
    // High score
    def!(HighScore, 100, "Warming Up", "Score 100 in one game", "🏆"),
    def!(HighScore, 300, "Sharpshooter", "Score 300 in one game", "🏆"),
    def!(HighScore, 600, "Deadeye", "Score 600 in one game", "🏆"),
    def!(HighScore, 1_000, "Untouchable", "Score 1,000 in one game", "🏆"),
    // Streaks
    def!(Streak, 10, "On a Roll", "Hit 10 targets in a row", "🔥"),
    def!(Streak, 25, "Unstoppable", "Hit 25 targets in a row", "🔥"),
    def!(Streak, 50, "Machine", "Hit 50 targets in a row", "🔥"),
    // Multiplier (requirement in tenths)
    def!(Multiplier, 20, "Doubling Down", "Reach a 2.0x multiplier", "✦"),
    def!(Multiplier, 30, "Maxed Out", "Reach the 3.0x multiplier cap", "✦"),
    // Perfect games
    def!(PerfectGames, 1, "Flawless", "Finish a game without losing a life", "💎"),
    def!(PerfectGames, 10, "Perfectionist", "Finish 10 perfect games", "💎"),
    // Level
    def!(Level, 5, "Apprentice", "Reach level 5", "⭐"),
    def!(Level, 10, "Veteran", "Reach level 10", "⭐"),
    def!(Level, 20, "Grandmaster", "Reach level 20", "⭐"),
    // Skill rating
    def!(SkillRating, 500, "Rising Star", "Reach a skill rating of 500", "📈"),
    def!(SkillRating, 800, "Elite", "Reach a skill rating of 800", "📈"),
];
