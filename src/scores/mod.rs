pub mod high_scores;

pub use high_scores::{HighScores, ScoreTable};
