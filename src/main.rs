use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_arcade::game::{Difficulty, GameConfig, GameMode};
use snake_arcade::render::Theme;
use snake_arcade::runner::TerminalRunner;
use snake_arcade::scores::HighScores;
use snake_arcade::session::App;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Game mode preselected in the menu
    #[arg(long)]
    mode: Option<ModeArg>,

    /// Difficulty preselected in the menu
    #[arg(long)]
    difficulty: Option<DifficultyArg>,

    /// Colour theme
    #[arg(long, default_value = "jungle")]
    theme: ThemeArg,

    /// Where best scores are kept
    #[arg(long, default_value = "snake_highscores.json")]
    scores_file: PathBuf,

    /// Log output file
    #[arg(long, default_value = "snake_arcade.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Walls are lethal
    Classic,
    /// Edges wrap and eaten food leaves obstacles
    Adventure,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Jungle,
    Neon,
    Mono,
}

impl From<ModeArg> for GameMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Classic => GameMode::Classic,
            ModeArg::Adventure => GameMode::Adventure,
        }
    }
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Jungle => Theme::Jungle,
            ThemeArg::Neon => Theme::Neon,
            ThemeArg::Mono => Theme::Mono,
        }
    }
}

impl Cli {
    /// Start from the config file (or defaults) and apply explicit flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config from {:?}", path))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse config in {:?}", path))?
            }
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }

        Ok(config.sanitized())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    snake_arcade::logging::init(&cli.log_file)?;

    let config = cli.game_config()?;
    info!(?config, "starting");

    let scores = HighScores::load(&cli.scores_file);
    let app = App::new(config, cli.theme.into(), scores);

    let mut runner = TerminalRunner::new(app);
    runner.run().await?;

    Ok(())
}
