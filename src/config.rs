use crate::round::DEFAULT_MAX_INCORRECT_GUESSES;
use std::path::PathBuf;

const APP_DIR: &str = "hangman";
const WORDS_FILE: &str = "words.txt";
const STATS_FILE: &str = "stats.txt";

/// Where the game keeps its files and how forgiving a round is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub words_path: PathBuf,
    pub stats_path: PathBuf,
    pub max_incorrect: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        let dir = data_dir();
        Self {
            words_path: dir.join(WORDS_FILE),
            stats_path: dir.join(STATS_FILE),
            max_incorrect: DEFAULT_MAX_INCORRECT_GUESSES,
        }
    }
}

/// Per-user data directory for the game, or the working directory on
/// platforms without one.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(PathBuf::new, |dir| dir.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_share_directory() {
        let config = GameConfig::default();
        assert_eq!(config.words_path.parent(), config.stats_path.parent());
        assert!(config.words_path.ends_with(WORDS_FILE));
        assert!(config.stats_path.ends_with(STATS_FILE));
        assert_eq!(config.max_incorrect, 6);
    }
}
