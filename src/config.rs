use crate::cli::Cli;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "lucky-vault";
const FALLBACK_DATA_DIR: &str = "data";
const HIGH_SCORE_FILE_NAME: &str = "highscore.txt";
const LOG_DIR_NAME: &str = "logs";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// `None` means the embedded country list.
    pub words_path: Option<PathBuf>,
    pub high_score_path: PathBuf,
    pub log_dir: PathBuf,
    pub use_tui: bool,
    pub seed: Option<u64>,
    pub reset_score: bool,
}

impl GameConfig {
    /// Defaults rooted at `data_dir`.
    #[must_use]
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            words_path: None,
            high_score_path: data_dir.join(HIGH_SCORE_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            use_tui: false,
            seed: None,
            reset_score: false,
        }
    }

    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
        let mut config = Self::with_data_dir(&data_dir);

        config.words_path.clone_from(&cli.words_path);
        if let Some(path) = &cli.high_score_path {
            config.high_score_path.clone_from(path);
        }
        if let Some(dir) = &cli.log_dir {
            config.log_dir.clone_from(dir);
        }
        config.use_tui = cli.tui;
        config.seed = cli.seed;
        config.reset_score = cli.reset_score;
        config
    }
}

/// Platform data directory (e.g. `~/.local/share/lucky-vault`), or `./data`
/// when the platform has none.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(FALLBACK_DATA_DIR),
        |dir| dir.join(APP_DIR_NAME),
    )
}
