// Library interface for lucky-vault
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod error;
pub mod game_state;
pub mod highscore;
pub mod logging;
pub mod session_log;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use config::GameConfig;
pub use error::{Result, ValidationError};
pub use game_state::{
    GameInterface, GameSession, Outcome, QUIT_COMMAND, SessionHeader, SessionState,
    SessionSummary, count_matches, game_loop, play,
};
pub use highscore::ScoreStore;
pub use session_log::{SessionLog, SessionLogWriter};
pub use wordbank::WordBank;
