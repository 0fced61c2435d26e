use crate::debug_log;
use crate::game_state::{GameInterface, QUIT_COMMAND, SessionHeader};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Guess the secret country in as few attempts as you can
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of countries (default: built-in list)
    #[arg(short = 'w', long = "words")]
    pub words_path: Option<PathBuf>,

    /// Directory holding the high score file and session logs
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// High score file (default: <data-dir>/highscore.txt)
    #[arg(long = "high-score")]
    pub high_score_path: Option<PathBuf>,

    /// Session log directory (default: <data-dir>/logs)
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,

    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for choosing the secret, for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Forget the stored best score before playing (also replaces a corrupt record)
    #[arg(long)]
    pub reset_score: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Feedback text shared by both frontends

#[must_use]
pub fn title_message() -> String {
    format!("LUCKY VAULT - COUNTRY MODE. Type {QUIT_COMMAND} to exit.")
}

#[must_use]
pub fn best_message(best: Option<u32>) -> String {
    match best {
        Some(best) => format!("Current best: {best} attempts"),
        None => "Current best: —".to_string(),
    }
}

#[must_use]
pub fn wrong_length_message(actual: usize, required: usize) -> String {
    format!("Wrong length ({actual}). Need {required}.")
}

#[must_use]
pub fn matches_message(count: usize) -> String {
    format!("Not it. {count} letter(s) correct (right position).")
}

#[must_use]
pub fn win_message(attempts: u32, secret: &str) -> String {
    format!("Correct in {attempts} attempts! Word was: {secret}")
}

pub const EMPTY_GUESS_MESSAGE: &str = "Empty guess. Try again.";
pub const NEW_BEST_MESSAGE: &str = "NEW BEST for COUNTRY mode!";
pub const FAREWELL_MESSAGE: &str = "Bye!";
pub const PROMPT: &str = "Your guess: ";

/// Line-based frontend: reads guesses from `reader`, writes feedback to
/// `writer` (stdin/stdout in the binary, buffers in tests).
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug_log!("Failed to write to console: {}", e);
        }
    }

    fn prompt(&mut self) {
        let result = write!(self.writer, "{PROMPT}").and_then(|()| self.writer.flush());
        if let Err(e) = result {
            debug_log!("Failed to write prompt: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_header(&mut self, header: &SessionHeader) {
        self.emit(&title_message());
        self.emit(&format!("Secret word length: {}", header.secret_length));
        self.emit(&best_message(header.best));
    }

    fn read_guess(&mut self) -> Option<String> {
        self.prompt();
        // Invalid UTF-8 is replaced, so the line still counts as a guess.
        let mut input = Vec::new();
        match self.reader.read_until(b'\n', &mut input) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8_lossy(&input).into_owned()),
            Err(e) => {
                log::warn!("Failed to read guess: {e}");
                None
            }
        }
    }

    fn display_empty_guess(&mut self) {
        self.emit(EMPTY_GUESS_MESSAGE);
    }

    fn display_wrong_length(&mut self, actual: usize, required: usize) {
        self.emit(&wrong_length_message(actual, required));
    }

    fn display_matches(&mut self, count: usize) {
        self.emit(&matches_message(count));
    }

    fn display_win(&mut self, attempts: u32, secret: &str) {
        self.emit(&win_message(attempts, secret));
    }

    fn display_new_best(&mut self) {
        self.emit(NEW_BEST_MESSAGE);
    }

    fn display_farewell(&mut self) {
        self.emit(FAREWELL_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn interface(input: &str) -> CliInterface<Cursor<&str>, Vec<u8>> {
        CliInterface::new(Cursor::new(input), Vec::new())
    }

    fn output(interface: CliInterface<Cursor<&str>, Vec<u8>>) -> String {
        String::from_utf8(interface.into_writer()).unwrap()
    }

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::parse_from(["lucky-vault"]);
        assert_eq!(cli.words_path, None);
        assert_eq!(cli.data_dir, None);
        assert!(!cli.tui);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_parse_cli_with_words_path() {
        let cli = Cli::parse_from(["lucky-vault", "--words", "custom.txt"]);
        assert_eq!(cli.words_path, Some(PathBuf::from("custom.txt")));
    }

    #[test]
    fn test_parse_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["lucky-vault", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_header_with_best() {
        let mut cli = interface("");
        cli.display_header(&SessionHeader {
            secret_length: 6,
            best: Some(3),
        });
        assert_eq!(
            output(cli),
            "LUCKY VAULT - COUNTRY MODE. Type QUIT to exit.\n\
             Secret word length: 6\n\
             Current best: 3 attempts\n"
        );
    }

    #[test]
    fn test_header_without_best() {
        let mut cli = interface("");
        cli.display_header(&SessionHeader {
            secret_length: 4,
            best: None,
        });
        assert!(output(cli).ends_with("Current best: —\n"));
    }

    #[test]
    fn test_read_guess_returns_raw_line() {
        let mut cli = interface("  peru \nchad\n");
        assert_eq!(cli.read_guess(), Some("  peru \n".to_string()));
        assert_eq!(cli.read_guess(), Some("chad\n".to_string()));
        assert_eq!(cli.read_guess(), None);
        assert_eq!(output(cli), "Your guess: Your guess: Your guess: ");
    }

    #[test]
    fn test_read_guess_last_line_without_newline() {
        let mut cli = interface("QUIT");
        assert_eq!(cli.read_guess(), Some("QUIT".to_string()));
    }

    #[test]
    fn test_read_guess_invalid_utf8_is_still_a_guess() {
        let input: &[u8] = b"P\xffRU\nPERU\n";
        let mut cli = CliInterface::new(Cursor::new(input), Vec::new());
        assert_eq!(cli.read_guess(), Some("P\u{FFFD}RU\n".to_string()));
        assert_eq!(cli.read_guess(), Some("PERU\n".to_string()));
        assert_eq!(cli.read_guess(), None);
    }

    #[test]
    fn test_feedback_lines() {
        let mut cli = interface("");
        cli.display_empty_guess();
        cli.display_wrong_length(5, 4);
        cli.display_matches(2);
        cli.display_win(2, "PERU");
        cli.display_new_best();
        cli.display_farewell();
        assert_eq!(
            output(cli),
            "Empty guess. Try again.\n\
             Wrong length (5). Need 4.\n\
             Not it. 2 letter(s) correct (right position).\n\
             Correct in 2 attempts! Word was: PERU\n\
             NEW BEST for COUNTRY mode!\n\
             Bye!\n"
        );
    }
}
