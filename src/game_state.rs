use crate::config::GameConfig;
use crate::error::{Result, ValidationError};
use crate::highscore::ScoreStore;
use crate::session_log::{SessionLog, SessionLogWriter};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use rand::Rng;
use std::fmt;
use std::path::PathBuf;

/// Typing this (in any case) ends the session without a win.
pub const QUIT_COMMAND: &str = "QUIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingGuess,
    Won,
    Quit,
}

impl SessionState {
    #[must_use]
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::AwaitingGuess)
    }
}

/// What one submitted line amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Empty,
    Quit,
    WrongLength { actual: usize, required: usize },
    Matches(usize),
    Correct { attempts: u32, new_best: bool },
}

/// The transcript tag for the outcome.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Quit => f.write_str("quit"),
            Self::WrongLength { .. } => f.write_str("wrong_length"),
            Self::Matches(count) => write!(f, "matches={count}"),
            Self::Correct { attempts, .. } => write!(f, "CORRECT in {attempts}"),
        }
    }
}

/// What a frontend shows before the first guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    pub secret_length: usize,
    pub best: Option<u32>,
}

/// Console surface used by the game loop.
pub trait GameInterface {
    fn display_header(&mut self, header: &SessionHeader);
    /// The next raw line typed by the player, or `None` once input is exhausted.
    fn read_guess(&mut self) -> Option<String>;
    fn display_empty_guess(&mut self);
    fn display_wrong_length(&mut self, actual: usize, required: usize);
    fn display_matches(&mut self, count: usize);
    fn display_win(&mut self, attempts: u32, secret: &str);
    fn display_new_best(&mut self);
    fn display_farewell(&mut self);
    /// Called once after the loop ends and everything has been saved.
    fn display_game_over(&mut self, _summary: &SessionSummary) {}
}

/// Number of positions where both words hold the same letter, ignoring ASCII
/// case. Only meaningful for words of equal length.
#[must_use]
pub fn count_matches(secret: &str, guess: &str) -> usize {
    secret
        .chars()
        .zip(guess.chars())
        .filter(|(s, g)| s.eq_ignore_ascii_case(g))
        .count()
}

/// One game: the secret, the attempts spent on it and the running transcript.
#[derive(Debug)]
pub struct GameSession {
    secret: String,
    secret_length: usize,
    attempts: u32,
    best: Option<u32>,
    state: SessionState,
    log: SessionLog,
}

impl GameSession {
    pub fn new(secret: impl Into<String>, best: Option<u32>) -> Self {
        let secret = secret.into();
        let secret_length = secret.chars().count();
        Self {
            secret,
            secret_length,
            attempts: 0,
            best,
            state: SessionState::AwaitingGuess,
            log: SessionLog::new(),
        }
    }

    /// Pick the secret from `words` and start a session against `best`.
    pub fn start<R: Rng + ?Sized>(words: &WordBank, best: Option<u32>, rng: &mut R) -> Self {
        let secret = words.pick_random(rng);
        debug_log!("Secret selected ({} letters)", secret.chars().count());
        Self::new(secret, best)
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[must_use]
    pub fn secret_length(&self) -> usize {
        self.secret_length
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.best
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    #[must_use]
    pub fn header(&self) -> SessionHeader {
        SessionHeader {
            secret_length: self.secret_length,
            best: self.best,
        }
    }

    /// Evaluate one raw input line and advance the state machine. Every call
    /// adds exactly one record to the transcript.
    pub fn submit(&mut self, raw: &str) -> Result<Outcome> {
        if self.state.is_finished() {
            return Err(ValidationError::new(
                "Cannot submit a guess to a finished session.",
            ));
        }

        let guess = raw.trim();
        let outcome = self.evaluate(guess);
        debug_log!(
            "Guess '{}' -> {} (attempts={}, state={:?})",
            guess,
            outcome,
            self.attempts,
            self.state
        );
        self.log.append(guess, &outcome);
        Ok(outcome)
    }

    /// End the session because input ran out; recorded like a typed quit.
    pub fn abandon(&mut self) -> Outcome {
        if !self.state.is_finished() {
            self.state = SessionState::Quit;
            self.log.append("", Outcome::Quit);
        }
        Outcome::Quit
    }

    fn evaluate(&mut self, guess: &str) -> Outcome {
        if guess.is_empty() {
            return Outcome::Empty;
        }

        if guess.eq_ignore_ascii_case(QUIT_COMMAND) {
            self.state = SessionState::Quit;
            return Outcome::Quit;
        }

        self.attempts += 1;

        let actual = guess.chars().count();
        if actual != self.secret_length {
            return Outcome::WrongLength {
                actual,
                required: self.secret_length,
            };
        }

        if guess.eq_ignore_ascii_case(&self.secret) {
            let new_best = self.best.is_none_or(|best| self.attempts < best);
            if new_best {
                self.best = Some(self.attempts);
            }
            self.state = SessionState::Won;
            return Outcome::Correct {
                attempts: self.attempts,
                new_best,
            };
        }

        Outcome::Matches(count_matches(&self.secret, guess))
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub state: SessionState,
    pub secret: String,
    pub attempts: u32,
    pub log_path: PathBuf,
}

/// Drive `session` to a terminal state through `interface`, then save any
/// new best to `scores` and the transcript through `logs`.
///
/// A failed score write aborts before the transcript is written.
pub fn game_loop<I: GameInterface + ?Sized>(
    session: &mut GameSession,
    interface: &mut I,
    scores: &ScoreStore,
    logs: &SessionLogWriter,
) -> Result<SessionSummary> {
    interface.display_header(&session.header());

    while !session.state().is_finished() {
        let outcome = match interface.read_guess() {
            Some(line) => session.submit(&line)?,
            None => {
                info_log!("Input closed, ending session");
                session.abandon()
            }
        };

        match outcome {
            Outcome::Empty => interface.display_empty_guess(),
            Outcome::Quit => interface.display_farewell(),
            Outcome::WrongLength { actual, required } => {
                interface.display_wrong_length(actual, required);
            }
            Outcome::Matches(count) => interface.display_matches(count),
            Outcome::Correct { attempts, new_best } => {
                interface.display_win(attempts, session.secret());
                if new_best {
                    interface.display_new_best();
                    scores.write(attempts)?;
                }
            }
        }
    }

    let log_path = logs.write(session.log())?;
    let summary = SessionSummary {
        state: session.state(),
        secret: session.secret().to_string(),
        attempts: session.attempts(),
        log_path,
    };
    info_log!(
        "Session ended {:?} after {} attempts",
        summary.state,
        summary.attempts
    );
    interface.display_game_over(&summary);
    Ok(summary)
}

/// Load everything `config` points at, pick a secret and play one session.
pub fn play<I, R>(config: &GameConfig, interface: &mut I, rng: &mut R) -> Result<SessionSummary>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let words = match &config.words_path {
        Some(path) => WordBank::load_from_file(path)?,
        None => WordBank::embedded()?,
    };
    let scores = if config.reset_score {
        ScoreStore::init_unset(&config.high_score_path)?
    } else {
        ScoreStore::load_or_init(&config.high_score_path)?
    };
    let logs = SessionLogWriter::new(&config.log_dir)?;

    let best = scores.read()?;
    let mut session = GameSession::start(&words, best, rng);
    game_loop(&mut session, interface, &scores, &logs)
}
