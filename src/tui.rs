//! TUI (Terminal User Interface) frontend for Lucky Vault
//!
//! Renders the session with Ratatui instead of printing lines.
//!
//! # Layout
//! Title, header (secret length and current best), guess history with the
//! feedback for each guess, the input line, then a status line.
//!
//! # Input
//! Typing edits the current guess, ENTER submits it (an empty guess is
//! submitted too), ESC or CTRL-C submits the quit command.

use crate::cli::{
    EMPTY_GUESS_MESSAGE, FAREWELL_MESSAGE, NEW_BEST_MESSAGE, best_message, matches_message,
    title_message, win_message, wrong_length_message,
};
use crate::game_state::{GameInterface, QUIT_COMMAND, SessionHeader, SessionState, SessionSummary};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_INPUT_CHARS: usize = 64;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Gray);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FeedbackKind {
    Notice,
    Miss,
    Win,
    NewBest,
}

impl FeedbackKind {
    fn style(self) -> Style {
        match self {
            Self::Notice => ERROR_STYLE,
            Self::Miss => INFO_STYLE,
            Self::Win | Self::NewBest => SUCCESS_STYLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryEntry {
    guess: String,
    feedback: String,
    kind: FeedbackKind,
}

impl HistoryEntry {
    fn text(&self) -> String {
        if self.guess.is_empty() {
            format!("  {}", self.feedback)
        } else {
            format!("  {:<16} {}", self.guess, self.feedback)
        }
    }
}

/// Printable characters only; terminal noise (control codes, replacement
/// characters from escape sequences) is dropped.
fn is_input_char(c: char) -> bool {
    c != '\u{FFFD}' && !c.is_control()
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Apply one key press to the input line. Returns the submitted line when
/// the key completes a guess.
fn apply_key(input: &mut String, key: KeyEvent) -> Option<String> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(QUIT_COMMAND.to_string());
    }

    match key.code {
        KeyCode::Esc => Some(QUIT_COMMAND.to_string()),
        KeyCode::Enter => Some(std::mem::take(input)),
        KeyCode::Backspace => {
            input.pop();
            None
        }
        KeyCode::Char(c)
            if is_input_char(c)
                && !has_modifier_keys(&key)
                && input.chars().count() < MAX_INPUT_CHARS =>
        {
            input.push(c);
            None
        }
        _ => {
            debug_log!("apply_key() - Ignoring key: {:?}", key.code);
            None
        }
    }
}

/// Full-screen frontend. Restores the terminal when dropped.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    header: Option<SessionHeader>,
    history: Vec<HistoryEntry>,
    current_input: String,
    last_guess: String,
    status: String,
    finished: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            header: None,
            history: Vec::new(),
            current_input: String::new(),
            last_guess: String::new(),
            status: "Ready".to_string(),
            finished: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let header = self.header.clone();
        let history = &self.history;
        let input = &self.current_input;
        let status = &self.status;
        let finished = self.finished;
        self.terminal.draw(|f| {
            Self::render(f, header.as_ref(), history, input, status, finished);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render(
        f: &mut Frame,
        header: Option<&SessionHeader>,
        history: &[HistoryEntry],
        input: &str,
        status: &str,
        finished: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Header
                Constraint::Min(5),    // History
                Constraint::Length(3), // Input
                Constraint::Length(3), // Status
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_header(f, chunks[1], header);
        Self::render_history(f, chunks[2], history);
        Self::render_input(f, chunks[3], input, finished);
        Self::render_status(f, chunks[4], status);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new(title_message())
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_header(f: &mut Frame, area: Rect, header: Option<&SessionHeader>) {
        let lines = match header {
            Some(header) => vec![
                Line::from(format!("Secret word length: {}", header.secret_length)),
                Line::from(best_message(header.best)),
            ],
            None => vec![Line::from("Choosing a country...")],
        };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Vault").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_history(f: &mut Frame, area: Rect, history: &[HistoryEntry]) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let visible = block.inner(area).height as usize;
        // Keep the most recent guesses on screen.
        let skip = history.len().saturating_sub(visible);
        let lines: Vec<Line> = history
            .iter()
            .skip(skip)
            .map(|entry| Line::from(Span::styled(entry.text(), entry.kind.style())))
            .collect();
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, input: &str, finished: bool) {
        let line = if finished {
            Line::from(Span::styled("Game over", MESSAGE_STYLE))
        } else {
            Line::from(vec![
                Span::raw("> "),
                Span::styled(input.to_string(), Style::default().fg(Color::White)),
                Span::styled("_", MESSAGE_STYLE),
            ])
        };
        let paragraph = Paragraph::new(line)
            .block(Block::default().title("Your guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let paragraph = Paragraph::new(status.to_string())
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Block until the next key press; other terminal events are skipped.
    fn next_key() -> Result<KeyEvent, io::Error> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(key);
            }
        }
    }

    fn push_feedback(&mut self, feedback: String, kind: FeedbackKind) {
        let guess = std::mem::take(&mut self.last_guess);
        self.history.push(HistoryEntry {
            guess,
            feedback,
            kind,
        });
        self.draw_or_log();
    }
}

impl GameInterface for TuiInterface {
    fn display_header(&mut self, header: &SessionHeader) {
        self.header = Some(header.clone());
        self.status = format!("Type a country and press ENTER | ESC: {QUIT_COMMAND}");
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<String> {
        loop {
            if let Err(e) = self.draw() {
                debug_log!("read_guess() - Draw failed: {}", e);
                return None;
            }

            let key = match Self::next_key() {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("Failed to read key: {e}");
                    return None;
                }
            };

            if let Some(line) = apply_key(&mut self.current_input, key) {
                info_log!("read_guess() - Submitted '{}'", line);
                self.last_guess = line.trim().to_string();
                return Some(line);
            }
        }
    }

    fn display_empty_guess(&mut self) {
        self.push_feedback(EMPTY_GUESS_MESSAGE.to_string(), FeedbackKind::Notice);
    }

    fn display_wrong_length(&mut self, actual: usize, required: usize) {
        self.push_feedback(wrong_length_message(actual, required), FeedbackKind::Notice);
    }

    fn display_matches(&mut self, count: usize) {
        self.push_feedback(matches_message(count), FeedbackKind::Miss);
    }

    fn display_win(&mut self, attempts: u32, secret: &str) {
        self.push_feedback(win_message(attempts, secret), FeedbackKind::Win);
    }

    fn display_new_best(&mut self) {
        self.push_feedback(NEW_BEST_MESSAGE.to_string(), FeedbackKind::NewBest);
    }

    fn display_farewell(&mut self) {
        self.push_feedback(FAREWELL_MESSAGE.to_string(), FeedbackKind::Notice);
    }

    fn display_game_over(&mut self, summary: &SessionSummary) {
        self.finished = true;
        self.status = match summary.state {
            SessionState::Won => format!(
                "Won in {} attempts. Log saved to {} | Press any key to exit",
                summary.attempts,
                summary.log_path.display()
            ),
            _ => format!(
                "Log saved to {} | Press any key to exit",
                summary.log_path.display()
            ),
        };
        self.draw_or_log();
        if let Err(e) = Self::next_key() {
            debug_log!("display_game_over() - Input error: {}", e);
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
