//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface` implements [`GameInterface`], so the same [`crate::session::Session`]
//!   drives it as the line-based CLI.
//! - Every prompt is a single edited line; input is parsed by the shared
//!   helpers in [`crate::cli`].
//!
//! # Layout
//! Title, current round (mask, guessed letters, misses), information panel
//! (menu, stats, messages), input line and status bar.

use crate::cli::{
    DONE_KEYWORD, MENU_LINES, attempts_line, guess_result_message, guessed_letters_line,
    parse_guess_input, parse_menu_input, parse_word_input, round_over_message, stats_lines,
};
use crate::error::{GuessError, RejectReason};
use crate::round::{GameRound, GuessResult};
use crate::session::{GameInterface, GuessInput, MenuChoice, MenuInput, StatsView, WordInput};
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

const MAX_INPUT_LENGTH: usize = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MASK_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Result of feeding one key press to the input line.
#[derive(Debug, PartialEq, Eq)]
enum InputStep {
    Pending,
    Submit(String),
    Cancel,
}

/// Apply `key` to the line being edited.
fn edit_input(input: &mut String, key: KeyEvent) -> InputStep {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputStep::Cancel;
    }
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        return InputStep::Pending;
    }
    match key.code {
        KeyCode::Char(c) if input.chars().count() < MAX_INPUT_LENGTH && !c.is_control() => {
            input.push(c);
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Enter => return InputStep::Submit(std::mem::take(input)),
        KeyCode::Esc => return InputStep::Cancel,
        _ => {}
    }
    InputStep::Pending
}

/// Snapshot of the round panel, refreshed whenever the session shows the round.
#[derive(Debug, Default)]
struct RoundPanel {
    mask: String,
    guessed: String,
    attempts: String,
}

impl RoundPanel {
    fn from_round(round: &GameRound) -> Self {
        Self {
            mask: round.masked_word(),
            guessed: guessed_letters_line(round),
            attempts: attempts_line(round),
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    round: Option<&'a RoundPanel>,
    info: &'a [String],
    message: &'a str,
    error_message: &'a str,
    prompt: &'a str,
    current_input: &'a str,
    status: &'a str,
}

/// Full-screen [`GameInterface`].
///
/// Manages terminal rendering, line input and the panels shown between prompts.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round: Option<RoundPanel>,
    info: Vec<String>,
    message: String,
    error_message: String,
    prompt: String,
    current_input: String,
    status: String,
}

impl TuiInterface {
    /// Switch the terminal to raw mode on the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            round: None,
            info: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            prompt: String::new(),
            current_input: String::new(),
            status: "Ready".to_string(),
        })
    }

    /// Restore the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be left.
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
        let ctx = RenderContext {
            round: self.round.as_ref(),
            info: &self.info,
            message: &self.message,
            error_message: &self.error_message,
            prompt: &self.prompt,
            current_input: &self.current_input,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Round
                Constraint::Min(8),    // Info panel (takes remaining space)
                Constraint::Length(3), // Input
                Constraint::Length(3), // Status line
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_round(f, chunks[1], ctx.round);
        Self::render_info(f, chunks[2], ctx.info, ctx.message, ctx.error_message);
        Self::render_input(f, chunks[3], ctx.prompt, ctx.current_input);
        Self::render_status(f, chunks[4], ctx.status);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_round(f: &mut Frame, area: Rect, round: Option<&RoundPanel>) {
        let lines = match round {
            Some(panel) => vec![
                Line::from(Span::styled(format!("  {}", panel.mask), MASK_STYLE)),
                Line::from(format!("  {}", panel.guessed)),
                Line::from(format!("  {}", panel.attempts)),
            ],
            None => vec![Line::from("  No round in progress")],
        };
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Round").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, info: &[String], message: &str, error_message: &str) {
        let mut lines: Vec<Line> = info.iter().map(|l| Line::from(l.as_str())).collect();

        if !message.is_empty() {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, prompt: &str, current_input: &str) {
        let line = Line::from(vec![
            Span::styled(format!("{prompt} "), SUCCESS_STYLE),
            Span::raw(current_input),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Input (ENTER: submit | ESC: back)"),
        );
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Collect one line of input. `None` means the player cancelled.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompt = prompt.to_string();
        self.current_input.clear();
        loop {
            if self.draw().is_err() {
                info_log!("read_line() - Draw failed, cancelling input");
                return None;
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("Failed to read terminal event: {e}");
                    return None;
                }
            };
            let key = match event {
                Event::Key(key) => key,
                other => {
                    debug_log!("read_line() - Ignoring event: {:?}", other);
                    continue;
                }
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match edit_input(&mut self.current_input, key) {
                InputStep::Pending => {}
                InputStep::Submit(line) => {
                    debug_log!("read_line() - Submitted '{}'", line);
                    self.error_message.clear();
                    return Some(line);
                }
                InputStep::Cancel => {
                    debug_log!("read_line() - Cancelled");
                    return None;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self) {
        self.message = "Welcome to Hangman! Choose an option to continue.".to_string();
        self.draw_or_log();
    }

    fn read_menu_choice(&mut self) -> MenuInput {
        self.info = std::iter::once("MAIN MENU:".to_string())
            .chain(MENU_LINES.iter().map(|l| format!("  {l}")))
            .collect();
        self.status = "Main menu".to_string();
        match self.read_line("Option (1-4):") {
            Some(input) => parse_menu_input(&input),
            None => MenuInput::Choice(MenuChoice::Quit),
        }
    }

    fn display_invalid_choice(&mut self, input: &str) {
        self.error_message = format!("Invalid option '{input}'. Please choose 1 to 4.");
    }

    fn display_round_start(&mut self, round: &GameRound) {
        self.info.clear();
        self.error_message.clear();
        self.message = format!(
            "The secret word has {} letters. Good luck!",
            round.current_mask().len()
        );
        self.status = "Round in progress".to_string();
        self.round = Some(RoundPanel::from_round(round));
    }

    fn display_round(&mut self, round: &GameRound) {
        self.round = Some(RoundPanel::from_round(round));
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> GuessInput {
        match self.read_line("Guess a letter:") {
            Some(input) => parse_guess_input(&input),
            None => GuessInput::Quit,
        }
    }

    fn display_guess_error(&mut self, error: &GuessError) {
        self.error_message = format!("Error: {error}.");
    }

    fn display_guess_result(&mut self, result: &GuessResult) {
        self.message = guess_result_message(result);
    }

    fn display_round_over(&mut self, round: &GameRound) {
        self.round = Some(RoundPanel::from_round(round));
        self.message = round_over_message(round);
        self.status = "Round over".to_string();
        self.draw_or_log();
    }

    fn display_round_abandoned(&mut self, round: &GameRound) {
        self.message = format!("Round abandoned. The word was {}.", round.secret_word());
        self.status = "Round abandoned".to_string();
        self.round = None;
    }

    fn display_add_words_intro(&mut self) {
        self.info = vec![
            "ADD WORDS TO DICTIONARY".to_string(),
            format!("Enter new words one at a time, then '{DONE_KEYWORD}' or ESC."),
        ];
        self.message.clear();
        self.error_message.clear();
        self.status = "Adding words".to_string();
    }

    fn read_new_word(&mut self) -> WordInput {
        match self.read_line("New word:") {
            Some(input) => parse_word_input(&input),
            None => WordInput::Done,
        }
    }

    fn display_word_added(&mut self, word: &str) {
        self.message = format!("'{word}' added.");
    }

    fn display_word_rejected(&mut self, reason: RejectReason) {
        self.error_message = format!("Invalid input: {reason}.");
    }

    fn display_add_words_done(&mut self, added: usize) {
        self.message = format!("Dictionary update complete. {added} word(s) added.");
    }

    fn display_stats(&mut self, stats: &StatsView) {
        self.info = std::iter::once("GAME STATS".to_string())
            .chain(stats_lines(stats).into_iter().map(|l| format!("  {l}")))
            .collect();
        self.message = "Press ENTER to return to the menu.".to_string();
        self.status = "Stats".to_string();
        // Any submitted text is ignored; ENTER and ESC both dismiss
        if self.read_line("").is_none() {
            debug_log!("Stats screen input cancelled");
        }
        self.message.clear();
    }

    fn display_error(&mut self, message: &str) {
        log::error!("{message}");
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Thanks for playing! Goodbye.".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_input_typing_and_submit() {
        let mut input = String::new();
        assert_eq!(edit_input(&mut input, key(KeyCode::Char('h'))), InputStep::Pending);
        assert_eq!(edit_input(&mut input, key(KeyCode::Char('i'))), InputStep::Pending);
        assert_eq!(edit_input(&mut input, key(KeyCode::Backspace)), InputStep::Pending);
        assert_eq!(input, "h");
        assert_eq!(
            edit_input(&mut input, key(KeyCode::Enter)),
            InputStep::Submit("h".to_string())
        );
        assert!(input.is_empty());
    }

    #[test]
    fn test_edit_input_cancel_and_modifiers() {
        let mut input = String::from("abc");
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(edit_input(&mut input, alt_x), InputStep::Pending);
        assert_eq!(input, "abc");

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(edit_input(&mut input, ctrl_c), InputStep::Cancel);
        assert_eq!(edit_input(&mut input, key(KeyCode::Esc)), InputStep::Cancel);
    }

    #[test]
    fn test_edit_input_length_limit() {
        let mut input = "a".repeat(MAX_INPUT_LENGTH);
        edit_input(&mut input, key(KeyCode::Char('b')));
        assert_eq!(input.len(), MAX_INPUT_LENGTH);
    }

    #[test]
    fn test_round_panel_snapshot() {
        let mut round = GameRound::new("cat", 6).unwrap();
        round.submit_guess('a').unwrap();
        let panel = RoundPanel::from_round(&round);
        assert_eq!(panel.mask, "_ A _");
        assert_eq!(panel.guessed, "Guessed letters: A");
        assert_eq!(panel.attempts, "Incorrect guesses: 0/6 (6 left)");
    }
}
