use crate::config::GameConfig;
use crate::debug_log;
use crate::error::{GuessError, RejectReason};
use crate::round::{
    DEFAULT_MAX_INCORRECT_GUESSES, GameRound, GuessKind, GuessResult, RoundState, parse_guess,
};
use crate::session::{GameInterface, GuessInput, MenuChoice, MenuInput, StatsView, WordInput};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Command-line hangman
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the newline-delimited word list
    #[arg(short = 'w', long = "words")]
    pub words_path: Option<PathBuf>,

    /// Path to the win/loss stats file
    #[arg(short = 's', long = "stats")]
    pub stats_path: Option<PathBuf>,

    /// Incorrect guesses allowed before the round is lost
    #[arg(
        short = 'm',
        long = "max-misses",
        default_value_t = DEFAULT_MAX_INCORRECT_GUESSES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_misses: u32,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Append log output to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Game settings, with unset paths taken from the default data directory.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            words_path: self.words_path.clone().unwrap_or(defaults.words_path),
            stats_path: self.stats_path.clone().unwrap_or(defaults.stats_path),
            max_incorrect: self.max_misses,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Input parsing shared by the line and full-screen interfaces

pub const DONE_KEYWORD: &str = "DONE";

#[must_use]
pub fn parse_menu_input(input: &str) -> MenuInput {
    MenuChoice::from_input(input).map_or_else(
        || MenuInput::Invalid(input.trim().to_string()),
        MenuInput::Choice,
    )
}

#[must_use]
pub fn parse_guess_input(input: &str) -> GuessInput {
    match parse_guess(input) {
        Ok(letter) => GuessInput::Letter(letter),
        Err(e) => GuessInput::Invalid(e),
    }
}

#[must_use]
pub fn parse_word_input(input: &str) -> WordInput {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case(DONE_KEYWORD) {
        WordInput::Done
    } else {
        WordInput::Word(trimmed.to_string())
    }
}

// Messages shared by the line and full-screen interfaces

pub const MENU_LINES: [&str; 4] = [
    "1. Start New Game",
    "2. Add Words to Dictionary",
    "3. Show Stats",
    "4. Quit",
];

#[must_use]
pub fn guessed_letters_line(round: &GameRound) -> String {
    let letters: Vec<String> = round.guessed_letters().iter().map(char::to_string).collect();
    format!("Guessed letters: {}", letters.join(", "))
}

#[must_use]
pub fn attempts_line(round: &GameRound) -> String {
    format!(
        "Incorrect guesses: {}/{} ({} left)",
        round.incorrect_count(),
        round.max_incorrect(),
        round.remaining_attempts()
    )
}

#[must_use]
pub fn guess_result_message(result: &GuessResult) -> String {
    match result.kind {
        GuessKind::Hit { occurrences: 1 } => format!("Correct! '{}' is in the word.", result.letter),
        GuessKind::Hit { occurrences } => {
            format!("Correct! '{}' appears {occurrences} times.", result.letter)
        }
        GuessKind::Miss => format!("Incorrect. '{}' is not in the word.", result.letter),
    }
}

#[must_use]
pub fn round_over_message(round: &GameRound) -> String {
    match round.state() {
        RoundState::Won => format!("CONGRATULATIONS! You won! The word was {}.", round.secret_word()),
        RoundState::Lost => format!(
            "GAME OVER! You ran out of guesses. The word was {}.",
            round.secret_word()
        ),
        RoundState::InProgress => format!("Round still in progress: {}", round.masked_word()),
    }
}

#[must_use]
pub fn stats_lines(stats: &StatsView) -> Vec<String> {
    let record = &stats.record;
    let mut lines = vec![
        format!("Words in dictionary: {}", stats.word_count),
        format!("Games won: {}", record.wins),
        format!("Games lost: {}", record.losses),
        format!("Games played: {}", record.total()),
    ];
    match record.win_rate() {
        Some(rate) => lines.push(format!("Win rate: {rate:.2}%")),
        None => lines.push("No games played yet. Get guessing!".to_string()),
    }
    lines
}

/// Line-based [`GameInterface`] reading from any `BufRead` and printing to stdout.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next input line, or `None` once input is closed or unreadable.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        println!("{prompt}");
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self) {
        println!("Welcome to Command-Line Hangman! Choose an option to continue...");
    }

    fn read_menu_choice(&mut self) -> MenuInput {
        println!("\n{}", "=".repeat(30));
        println!("MAIN MENU:");
        for line in MENU_LINES {
            println!("{line}");
        }
        println!("{}", "=".repeat(30));
        match self.read_line("Enter option number (1-4):") {
            Some(input) => parse_menu_input(&input),
            None => {
                debug_log!("Input closed at menu, quitting");
                MenuInput::Choice(MenuChoice::Quit)
            }
        }
    }

    fn display_invalid_choice(&mut self, input: &str) {
        println!("Invalid option '{input}'. Please choose a number from 1 to 4.");
    }

    fn display_round_start(&mut self, round: &GameRound) {
        println!("\n{}", "=".repeat(40));
        println!(
            "THE GAME IS STARTING! The secret word has {} letters.",
            round.current_mask().len()
        );
    }

    fn display_round(&mut self, round: &GameRound) {
        println!("\n{}", "-".repeat(40));
        println!("Word: {}", round.masked_word());
        println!("{}", guessed_letters_line(round));
        println!("{}", attempts_line(round));
    }

    fn read_guess(&mut self) -> GuessInput {
        match self.read_line("Guess a letter:") {
            Some(input) => parse_guess_input(&input),
            None => GuessInput::Quit,
        }
    }

    fn display_guess_error(&mut self, error: &GuessError) {
        println!("Error: {error}.");
    }

    fn display_guess_result(&mut self, result: &GuessResult) {
        println!("{}", guess_result_message(result));
    }

    fn display_round_over(&mut self, round: &GameRound) {
        println!("\n{}", "#".repeat(40));
        println!("Word: {}", round.masked_word());
        println!("{}", round_over_message(round));
        println!("{}", "#".repeat(40));
    }

    fn display_round_abandoned(&mut self, round: &GameRound) {
        println!("\nRound abandoned. The word was {}.", round.secret_word());
    }

    fn display_add_words_intro(&mut self) {
        println!("\n--- ADD WORDS TO DICTIONARY ---");
        println!("Enter new words, one at a time. Enter '{DONE_KEYWORD}' when finished.");
    }

    fn read_new_word(&mut self) -> WordInput {
        match self.read_line(&format!("Enter new word (or {DONE_KEYWORD}):")) {
            Some(input) => parse_word_input(&input),
            None => WordInput::Done,
        }
    }

    fn display_word_added(&mut self, word: &str) {
        println!("'{word}' added.");
    }

    fn display_word_rejected(&mut self, reason: RejectReason) {
        println!("Invalid input: {reason}.");
    }

    fn display_add_words_done(&mut self, added: usize) {
        println!("\nDictionary update complete. {added} word(s) added.");
    }

    fn display_stats(&mut self, stats: &StatsView) {
        println!("\n--- GAME STATS ---");
        for line in stats_lines(stats) {
            println!("{line}");
        }
    }

    fn display_error(&mut self, message: &str) {
        println!("\nError: {message}");
    }

    fn display_exit_message(&mut self) {
        println!("\nThanks for playing! Goodbye.");
    }
}
