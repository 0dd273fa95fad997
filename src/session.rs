//! Menu loop tying the word bank, stats store and game rounds together.
//!
//! A [`Session`] owns everything that lives longer than one round: the loaded
//! word bank, the store locations and the random source used to pick secret
//! words. Presentation is delegated to a [`GameInterface`], implemented by the
//! line-based [`crate::cli::CliInterface`] and the full-screen
//! [`crate::tui::TuiInterface`].

use crate::config::GameConfig;
use crate::error::{GuessError, RejectReason, SessionError, WordBankError};
use crate::round::{GameRound, GuessResult};
use crate::stats::{Outcome, StatsRecord, StatsStore};
use crate::wordbank::{append_word, load_wordbank_with_fallback};
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    StartGame,
    AddWords,
    ShowStats,
    Quit,
}

impl MenuChoice {
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::StartGame),
            "2" => Some(Self::AddWords),
            "3" => Some(Self::ShowStats),
            "4" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Choice(MenuChoice),
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessInput {
    Letter(char),
    Invalid(GuessError),
    /// Input closed or the player backed out of the round.
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordInput {
    Word(String),
    Done,
}

/// Everything shown by the stats screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsView {
    pub record: StatsRecord,
    pub word_count: usize,
}

/// How a call to [`Session::play_round`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Finished(Outcome),
    Abandoned,
}

/// Presentation surface driven by a [`Session`].
///
/// `read_*` methods block until the player has entered something. Input
/// errors are returned as values and the session decides whether to
/// re-prompt.
pub trait GameInterface {
    fn display_welcome(&mut self);
    fn read_menu_choice(&mut self) -> MenuInput;
    fn display_invalid_choice(&mut self, input: &str);

    fn display_round_start(&mut self, round: &GameRound);
    fn display_round(&mut self, round: &GameRound);
    fn read_guess(&mut self) -> GuessInput;
    fn display_guess_error(&mut self, error: &GuessError);
    fn display_guess_result(&mut self, result: &GuessResult);
    fn display_round_over(&mut self, round: &GameRound);
    fn display_round_abandoned(&mut self, round: &GameRound);

    fn display_add_words_intro(&mut self);
    fn read_new_word(&mut self) -> WordInput;
    fn display_word_added(&mut self, word: &str);
    fn display_word_rejected(&mut self, reason: RejectReason);
    fn display_add_words_done(&mut self, added: usize);

    fn display_stats(&mut self, stats: &StatsView);
    fn display_error(&mut self, message: &str);
    fn display_exit_message(&mut self);
}

pub struct Session {
    config: GameConfig,
    words: Vec<String>,
    using_fallback: bool,
    stats: StatsStore,
    rng: StdRng,
}

impl Session {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Session with a reproducible choice of secret words.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let (words, using_fallback) = load_wordbank_with_fallback(&config.words_path);
        let stats = StatsStore::new(config.stats_path.clone());
        info_log!(
            "Session ready: {} words (built-in: {}), max {} misses",
            words.len(),
            using_fallback,
            config.max_incorrect
        );
        Self {
            config,
            words,
            using_fallback,
            stats,
            rng,
        }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn using_fallback(&self) -> bool {
        self.using_fallback
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn stats_store(&self) -> &StatsStore {
        &self.stats
    }

    /// Run the menu until the player quits or input runs out.
    ///
    /// # Errors
    ///
    /// Only internal errors end the loop early; bad input and file problems
    /// are reported through `ui` and the menu continues.
    pub fn run<I: GameInterface>(&mut self, ui: &mut I) -> Result<(), SessionError> {
        ui.display_welcome();
        loop {
            let choice = match ui.read_menu_choice() {
                MenuInput::Choice(choice) => choice,
                MenuInput::Invalid(input) => {
                    ui.display_invalid_choice(&input);
                    continue;
                }
            };
            debug_log!("Menu choice: {:?}", choice);
            match choice {
                MenuChoice::StartGame => {
                    self.play_round(ui)?;
                }
                MenuChoice::AddWords => {
                    self.add_words(ui);
                }
                MenuChoice::ShowStats => self.show_stats(ui),
                MenuChoice::Quit => {
                    ui.display_exit_message();
                    return Ok(());
                }
            }
        }
    }

    fn choose_secret(&mut self) -> Option<String> {
        self.words.choose(&mut self.rng).cloned()
    }

    /// Play one round with a randomly chosen secret word.
    ///
    /// Returns `Ok(None)` if no round could be started.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the round rejects its secret word or a guess
    /// is submitted after the round ended.
    pub fn play_round<I: GameInterface>(
        &mut self,
        ui: &mut I,
    ) -> Result<Option<RoundEnd>, SessionError> {
        let Some(secret) = self.choose_secret() else {
            ui.display_error("The dictionary is empty. Add words from the menu first.");
            return Ok(None);
        };
        let round = GameRound::new(&secret, self.config.max_incorrect)?;
        self.play(round, ui).map(Some)
    }

    /// Drive `round` until it is won, lost or abandoned, then record the result.
    ///
    /// A round that is already over is refused so its outcome is never
    /// recorded twice.
    fn play<I: GameInterface>(
        &mut self,
        mut round: GameRound,
        ui: &mut I,
    ) -> Result<RoundEnd, SessionError> {
        if round.is_terminal() {
            return Err(GuessError::RoundOver.into());
        }
        debug_log!("Starting round for a {}-letter word", round.secret_word().len());
        ui.display_round_start(&round);

        while !round.is_terminal() {
            ui.display_round(&round);
            let letter = match ui.read_guess() {
                GuessInput::Letter(letter) => letter,
                GuessInput::Invalid(error) => {
                    ui.display_guess_error(&error);
                    continue;
                }
                GuessInput::Quit => {
                    info_log!("Round abandoned");
                    ui.display_round_abandoned(&round);
                    return Ok(RoundEnd::Abandoned);
                }
            };
            match round.submit_guess(letter) {
                Ok(result) => ui.display_guess_result(&result),
                Err(error) if error.is_user_error() => ui.display_guess_error(&error),
                Err(error) => return Err(error.into()),
            }
        }

        ui.display_round_over(&round);
        let Some(outcome) = round.outcome() else {
            return Err(GuessError::RoundOver.into());
        };
        if let Err(e) = self.stats.record_outcome(outcome) {
            log::error!("Failed to record {outcome:?}: {e}");
            ui.display_error(&format!("Your result could not be saved: {e}"));
        }
        Ok(RoundEnd::Finished(outcome))
    }

    /// Read words until `DONE`, appending each accepted one to the word list.
    ///
    /// Returns how many words were added.
    pub fn add_words<I: GameInterface>(&mut self, ui: &mut I) -> usize {
        ui.display_add_words_intro();
        let mut added = 0;
        loop {
            let raw = match ui.read_new_word() {
                WordInput::Word(raw) => raw,
                WordInput::Done => break,
            };
            match append_word(&self.config.words_path, &raw) {
                Ok(word) => {
                    self.remember_word(word.clone());
                    added += 1;
                    ui.display_word_added(&word);
                }
                Err(WordBankError::Rejected(reason)) => ui.display_word_rejected(reason),
                Err(e @ WordBankError::Unwritable { .. }) => {
                    log::error!("{e}");
                    ui.display_error(&format!("Could not update the dictionary: {e}"));
                    break;
                }
            }
        }
        ui.display_add_words_done(added);
        added
    }

    fn remember_word(&mut self, word: String) {
        if self.using_fallback {
            // The stored list now has a playable word; stop using built-ins.
            let (words, using_fallback) = load_wordbank_with_fallback(&self.config.words_path);
            self.words = words;
            self.using_fallback = using_fallback;
        } else {
            self.words.push(word);
        }
    }

    pub fn show_stats<I: GameInterface>(&mut self, ui: &mut I) {
        match self.stats.load() {
            Ok(record) => ui.display_stats(&StatsView {
                record,
                word_count: self.words.len(),
            }),
            Err(e) => {
                log::error!("{e}");
                ui.display_error(&format!("Could not load stats: {e}"));
            }
        }
    }
}
