//! State machine for a single round of hangman.

use crate::error::{GuessError, RoundError};
use crate::stats::Outcome;
use std::collections::BTreeSet;

pub const DEFAULT_MAX_INCORRECT_GUESSES: u32 = 6;
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessKind {
    /// The letter is in the word; every occurrence was revealed.
    Hit { occurrences: usize },
    Miss,
}

/// What a single accepted guess did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessResult {
    pub letter: char,
    pub kind: GuessKind,
    pub state: RoundState,
}

/// Parse a line of player input into a single upper-case letter.
///
/// # Errors
///
/// Returns `GuessError::NotALetter` unless the trimmed input is exactly one
/// alphabetic character.
pub fn parse_guess(input: &str) -> Result<char, GuessError> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(to_upper(c)),
        _ => Err(GuessError::NotALetter(trimmed.to_string())),
    }
}

// Letters whose upper case expands to several chars keep their original form.
fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[derive(Debug, Clone)]
pub struct GameRound {
    secret: Vec<char>,
    guessed: BTreeSet<char>,
    incorrect: u32,
    max_incorrect: u32,
    state: RoundState,
}

impl GameRound {
    /// Start a round for `secret`, allowing `max_incorrect` misses.
    ///
    /// # Errors
    ///
    /// Fails for an empty secret, a secret containing non-letters, or a miss
    /// limit of zero.
    pub fn new(secret: &str, max_incorrect: u32) -> Result<Self, RoundError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(RoundError::EmptySecret);
        }
        if !secret.chars().all(char::is_alphabetic) {
            return Err(RoundError::InvalidSecret(secret.to_string()));
        }
        if max_incorrect == 0 {
            return Err(RoundError::InvalidMissLimit);
        }
        Ok(Self {
            secret: secret.chars().map(to_upper).collect(),
            guessed: BTreeSet::new(),
            incorrect: 0,
            max_incorrect,
            state: RoundState::InProgress,
        })
    }

    /// Apply one guessed letter.
    ///
    /// # Errors
    ///
    /// `RoundOver` once the round is won or lost, `NotALetter` for
    /// non-alphabetic input and `AlreadyGuessed` for a repeat. None of these
    /// change the round.
    pub fn submit_guess(&mut self, letter: char) -> Result<GuessResult, GuessError> {
        if self.is_terminal() {
            return Err(GuessError::RoundOver);
        }
        if !letter.is_alphabetic() {
            return Err(GuessError::NotALetter(letter.to_string()));
        }
        let letter = to_upper(letter);
        if !self.guessed.insert(letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }

        let occurrences = self.secret.iter().filter(|&&c| c == letter).count();
        let kind = if occurrences == 0 {
            self.incorrect += 1;
            GuessKind::Miss
        } else {
            GuessKind::Hit { occurrences }
        };

        // A full reveal wins even if this guess also used the last miss.
        if self.secret.iter().all(|c| self.guessed.contains(c)) {
            self.state = RoundState::Won;
        } else if self.incorrect >= self.max_incorrect {
            self.state = RoundState::Lost;
        }

        Ok(GuessResult {
            letter,
            kind,
            state: self.state,
        })
    }

    #[must_use]
    pub fn current_mask(&self) -> Vec<char> {
        self.secret
            .iter()
            .map(|c| if self.guessed.contains(c) { *c } else { PLACEHOLDER })
            .collect()
    }

    /// The mask with letters separated by spaces, e.g. `_ A _`.
    #[must_use]
    pub fn masked_word(&self) -> String {
        let mask = self.current_mask();
        let mut out = String::with_capacity(mask.len() * 2);
        for (i, c) in mask.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(*c);
        }
        out
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> u32 {
        self.max_incorrect - self.incorrect
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn max_incorrect(&self) -> u32 {
        self.max_incorrect
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    #[must_use]
    pub fn secret_word(&self) -> String {
        self.secret.iter().collect()
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state != RoundState::InProgress
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            RoundState::InProgress => None,
            RoundState::Won => Some(Outcome::Win),
            RoundState::Lost => Some(Outcome::Loss),
        }
    }
}
